#![allow(clippy::unwrap_used)]

use crate::{ClientError, MemoriesApi, Session, UploadFile};
use async_trait::async_trait;
use common_types::{
    AckResponse, MediaKind, Memory, SessionClaims, SessionToken, UploadResponse,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub fn memory(id: &str) -> Memory {
    Memory {
        id: id.to_owned(),
        image_url: format!("https://img/{id}.jpg"),
        title: Some(id.to_uppercase()),
        date: Some("2024-01-15".to_owned()),
    }
}

fn server_error(message: &str) -> ClientError {
    ClientError::Server {
        status: 500,
        message: message.to_owned(),
    }
}

/// In-process [`MemoriesApi`] recording every call.
#[derive(Default)]
pub struct FakeApi {
    memories: Vec<Memory>,
    music_url: String,
    password: String,
    fail_fetch_memories: AtomicBool,
    fail_saves: AtomicBool,
    /// Zero based index of the upload call that fails.
    fail_upload_at: Mutex<Option<usize>>,
    upload_calls: AtomicUsize,
    uploads: Mutex<Vec<(UploadFile, MediaKind)>>,
    saved_memories: Mutex<Vec<Vec<Memory>>>,
    saved_music_urls: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
    reject_sessions: AtomicBool,
}

impl FakeApi {
    pub fn with_memories(mut self, memories: Vec<Memory>) -> Self {
        self.memories = memories;
        self
    }

    pub fn with_music_url(mut self, music_url: &str) -> Self {
        self.music_url = music_url.to_owned();
        self
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.to_owned();
        self
    }

    pub fn fail_fetch_memories(&self, fail: bool) {
        self.fail_fetch_memories.store(fail, Ordering::SeqCst);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn fail_upload_at(&self, index: Option<usize>) {
        *self.fail_upload_at.lock().unwrap() = index;
    }

    pub fn reject_sessions(&self, reject: bool) {
        self.reject_sessions.store(reject, Ordering::SeqCst);
    }

    pub fn uploads(&self) -> Vec<(UploadFile, MediaKind)> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn saved_memories(&self) -> Vec<Vec<Memory>> {
        self.saved_memories.lock().unwrap().clone()
    }

    pub fn saved_music_urls(&self) -> Vec<String> {
        self.saved_music_urls.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

pub fn session() -> Session {
    Session::new(SessionToken {
        access_token: "token".to_owned(),
        expiry: 4_102_444_800,
    })
}

#[async_trait]
impl MemoriesApi for FakeApi {
    async fn fetch_memories(&self) -> Result<Vec<Memory>, ClientError> {
        if self.fail_fetch_memories.load(Ordering::SeqCst) {
            return Err(server_error("memories unavailable"));
        }
        Ok(self.memories.clone())
    }

    async fn fetch_music_url(&self) -> Result<String, ClientError> {
        Ok(self.music_url.clone())
    }

    async fn save_memories(&self, memories: &[Memory]) -> Result<AckResponse, ClientError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(server_error("save failed"));
        }
        self.saved_memories.lock().unwrap().push(memories.to_vec());
        Ok(AckResponse {
            success: true,
            message: "Memories should be managed via upload endpoint".to_owned(),
        })
    }

    async fn save_music_url(&self, music_url: &str) -> Result<AckResponse, ClientError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(server_error("save failed"));
        }
        self.saved_music_urls
            .lock()
            .unwrap()
            .push(music_url.to_owned());
        Ok(AckResponse {
            success: true,
            message: "Music should be managed via upload endpoint".to_owned(),
        })
    }

    async fn login(&self, password: &str) -> Result<SessionToken, ClientError> {
        if password != self.password {
            return Err(ClientError::Unauthorized("Incorrect password".to_owned()));
        }
        Ok(session().token().clone())
    }

    async fn verify_session(&self, _session: &Session) -> Result<SessionClaims, ClientError> {
        if self.reject_sessions.load(Ordering::SeqCst) {
            return Err(ClientError::Unauthorized("Invalid or expired token".to_owned()));
        }
        Ok(SessionClaims {
            sub: "admin".to_owned(),
            iat: 0,
            exp: i64::MAX / 2,
        })
    }

    async fn upload(
        &self,
        _session: &Session,
        file: UploadFile,
        kind: MediaKind,
    ) -> Result<UploadResponse, ClientError> {
        let call = self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_upload_at.lock().unwrap() == Some(call) {
            return Err(server_error("upload failed"));
        }
        let file_name = format!("{call}_{}", file.file_name);
        self.uploads.lock().unwrap().push((file, kind));
        Ok(UploadResponse {
            success: true,
            url: format!("https://cdn/memories/{file_name}"),
            file_name,
            kind,
        })
    }

    async fn delete_memory(&self, _session: &Session, id: &str) -> Result<(), ClientError> {
        self.deleted.lock().unwrap().push(id.to_owned());
        Ok(())
    }
}
