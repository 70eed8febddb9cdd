use crate::ClientError;
use crate::login::Session;
use async_trait::async_trait;
use bytes::Bytes;
use common_types::{
    AckResponse, ErrorResponse, LoginRequest, MediaKind, MemoriesPayload, Memory,
    MusicUrlPayload, SessionClaims, SessionToken, UploadResponse,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode, Url};
use tracing::{debug, instrument};

/// A file ready to be sent to the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Everything the client side needs from the memories api.
#[async_trait]
pub trait MemoriesApi: Send + Sync {
    async fn fetch_memories(&self) -> Result<Vec<Memory>, ClientError>;

    async fn fetch_music_url(&self) -> Result<String, ClientError>;

    async fn save_memories(&self, memories: &[Memory]) -> Result<AckResponse, ClientError>;

    async fn save_music_url(&self, music_url: &str) -> Result<AckResponse, ClientError>;

    async fn login(&self, password: &str) -> Result<SessionToken, ClientError>;

    async fn verify_session(&self, session: &Session) -> Result<SessionClaims, ClientError>;

    async fn upload(
        &self,
        session: &Session,
        file: UploadFile,
        kind: MediaKind,
    ) -> Result<UploadResponse, ClientError>;

    async fn delete_memory(&self, session: &Session, id: &str) -> Result<(), ClientError>;
}

/// [`MemoriesApi`] over HTTP.
#[derive(Clone, Debug)]
pub struct HttpMemoriesApi {
    http_client: Client,
    base_url: Url,
}

impl HttpMemoriesApi {
    pub fn new(http_client: Client, base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http_client,
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }
}

/// Turn a non-success response into a [`ClientError`] carrying the server's message.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized(message));
    }
    Err(ClientError::Server {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl MemoriesApi for HttpMemoriesApi {
    #[instrument(skip(self))]
    async fn fetch_memories(&self) -> Result<Vec<Memory>, ClientError> {
        let response = self
            .http_client
            .get(self.endpoint("api/memories-db")?)
            .send()
            .await?;
        let payload: MemoriesPayload = check(response).await?.json().await?;
        debug!("Fetched {} memories", payload.memories.len());
        Ok(payload.memories)
    }

    #[instrument(skip(self))]
    async fn fetch_music_url(&self) -> Result<String, ClientError> {
        let response = self
            .http_client
            .get(self.endpoint("api/music-url-db")?)
            .send()
            .await?;
        let payload: MusicUrlPayload = check(response).await?.json().await?;
        Ok(payload.music_url)
    }

    #[instrument(skip(self, memories), fields(count = memories.len()))]
    async fn save_memories(&self, memories: &[Memory]) -> Result<AckResponse, ClientError> {
        let response = self
            .http_client
            .post(self.endpoint("api/memories-db")?)
            .json(&MemoriesPayload {
                memories: memories.to_vec(),
            })
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    #[instrument(skip(self))]
    async fn save_music_url(&self, music_url: &str) -> Result<AckResponse, ClientError> {
        let response = self
            .http_client
            .post(self.endpoint("api/music-url-db")?)
            .json(&MusicUrlPayload {
                music_url: music_url.to_owned(),
            })
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    #[instrument(skip(self, password))]
    async fn login(&self, password: &str) -> Result<SessionToken, ClientError> {
        let response = self
            .http_client
            .post(self.endpoint("api/auth/login")?)
            .json(&LoginRequest {
                password: password.to_owned(),
            })
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    #[instrument(skip(self, session))]
    async fn verify_session(&self, session: &Session) -> Result<SessionClaims, ClientError> {
        let response = self
            .http_client
            .get(self.endpoint("api/auth/session")?)
            .bearer_auth(session.access_token())
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    #[instrument(skip(self, session, file), fields(file_name = %file.file_name))]
    async fn upload(
        &self,
        session: &Session,
        file: UploadFile,
        kind: MediaKind,
    ) -> Result<UploadResponse, ClientError> {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        let form = Form::new()
            .part("file", part)
            .text("type", kind.as_str());
        let response = self
            .http_client
            .post(self.endpoint("api/upload")?)
            .bearer_auth(session.access_token())
            .multipart(form)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    #[instrument(skip(self, session))]
    async fn delete_memory(&self, session: &Session, id: &str) -> Result<(), ClientError> {
        let mut url = self.endpoint("api/memories-db/")?;
        url.path_segments_mut()
            .map_err(|()| ClientError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(id);
        let response = self
            .http_client
            .delete(url)
            .bearer_auth(session.access_token())
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}
