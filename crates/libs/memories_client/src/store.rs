use crate::{ClientError, MemoriesApi};
use common_types::{AckResponse, Memory, MemoryPatch};
use thiserror::Error;
use tracing::{debug, instrument, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Index {index} is out of range for {len} memories")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Outcome of loading the store from the api.
///
/// A failed half leaves its field at the empty default.
#[derive(Debug)]
pub struct HydrationReport {
    pub memories: Result<usize, ClientError>,
    pub music_url: Result<(), ClientError>,
}

impl HydrationReport {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.memories.is_ok() && self.music_url.is_ok()
    }
}

/// Outcome of pushing local changes to the api. `None` means that half had nothing to send.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub memories: Option<Result<AckResponse, ClientError>>,
    pub music_url: Option<Result<AckResponse, ClientError>>,
}

impl SyncReport {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        !matches!(self.memories, Some(Err(_))) && !matches!(self.music_url, Some(Err(_)))
    }
}

/// Client side state of the slideshow: the ordered memories, the current slide and the music.
///
/// Local state is authoritative. After hydration every change marks the affected half dirty until
/// [`MemoriesStore::sync`] has sent it.
#[derive(Debug, Default)]
pub struct MemoriesStore {
    memories: Vec<Memory>,
    current_index: usize,
    music_url: String,
    is_music_playing: bool,
    is_hydrated: bool,
    memories_dirty: bool,
    music_dirty: bool,
}

impl MemoriesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Views render nothing until this is true.
    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.is_hydrated
    }

    #[must_use]
    pub fn memories(&self) -> &[Memory] {
        &self.memories
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.memories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current(&self) -> Option<&Memory> {
        self.memories.get(self.current_index)
    }

    pub fn set_current_index(&mut self, index: usize) -> Result<(), StoreError> {
        if index >= self.memories.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.memories.len(),
            });
        }
        self.current_index = index;
        Ok(())
    }

    #[must_use]
    pub fn music_url(&self) -> &str {
        &self.music_url
    }

    pub fn set_music_url(&mut self, music_url: impl Into<String>) {
        self.music_url = music_url.into();
        self.music_dirty = self.is_hydrated;
    }

    #[must_use]
    pub const fn is_music_playing(&self) -> bool {
        self.is_music_playing
    }

    pub fn set_music_playing(&mut self, playing: bool) {
        self.is_music_playing = playing;
    }

    /// Append a memory at the end.
    pub fn add(&mut self, memory: Memory) {
        self.memories.push(memory);
        self.mark_memories_dirty();
    }

    /// Remove every memory with this id. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.memories.len();
        self.memories.retain(|m| m.id != id);
        let removed = self.memories.len() != before;
        if removed {
            self.current_index = self
                .current_index
                .min(self.memories.len().saturating_sub(1));
            self.mark_memories_dirty();
        }
        removed
    }

    /// Merge `patch` into every memory with this id. Returns whether anything matched.
    pub fn update(&mut self, id: &str, patch: &MemoryPatch) -> bool {
        let mut matched = false;
        for memory in self.memories.iter_mut().filter(|m| m.id == id) {
            memory.apply(patch.clone());
            matched = true;
        }
        if matched {
            self.mark_memories_dirty();
        }
        matched
    }

    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.memories_dirty || self.music_dirty
    }

    fn mark_memories_dirty(&mut self) {
        self.memories_dirty = self.is_hydrated;
    }

    /// Load memories and music url concurrently. The store counts as hydrated afterwards,
    /// whether or not the fetches succeeded.
    #[instrument(skip_all)]
    pub async fn hydrate(&mut self, api: &dyn MemoriesApi) -> HydrationReport {
        let (memories, music_url) = tokio::join!(api.fetch_memories(), api.fetch_music_url());

        let memories = match memories {
            Ok(memories) => {
                let count = memories.len();
                self.memories = memories;
                Ok(count)
            }
            Err(e) => {
                warn!("Failed to load memories: {}", e);
                self.memories.clear();
                Err(e)
            }
        };
        let music_url = match music_url {
            Ok(url) => {
                self.music_url = url;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load music URL: {}", e);
                self.music_url.clear();
                Err(e)
            }
        };

        self.current_index = 0;
        self.memories_dirty = false;
        self.music_dirty = false;
        self.is_hydrated = true;
        debug!("Hydrated with {} memories", self.memories.len());
        HydrationReport {
            memories,
            music_url,
        }
    }

    /// Send dirty halves to the api. Failed halves stay dirty; local state is kept either way.
    #[instrument(skip_all)]
    pub async fn sync(&mut self, api: &dyn MemoriesApi) -> SyncReport {
        let mut report = SyncReport::default();

        if self.memories_dirty {
            let result = api.save_memories(&self.memories).await;
            match &result {
                Ok(_) => self.memories_dirty = false,
                Err(e) => warn!("Failed to save memories: {}", e),
            }
            report.memories = Some(result);
        }

        if self.music_dirty {
            let result = api.save_music_url(&self.music_url).await;
            match &result {
                Ok(_) => self.music_dirty = false,
                Err(e) => warn!("Failed to save music URL: {}", e),
            }
            report.music_url = Some(result);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, memory};

    #[test]
    fn add_remove_update_sequence() {
        let mut store = MemoriesStore::new();
        store.add(memory("a"));
        store.add(memory("b"));
        store.add(memory("c"));
        assert!(store.remove("b"));
        assert!(!store.remove("missing"));
        assert!(store.update(
            "c",
            &MemoryPatch {
                title: Some("Sea".to_owned()),
                ..MemoryPatch::default()
            }
        ));
        store.add(memory("d"));

        let ids: Vec<_> = store.memories().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "d"]);
        assert_eq!(store.memories()[1].title.as_deref(), Some("Sea"));
        assert_eq!(store.memories()[1].image_url, "https://img/c.jpg");
    }

    #[test]
    fn index_stays_valid() {
        let mut store = MemoriesStore::new();
        store.add(memory("a"));
        store.add(memory("b"));
        store.set_current_index(1).unwrap();
        assert_eq!(
            store.set_current_index(2),
            Err(StoreError::IndexOutOfRange { index: 2, len: 2 })
        );

        store.remove("b");
        assert_eq!(store.current_index(), 0);
        store.remove("a");
        assert_eq!(store.current_index(), 0);
        assert!(store.current().is_none());
    }

    #[tokio::test]
    async fn hydration_failure_leaves_empty_defaults() {
        let api = FakeApi::default()
            .with_memories(vec![memory("a")])
            .with_music_url("https://music/a.mp3");
        api.fail_fetch_memories(true);

        let mut store = MemoriesStore::new();
        assert!(!store.is_hydrated());
        let report = store.hydrate(&api).await;

        assert!(store.is_hydrated());
        assert!(report.memories.is_err());
        assert!(report.music_url.is_ok());
        assert!(store.is_empty());
        assert_eq!(store.music_url(), "https://music/a.mp3");
        assert!(!store.is_dirty());
    }

    #[tokio::test]
    async fn sync_sends_only_dirty_halves_and_reports_failures() {
        let api = FakeApi::default().with_memories(vec![memory("a")]);
        let mut store = MemoriesStore::new();
        store.hydrate(&api).await;

        let report = store.sync(&api).await;
        assert!(report.memories.is_none() && report.music_url.is_none());

        store.add(memory("b"));
        api.fail_saves(true);
        let report = store.sync(&api).await;
        assert!(!report.is_ok());
        assert!(matches!(report.memories, Some(Err(_))));
        assert!(report.music_url.is_none());
        assert_eq!(store.len(), 2);
        assert!(store.is_dirty());

        api.fail_saves(false);
        store.set_music_url("https://music/b.mp3");
        let report = store.sync(&api).await;
        assert!(report.is_ok());
        assert!(!store.is_dirty());
        assert_eq!(api.saved_memories().last().map(Vec::len), Some(2));
        assert_eq!(api.saved_music_urls(), ["https://music/b.mp3"]);
    }
}
