use crate::api::legacy::error::LegacyError;
use common_types::Memory;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument, warn};

/// Read the memories file. A missing or unreadable file reads as an empty list.
#[instrument]
pub async fn read_memories(path: &Path) -> Vec<Memory> {
    let data = match fs::read_to_string(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No memories file at {}", path.display());
            return Vec::new();
        }
        Err(e) => {
            warn!("Could not read {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    serde_json::from_str(&data).unwrap_or_else(|e| {
        warn!("Could not parse {}: {}", path.display(), e);
        Vec::new()
    })
}

/// Replace the memories file with `memories`, pretty printed. Creates the parent folder when needed.
#[instrument(skip(memories), fields(count = memories.len()))]
pub async fn write_memories(path: &Path, memories: &[Memory]) -> Result<(), LegacyError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(memories)?;
    fs::write(path, json).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory(id: &str) -> Memory {
        Memory {
            id: id.to_owned(),
            image_url: format!("/img/{id}.jpg"),
            title: Some(format!("Title {id}")),
            date: None,
        }
    }

    #[tokio::test]
    async fn missing_or_broken_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("memories.json");
        assert!(read_memories(&path).await.is_empty());

        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, "{ not json").await.unwrap();
        assert!(read_memories(&path).await.is_empty());
    }

    #[tokio::test]
    async fn write_creates_folder_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("public").join("data").join("memories.json");
        let memories = vec![memory("1"), memory("2")];

        write_memories(&path, &memories).await.unwrap();

        let raw = fs::read_to_string(&path).await.unwrap();
        assert!(raw.starts_with("[\n"));
        assert_eq!(read_memories(&path).await, memories);
    }
}
