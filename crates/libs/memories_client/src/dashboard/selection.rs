use bytes::Bytes;
use std::io;
use std::path::{Path, PathBuf};
use tokio::{fs, task};
use walkdir::WalkDir;

/// A file picked in the dashboard, before any processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    /// MIME type reported by the picker, if any.
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl SelectedFile {
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// The reported type, else a guess from the extension.
    #[must_use]
    pub fn mime_type(&self) -> String {
        self.content_type.clone().unwrap_or_else(|| {
            mime_guess::from_path(&self.file_name)
                .first_or_octet_stream()
                .to_string()
        })
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type().starts_with("image/")
    }

    pub async fn read(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, None, Bytes::from(bytes)))
    }
}

/// Whether the extension of `path` names an image type.
#[must_use]
pub fn has_image_extension(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .is_some_and(|mime| mime.type_() == mime_guess::mime::IMAGE)
}

/// Every image below `dir`, recursively, in a stable order. Other files are never read.
pub async fn read_folder(dir: &Path) -> io::Result<Vec<SelectedFile>> {
    let root = dir.to_path_buf();
    let paths = task::spawn_blocking(move || -> io::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if entry.file_type().is_file() && has_image_extension(entry.path()) {
                paths.push(entry.into_path());
            }
        }
        Ok(paths)
    })
    .await
    .map_err(io::Error::other)??;

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(SelectedFile::read(&path).await?);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_falls_back_to_extension() {
        let file = SelectedFile::new("beach.PNG", None, Bytes::new());
        assert_eq!(file.mime_type(), "image/png");
        assert!(file.is_image());

        let notes = SelectedFile::new("notes.txt", None, Bytes::new());
        assert!(!notes.is_image());

        let reported = SelectedFile::new("blob", Some("image/webp".to_owned()), Bytes::new());
        assert!(reported.is_image());
    }

    #[tokio::test]
    async fn folder_is_walked_recursively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("2024/summer")).unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"a").unwrap();
        std::fs::write(dir.path().join("2024/summer/b.png"), b"b").unwrap();
        std::fs::write(dir.path().join("2024/readme.txt"), b"c").unwrap();

        let files = read_folder(dir.path()).await.unwrap();

        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, ["b.png", "a.jpg"]);
    }

    #[tokio::test]
    async fn folder_skips_non_images_without_reading_them() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"jpeg").unwrap();
        let movie = std::fs::File::create(dir.path().join("movie.mp4")).unwrap();
        movie.set_len(64 * 1024 * 1024).unwrap();

        let files = read_folder(dir.path()).await.unwrap();

        let loaded: usize = files.iter().map(|f| f.bytes.len()).sum();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name, "a.jpg");
        assert_eq!(loaded, 4);
    }

    #[test]
    fn image_extensions() {
        assert!(has_image_extension(Path::new("x/beach.JPEG")));
        assert!(has_image_extension(Path::new("shot.webp")));
        assert!(!has_image_extension(Path::new("movie.mp4")));
        assert!(!has_image_extension(Path::new("no_extension")));
    }
}
