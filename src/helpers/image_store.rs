use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("image i/o failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Flat directory of uploaded product images named `<uuid><.ext>`.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Writes the bytes under a fresh unique name and returns that name.
    /// The directory is created on first use.
    #[tracing::instrument(name = "Save image.", skip(self, bytes), fields(size = bytes.len()))]
    pub async fn save(&self, bytes: &[u8], original_name: &str) -> Result<String, ImageStoreError> {
        let file_name = format!("{}{}", Uuid::new_v4(), extension(original_name));

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ImageStoreError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.path(&file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| ImageStoreError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Image saved to {}", path.display());
        Ok(file_name)
    }

    /// Removes the image. A file that is already gone counts as deleted.
    #[tracing::instrument(name = "Delete image.", skip(self))]
    pub async fn delete(&self, file_name: &str) -> Result<(), ImageStoreError> {
        let path = self.path(file_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("Image {} already absent", path.display());
                Ok(())
            }
            Err(source) => Err(ImageStoreError::Io { path, source }),
        }
    }
}

/// Everything from the last '.' of the original name, or "" when there is none.
/// An "extension" that would climb out of the directory is dropped.
fn extension(original_name: &str) -> &str {
    match original_name.rfind('.') {
        Some(index) => {
            let ext = &original_name[index..];
            if ext.contains('/') || ext.contains('\\') {
                ""
            } else {
                ext
            }
        }
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files_in(dir: &Path) -> Vec<String> {
        match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => vec![],
        }
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("photo.png"), ".png");
        assert_eq!(extension("archive.tar.gz"), ".gz");
        assert_eq!(extension("README"), "");
        assert_eq!(extension(""), "");
        assert_eq!(extension("trailing."), ".");
        assert_eq!(extension("x./../../etc/passwd"), "");
    }

    #[tokio::test]
    async fn test_save_creates_directory_and_keeps_extension() {
        let root = tempfile::tempdir().unwrap();
        let store = ImageStore::new(root.path().join("public/images"));

        let name = store.save(b"png-bytes", "photo.png").await.unwrap();

        assert!(name.ends_with(".png"));
        assert!(Uuid::parse_str(name.trim_end_matches(".png")).is_ok());
        assert_eq!(std::fs::read(store.path(&name)).unwrap(), b"png-bytes");
        assert_eq!(files_in(store.dir()), vec![name]);
    }

    #[tokio::test]
    async fn test_save_generates_unique_names() {
        let root = tempfile::tempdir().unwrap();
        let store = ImageStore::new(root.path());

        let first = store.save(b"a", "same.jpg").await.unwrap();
        let second = store.save(b"b", "same.jpg").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(files_in(root.path()).len(), 2);
    }

    #[tokio::test]
    async fn test_save_without_extension() {
        let root = tempfile::tempdir().unwrap();
        let store = ImageStore::new(root.path());

        let name = store.save(b"raw", "blob").await.unwrap();
        assert!(!name.contains('.'));
    }

    #[tokio::test]
    async fn test_save_fails_when_directory_is_a_file() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("images");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let store = ImageStore::new(&blocker);

        assert!(store.save(b"bytes", "photo.png").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let store = ImageStore::new(root.path());
        let name = store.save(b"bytes", "photo.png").await.unwrap();

        store.delete(&name).await.unwrap();
        assert!(!store.path(&name).exists());

        store.delete(&name).await.unwrap();
        store.delete("never-existed.png").await.unwrap();
    }
}
