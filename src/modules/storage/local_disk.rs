//! Local-disk storage for payment slips
//!
//! Files land in the configured upload directory as
//! `{unix_millis}-{sanitized original name}` and are exposed to clients as
//! `uploads/{file name}`, the path the static file route serves.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

use super::traits::FileStorage;
use super::types::{StorageBackend, StoredFile, UploadedFile};
use crate::core::error::AppError;

/// URL path prefix under which the upload directory is served
pub const LOCAL_PUBLIC_PREFIX: &str = "uploads";

pub struct LocalDiskStorage {
    upload_dir: PathBuf,
}

impl LocalDiskStorage {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir_exists(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| {
                AppError::Storage(format!(
                    "Failed to create upload directory '{}': {}",
                    self.upload_dir.display(),
                    e
                ))
            })
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    async fn write_new(&self, file_name: &str, data: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.upload_dir.join(file_name))
            .await?;
        file.write_all(data).await?;
        file.flush().await
    }
}

#[async_trait]
impl FileStorage for LocalDiskStorage {
    fn kind(&self) -> StorageBackend {
        StorageBackend::Local
    }

    async fn store(&self, file: UploadedFile) -> Result<StoredFile, AppError> {
        let sanitized = sanitize_file_name(&file.original_name);
        let mut file_name = format!("{}-{}", Utc::now().timestamp_millis(), sanitized);

        let mut result = self.write_new(&file_name, &file.data).await;
        if matches!(&result, Err(e) if e.kind() == ErrorKind::AlreadyExists) {
            // Same name within the same millisecond
            file_name = format!(
                "{}-{}-{}",
                Utc::now().timestamp_millis(),
                &Uuid::new_v4().simple().to_string()[..8],
                sanitized
            );
            result = self.write_new(&file_name, &file.data).await;
        }
        result.map_err(|e| {
            AppError::Storage(format!("Failed to write file '{}': {}", file_name, e))
        })?;

        debug!(
            "Stored slip '{}' ({} bytes) in '{}'",
            file_name,
            file.data.len(),
            self.upload_dir.display()
        );

        Ok(StoredFile {
            backend: StorageBackend::Local,
            location: format!("{}/{}", LOCAL_PUBLIC_PREFIX, file_name),
            key: file_name,
        })
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        if !is_plain_file_name(key) {
            return Err(AppError::Storage(format!(
                "Refusing to delete '{}': not a file name inside the upload directory",
                key
            )));
        }

        match tokio::fs::remove_file(self.upload_dir.join(key)).await {
            Ok(()) => {
                debug!("Deleted slip '{}'", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Slip '{}' already gone", key);
                Ok(())
            }
            Err(e) => Err(AppError::Storage(format!(
                "Failed to delete file '{}': {}",
                key, e
            ))),
        }
    }
}

/// Keep only the final path component, collapse whitespace runs to `-`, and
/// drop anything outside `[A-Za-z0-9._-]`.
fn sanitize_file_name(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();

    let mut out = String::with_capacity(base.len());
    let mut in_whitespace = false;
    for c in base.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            out.push(c);
        }
    }

    let trimmed = out.trim_start_matches('.');
    if trimmed.is_empty() {
        "slip".to_string()
    } else {
        trimmed.to_string()
    }
}

fn is_plain_file_name(key: &str) -> bool {
    !key.is_empty() && key != "." && key != ".." && !key.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn upload(name: &str, data: &[u8]) -> UploadedFile {
        UploadedFile {
            original_name: name.to_string(),
            content_type: "image/png".to_string(),
            data: data.to_vec(),
        }
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("my slip.png"), "my-slip.png");
        assert_eq!(sanitize_file_name("a   b\tc.jpg"), "a-b-c.jpg");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\slip.pdf"), "slip.pdf");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name("bukti€.png"), "bukti.png");
        assert_eq!(sanitize_file_name(""), "slip");
        assert_eq!(sanitize_file_name(".."), "slip");
    }

    #[tokio::test]
    async fn test_store_writes_file_and_returns_relative_location() {
        let dir = TempDir::new().unwrap();
        let storage = LocalDiskStorage::new(dir.path());

        let stored = storage
            .store(upload("slip one.png", b"png-bytes"))
            .await
            .unwrap();

        assert_eq!(stored.backend, StorageBackend::Local);
        assert!(stored.key.ends_with("-slip-one.png"));
        assert_eq!(stored.location, format!("uploads/{}", stored.key));

        let written = std::fs::read(dir.path().join(&stored.key)).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn test_store_same_name_twice_keeps_both_files() {
        let dir = TempDir::new().unwrap();
        let storage = LocalDiskStorage::new(dir.path());

        let first = storage.store(upload("slip.png", b"one")).await.unwrap();
        let second = storage.store(upload("slip.png", b"two")).await.unwrap();

        assert_ne!(first.key, second.key);
        assert_eq!(std::fs::read(dir.path().join(&first.key)).unwrap(), b"one");
        assert_eq!(std::fs::read(dir.path().join(&second.key)).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_delete_removes_file_and_tolerates_missing() {
        let dir = TempDir::new().unwrap();
        let storage = LocalDiskStorage::new(dir.path());

        let stored = storage.store(upload("slip.png", b"x")).await.unwrap();
        storage.delete(&stored.key).await.unwrap();
        assert!(!dir.path().join(&stored.key).exists());

        // Second delete is a no-op
        storage.delete(&stored.key).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_rejects_paths_outside_upload_dir() {
        let dir = TempDir::new().unwrap();
        let storage = LocalDiskStorage::new(dir.path());

        assert!(storage.delete("../secret").await.is_err());
        assert!(storage.delete("nested/file.png").await.is_err());
        assert!(storage.delete("").await.is_err());
    }

    #[tokio::test]
    async fn test_ensure_dir_exists_creates_nested_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("uploads");
        let storage = LocalDiskStorage::new(&nested);

        storage.ensure_dir_exists().await.unwrap();
        assert!(storage.upload_dir().is_dir());
    }
}
