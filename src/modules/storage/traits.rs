use async_trait::async_trait;

use super::types::{StorageBackend, StoredFile, UploadedFile};
use crate::core::error::AppError;

/// A backend that can hold uploaded files.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// The kind recorded next to every file this backend stores.
    fn kind(&self) -> StorageBackend;

    /// Persist the file and return where it ended up.
    async fn store(&self, file: UploadedFile) -> Result<StoredFile, AppError>;

    /// Remove a previously stored file by its backend key.
    ///
    /// Deleting a file that no longer exists is not an error.
    async fn delete(&self, key: &str) -> Result<(), AppError>;
}
