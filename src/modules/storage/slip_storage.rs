use std::sync::Arc;

use tracing::info;

use super::local_disk::LocalDiskStorage;
use super::traits::FileStorage;
use super::types::{StorageBackend, StoredFile, UploadedFile};
use crate::core::error::AppError;

/// Routes slip uploads to the configured backend and deletions to whichever
/// backend the file was stored in.
pub struct SlipStorage {
    local: Arc<dyn FileStorage>,
    object: Option<Arc<dyn FileStorage>>,
}

impl SlipStorage {
    /// New uploads go to `object` when present, otherwise to `local`.
    pub fn new(local: Arc<dyn FileStorage>, object: Option<Arc<dyn FileStorage>>) -> Self {
        let storage = Self { local, object };
        info!("Slip storage active backend: {}", storage.active_backend());
        storage
    }

    pub fn local_only(local: LocalDiskStorage) -> Self {
        Self::new(Arc::new(local), None)
    }

    pub fn active_backend(&self) -> StorageBackend {
        self.active().kind()
    }

    fn active(&self) -> &Arc<dyn FileStorage> {
        self.object.as_ref().unwrap_or(&self.local)
    }

    pub async fn store(&self, file: UploadedFile) -> Result<StoredFile, AppError> {
        self.active().store(file).await
    }

    pub async fn delete(&self, backend: StorageBackend, key: &str) -> Result<(), AppError> {
        match backend {
            StorageBackend::Local => self.local.delete(key).await,
            StorageBackend::Object => match &self.object {
                Some(object) => object.delete(key).await,
                None => Err(AppError::Storage(format!(
                    "Object storage is not configured; cannot delete '{}'",
                    key
                ))),
            },
        }
    }
}
