use serde::{Deserialize, Serialize};
use sqlx::Type;

/// Which backend holds a stored file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "storage_backend", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local upload directory, served under `/uploads`
    Local,
    /// MinIO/S3-compatible bucket
    Object,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Object => write!(f, "object"),
        }
    }
}

/// A file received from a client, not yet stored
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Self-describing location of a stored file
///
/// `key` is what the backend needs to delete the file; `location` is what
/// clients see (a relative path for local files, a full URL for objects).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub backend: StorageBackend,
    pub key: String,
    pub location: String,
}
