//! Storage module for payment-slip files
//!
//! A single [`FileStorage`] capability with two backends: local disk and
//! MinIO/S3-compatible object storage. [`SlipStorage`] picks the backend for
//! new uploads from configuration and routes deletions by the backend kind
//! recorded with each file.

mod local_disk;
mod minio_client;
mod slip_storage;
mod traits;
mod types;

pub use local_disk::LocalDiskStorage;
pub use minio_client::MinIOClient;
pub use slip_storage::SlipStorage;
pub use traits::FileStorage;
pub use types::{StorageBackend, StoredFile, UploadedFile};
