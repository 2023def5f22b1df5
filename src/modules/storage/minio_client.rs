//! MinIO/S3-compatible storage client
//!
//! Stores payment slips under `{prefix}/{uuid}.{ext}` and hands out direct
//! URLs on the public endpoint. Uses the rust-s3 crate for object operations.

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::traits::FileStorage;
use super::types::{StorageBackend, StoredFile, UploadedFile};
use crate::core::config::MinIOConfig;
use crate::core::error::AppError;

/// MinIO/S3-compatible storage client
pub struct MinIOClient {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    endpoint: String,
    public_endpoint: String,
    prefix: String,
}

impl MinIOClient {
    /// Create a new MinIO client from configuration and make sure the bucket exists
    pub async fn new(config: MinIOConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Storage(format!("Failed to create MinIO credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Storage(format!("Failed to create MinIO bucket: {}", e)))?;

        // Use path-style URLs for MinIO (http://endpoint/bucket instead of http://bucket.endpoint)
        bucket.set_path_style();

        let client = Self {
            bucket,
            region,
            credentials,
            endpoint: config.endpoint,
            public_endpoint: config.public_endpoint,
            prefix: config.prefix,
        };

        client.ensure_bucket_exists().await?;

        info!(
            "MinIO client initialized for endpoint: {}, bucket: {}, prefix: {}",
            client.endpoint,
            client.bucket.name(),
            client.prefix
        );

        Ok(client)
    }

    /// Ensure the bucket exists, create if not
    pub async fn ensure_bucket_exists(&self) -> Result<(), AppError> {
        match self.create_bucket().await {
            Ok(_) => {
                info!("Bucket '{}' created successfully", self.bucket.name());
                Ok(())
            }
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                }
                Ok(())
            }
        }
    }

    async fn create_bucket(&self) -> Result<(), AppError> {
        Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await
        .map_err(|e| {
            AppError::Storage(format!(
                "Failed to create bucket '{}': {}",
                self.bucket.name(),
                e
            ))
        })?;

        Ok(())
    }

    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }

    /// Direct URL for an object on the public endpoint
    pub fn object_url(&self, key: &str) -> String {
        object_url(&self.public_endpoint, &self.bucket.name(), key)
    }
}

#[async_trait]
impl FileStorage for MinIOClient {
    fn kind(&self) -> StorageBackend {
        StorageBackend::Object
    }

    async fn store(&self, file: UploadedFile) -> Result<StoredFile, AppError> {
        let key = object_key(&self.prefix, Uuid::new_v4(), &file);

        self.bucket
            .put_object_with_content_type(&key, &file.data, &file.content_type)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to upload file '{}': {}", key, e)))?;

        debug!("Uploaded slip '{}' to bucket '{}'", key, self.bucket.name());

        Ok(StoredFile {
            backend: StorageBackend::Object,
            location: self.object_url(&key),
            key,
        })
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.bucket
            .delete_object(key)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to delete file '{}': {}", key, e)))?;

        debug!("Deleted slip '{}' from bucket '{}'", key, self.bucket.name());
        Ok(())
    }
}

fn object_url(public_endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", public_endpoint, bucket, key)
}

/// Build `{prefix}/{id}.{ext}`, preferring the extension implied by the
/// content type over the one in the client's file name.
fn object_key(prefix: &str, id: Uuid, file: &UploadedFile) -> String {
    let extension = extension_from_content_type(&file.content_type)
        .map(str::to_string)
        .or_else(|| {
            file.original_name
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_ascii_lowercase())
                .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        })
        .unwrap_or_else(|| "bin".to_string());

    if prefix.is_empty() {
        format!("{}.{}", id, extension)
    } else {
        format!("{}/{}.{}", prefix, id, extension)
    }
}

fn extension_from_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        "application/pdf" => Some("pdf"),
        _ => None,
    }
}
