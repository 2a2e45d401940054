//! Raw RFP upload storage. Bytes go to object storage (MinIO locally, S3 in
//! production); the returned location is what `rfp_uploads.file_path` records.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

#[async_trait]
pub trait UploadStorage: Send + Sync {
    /// Stores the bytes under `key` and returns a location string for the record.
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<String, AppError>;

    async fn delete(&self, key: &str) -> Result<(), AppError>;
}

pub struct S3UploadStorage {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3UploadStorage {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl UploadStorage for S3UploadStorage {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<String, AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        let location = format!("s3://{}/{}", self.bucket, key);
        info!("Stored RFP upload at {location}");
        Ok(location)
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 delete failed: {e}")))?;

        info!("Removed RFP upload s3://{}/{}", self.bucket, key);
        Ok(())
    }
}

/// Object key for an upload: `rfp-uploads/<uuid>/<sanitized file name>`.
pub fn upload_key(upload_id: Uuid, file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("rfp-uploads/{upload_id}/{safe}")
}
