use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;

/// Prefix for every uploaded resume object.
const KEY_PREFIX: &str = "resumes";

/// Outcome of storing one uploaded document.
#[derive(Debug, Clone, Serialize)]
pub struct StoredBlob {
    /// Metadata row id when the metadata insert succeeded, otherwise the object key.
    pub id: String,
    pub filename: String,
    pub key: String,
    pub url: Option<String>,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Uploads `bytes`. Only the upload itself is allowed to fail the call;
    /// URL generation and metadata bookkeeping are best-effort.
    async fn store(&self, bytes: Bytes, filename: &str) -> Result<StoredBlob, AppError>;
}

/// S3 / MinIO backed blob store with a `resume_uploads` metadata table.
#[derive(Clone)]
pub struct S3BlobStore {
    s3: S3Client,
    bucket: String,
    db: PgPool,
    url_ttl: Duration,
}

impl S3BlobStore {
    pub fn new(s3: S3Client, bucket: String, db: PgPool, url_ttl: Duration) -> Self {
        Self {
            s3,
            bucket,
            db,
            url_ttl,
        }
    }

    async fn presigned_url(&self, key: &str) -> Option<String> {
        let presigning = match PresigningConfig::expires_in(self.url_ttl) {
            Ok(config) => config,
            Err(e) => {
                warn!("Invalid presigned URL lifetime: {e}");
                return None;
            }
        };

        match self
            .s3
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
        {
            Ok(request) => Some(request.uri().to_string()),
            Err(e) => {
                warn!("Failed to presign URL for {key}: {e}");
                None
            }
        }
    }

    async fn record_upload(
        &self,
        filename: &str,
        key: &str,
        url: Option<&str>,
        size: u64,
        uploaded_at: DateTime<Utc>,
    ) -> Option<Uuid> {
        let id = Uuid::new_v4();
        let result = sqlx::query(
            r#"
            INSERT INTO resume_uploads (id, filename, object_key, url, size_bytes, uploaded_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(filename)
        .bind(key)
        .bind(url)
        .bind(i64::try_from(size).unwrap_or(i64::MAX))
        .bind(uploaded_at)
        .execute(&self.db)
        .await;

        match result {
            Ok(_) => Some(id),
            Err(e) => {
                warn!("Failed to record upload metadata for {key}: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn store(&self, bytes: Bytes, filename: &str) -> Result<StoredBlob, AppError> {
        let uploaded_at = Utc::now();
        let filename = base_name(filename).to_string();
        let key = object_key(&filename, uploaded_at);
        let size = bytes.len() as u64;

        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded {size} bytes to s3://{}/{}", self.bucket, key);

        let url = self.presigned_url(&key).await;
        let id = self
            .record_upload(&filename, &key, url.as_deref(), size, uploaded_at)
            .await
            .map(|id| id.to_string())
            .unwrap_or_else(|| key.clone());

        Ok(StoredBlob {
            id,
            filename,
            key,
            url,
            size,
            uploaded_at,
        })
    }
}

/// Last path component of a client-supplied filename.
fn base_name(filename: &str) -> &str {
    filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
}

/// `resumes/{YYYYmmdd_HHMMSS}_{filename}`
fn object_key(filename: &str, at: DateTime<Utc>) -> String {
    format!("{KEY_PREFIX}/{}_{filename}", at.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
pub use memory::MemoryBlobStore;
