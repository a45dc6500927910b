mod s3;

use async_trait::async_trait;

pub use s3::S3Client;

#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("blob request failed: {0}")]
    Request(String),

    #[error("blob store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("not a blob store url: {0}")]
    BadUrl(String),
}

impl From<BlobError> for crate::AppError {
    fn from(err: BlobError) -> Self {
        crate::AppError::Upstream(err.to_string())
    }
}

/// Photo/resume storage. Entity handlers only ever call `delete` best-effort;
/// the upload routes call `store`.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store an object under `key` and return its public URL.
    async fn store(&self, key: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<String, BlobError>;

    /// Delete the object a previous `store` returned `url` for.
    async fn delete(&self, url: &str) -> Result<(), BlobError>;
}
