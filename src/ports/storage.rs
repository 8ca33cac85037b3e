use crate::error::StorageError;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload a local file to `bucket/key` with the given content type
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        local_path: &Path,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Time-bounded read link for `bucket/key`
    async fn signed_url(
        &self,
        bucket: &str,
        key: &str,
        ttl: Duration,
    ) -> Result<String, StorageError>;
}
