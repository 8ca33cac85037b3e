use crate::domain::{ObjectLocator, VideoRecord};
use crate::error::UploadError;
use crate::ports::storage::ObjectStorage;
use std::sync::Arc;
use std::time::Duration;

/// Signs stored locators into playback links at read time.
pub struct LinkResolver<S> {
    storage: Arc<S>,
    ttl: Duration,
}

impl<S: ObjectStorage> LinkResolver<S> {
    pub fn new(storage: Arc<S>, ttl: Duration) -> Self {
        Self { storage, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn resolve(&self, raw: &str) -> Result<String, UploadError> {
        let locator = ObjectLocator::parse(raw)?;
        let url = self
            .storage
            .signed_url(&locator.bucket, &locator.key, self.ttl)
            .await?;
        Ok(url)
    }

    /// Copy of `record` with its locator swapped for a signed link.
    pub async fn resolve_record(&self, mut record: VideoRecord) -> Result<VideoRecord, UploadError> {
        if let Some(raw) = record.video_url.take() {
            record.video_url = Some(self.resolve(&raw).await?);
        }
        Ok(record)
    }
}
