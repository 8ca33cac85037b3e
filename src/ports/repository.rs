use crate::domain::VideoRecord;
use crate::error::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Insert a new video record
    async fn create(&self, record: &VideoRecord) -> Result<(), RepositoryError>;

    /// Get a video record, `None` if it does not exist
    async fn get(&self, video_id: Uuid) -> Result<Option<VideoRecord>, RepositoryError>;

    /// Replace a video record in a single write
    async fn update(&self, record: &VideoRecord) -> Result<(), RepositoryError>;
}
