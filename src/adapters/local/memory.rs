use crate::domain::VideoRecord;
use crate::error::RepositoryError;
use crate::ports::repository::VideoRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process metadata store for the monolith. Contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryVideoStore {
    videos: Arc<RwLock<HashMap<Uuid, VideoRecord>>>,
}

impl MemoryVideoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoRepository for MemoryVideoStore {
    async fn create(&self, record: &VideoRecord) -> Result<(), RepositoryError> {
        self.videos.write().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn get(&self, video_id: Uuid) -> Result<Option<VideoRecord>, RepositoryError> {
        Ok(self.videos.read().await.get(&video_id).cloned())
    }

    async fn update(&self, record: &VideoRecord) -> Result<(), RepositoryError> {
        let mut videos = self.videos.write().await;
        match videos.get_mut(&record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(RepositoryError::Missing(record.id)),
        }
    }
}
