use super::classify::MediaClassifier;
use super::link::LinkResolver;
use super::publish::ObjectPublisher;
use super::staging::StagingStore;
use super::transform::FastStartTransformer;
use super::validate::RequestValidator;
use crate::config::UploadConfig;
use crate::domain::VideoRecord;
use crate::error::{ClientError, UploadError};
use crate::ports::media::MediaTools;
use crate::ports::repository::VideoRepository;
use crate::ports::storage::ObjectStorage;
use std::sync::Arc;
use tokio::io::AsyncRead;
use uuid::Uuid;

/// Multipart field carrying the upload.
pub const VIDEO_FIELD: &str = "video";

/// The file part of an upload request.
pub struct IncomingVideo<B> {
    /// Content type as declared by the client
    pub content_type: Option<String>,
    pub body: B,
}

/// Where an upload got to. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Received,
    Validated,
    Staged,
    Transformed,
    Classified,
    Published,
    Linked,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Received => "received",
            Stage::Validated => "validated",
            Stage::Staged => "staged",
            Stage::Transformed => "transformed",
            Stage::Classified => "classified",
            Stage::Published => "published",
            Stage::Linked => "linked",
        }
    }

    /// The stage that follows this one, `None` once linked.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Received => Some(Stage::Validated),
            Stage::Validated => Some(Stage::Staged),
            Stage::Staged => Some(Stage::Transformed),
            Stage::Transformed => Some(Stage::Classified),
            Stage::Classified => Some(Stage::Published),
            Stage::Published => Some(Stage::Linked),
            Stage::Linked => None,
        }
    }
}

/// The stage an upload was attempting when it failed, given the last stage it reached.
pub fn failed_stage(reached: Stage) -> Stage {
    reached.next().unwrap_or(reached)
}

pub struct UploadOrchestrator<R, S, M> {
    repo: R,
    validator: RequestValidator,
    staging: StagingStore,
    transformer: FastStartTransformer<M>,
    classifier: MediaClassifier<M>,
    publisher: ObjectPublisher<S>,
    links: LinkResolver<S>,
}

impl<R, S, M> UploadOrchestrator<R, S, M>
where
    R: VideoRepository,
    S: ObjectStorage,
    M: MediaTools,
{
    pub fn new(config: UploadConfig, repo: R, storage: S, tools: M) -> Self {
        let storage = Arc::new(storage);
        let tools = Arc::new(tools);

        Self {
            repo,
            validator: RequestValidator::new(config.max_upload_bytes),
            staging: StagingStore::new(config.staging_dir.clone()),
            transformer: FastStartTransformer::new(tools.clone(), config.staging_dir),
            classifier: MediaClassifier::new(tools),
            publisher: ObjectPublisher::new(storage.clone(), config.bucket),
            links: LinkResolver::new(storage, config.link_ttl),
        }
    }

    /// Byte ceiling applied to an uploaded file.
    pub fn max_upload_bytes(&self) -> u64 {
        self.validator.max_bytes()
    }

    /// Create a draft video owned by `user_id`.
    pub async fn create_draft(
        &self,
        user_id: Uuid,
        title: &str,
        description: Option<String>,
    ) -> Result<VideoRecord, UploadError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ClientError::Malformed("title is required".into()).into());
        }

        let record = VideoRecord::new(user_id, title, description);
        self.repo.create(&record).await?;
        tracing::info!(video_id = %record.id, user_id = %user_id, "created video");
        Ok(record)
    }

    /// Owner-only read with the locator signed for playback.
    pub async fn playback(&self, video_id: Uuid, caller: Uuid) -> Result<VideoRecord, UploadError> {
        let record = self.owned_record(video_id, caller).await?;
        self.links.resolve_record(record).await
    }

    /// Run one upload through validate, stage, transform, classify and publish,
    /// then record the new locator and return the record with a signed link.
    ///
    /// The link is signed before the metadata write, which makes that write the
    /// last fallible step: any failure leaves the stored record as it was.
    /// Scratch files are dropped on every path.
    pub async fn upload<B>(
        &self,
        video_id: Uuid,
        caller: Uuid,
        incoming: Option<IncomingVideo<B>>,
    ) -> Result<VideoRecord, UploadError>
    where
        B: AsyncRead + Unpin + Send,
    {
        let mut stage = Stage::Received;
        match self.run(video_id, caller, incoming, &mut stage).await {
            Ok(record) => Ok(record),
            Err(err) => {
                let failed = failed_stage(stage);
                if err.client().is_some() {
                    tracing::warn!(video_id = %video_id, stage = failed.as_str(), error = %err, "upload rejected");
                } else {
                    tracing::error!(video_id = %video_id, stage = failed.as_str(), kind = err.kind(), error = %err, "upload failed");
                }
                Err(err)
            }
        }
    }

    async fn run<B>(
        &self,
        video_id: Uuid,
        caller: Uuid,
        incoming: Option<IncomingVideo<B>>,
        stage: &mut Stage,
    ) -> Result<VideoRecord, UploadError>
    where
        B: AsyncRead + Unpin + Send,
    {
        let mut record = self.owned_record(video_id, caller).await?;

        let incoming = incoming.ok_or(ClientError::MissingField(VIDEO_FIELD))?;
        let content_type = self
            .validator
            .check_content_type(incoming.content_type.as_deref())?;
        let mut body = self.validator.limit(incoming.body);
        advance(stage, Stage::Validated, video_id);

        let staged = self.staging.stage(&mut body).await?;
        advance(stage, Stage::Staged, video_id);

        let transformed = self.transformer.relocate(staged.path()).await?;
        drop(staged);
        advance(stage, Stage::Transformed, video_id);

        let class = self.classifier.classify(transformed.path()).await?;
        advance(stage, Stage::Classified, video_id);

        let locator = self
            .publisher
            .publish(transformed.path(), class, content_type)
            .await?;
        drop(transformed);
        advance(stage, Stage::Published, video_id);

        record.video_url = Some(locator.to_string());
        let signed = self.links.resolve_record(record.clone()).await?;

        // Concurrent uploads for one video race here; last write wins.
        self.repo.update(&record).await?;
        tracing::info!(video_id = %video_id, locator = %locator, "video published");
        advance(stage, Stage::Linked, video_id);
        Ok(signed)
    }

    async fn owned_record(&self, video_id: Uuid, caller: Uuid) -> Result<VideoRecord, UploadError> {
        let record = self
            .repo
            .get(video_id)
            .await?
            .ok_or(ClientError::NotFound)?;
        if record.user_id != caller {
            return Err(ClientError::NotOwner.into());
        }
        Ok(record)
    }
}

fn advance(stage: &mut Stage, next: Stage, video_id: Uuid) {
    debug_assert!(next > *stage);
    *stage = next;
    tracing::debug!(video_id = %video_id, stage = next.as_str(), "upload stage");
}
