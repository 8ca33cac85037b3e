//! HTTP adapter - axum routes over the upload orchestrator.

pub mod auth;
pub mod error;
pub mod handlers;
#[cfg(feature = "local")]
pub mod media;

use crate::application::orchestrator::UploadOrchestrator;
use crate::error::ClientError;
use crate::ports::{MediaTools, ObjectStorage, TokenVerifier, VideoRepository};
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub use auth::bearer_token;

/// Allowance for multipart boundaries and part headers on top of the file ceiling.
pub const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Whole-body limit for the upload route.
pub fn upload_body_limit(max_upload_bytes: u64) -> usize {
    usize::try_from(max_upload_bytes.saturating_add(MULTIPART_OVERHEAD)).unwrap_or(usize::MAX)
}

pub struct AppState<R, S, M> {
    pub orchestrator: Arc<UploadOrchestrator<R, S, M>>,
    pub verifier: Arc<dyn TokenVerifier>,
}

// Derive would require R, S and M to be Clone
impl<R, S, M> Clone for AppState<R, S, M> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: self.orchestrator.clone(),
            verifier: self.verifier.clone(),
        }
    }
}

impl<R, S, M> AppState<R, S, M> {
    pub fn new(orchestrator: UploadOrchestrator<R, S, M>, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            verifier,
        }
    }

    /// Caller id from the bearer credential.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Uuid, ClientError> {
        self.verifier.verify(bearer_token(headers)?)
    }
}

pub fn router<R, S, M>(state: AppState<R, S, M>) -> Router
where
    R: VideoRepository + 'static,
    S: ObjectStorage + 'static,
    M: MediaTools + 'static,
{
    let body_limit = upload_body_limit(state.orchestrator.max_upload_bytes());

    Router::new()
        .route("/api/videos", post(handlers::create_video::<R, S, M>))
        .route("/api/videos/:video_id", get(handlers::get_video::<R, S, M>))
        // The whole request is capped here; the file part is also capped exactly
        // while it streams into staging
        .route(
            "/api/video_upload/:video_id",
            post(handlers::upload_video::<R, S, M>).layer(DefaultBodyLimit::max(body_limit)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
