//! Signed-link reads from the filesystem bucket.

use crate::adapters::local::fs::{unix_now, FsBucket};
use crate::error::StorageError;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;
use tokio_util::io::ReaderStream;

#[derive(Debug, Deserialize)]
pub struct SignedQuery {
    pub expires: u64,
    pub signature: String,
}

pub fn media_router(bucket: FsBucket) -> Router {
    Router::new()
        .route("/media/:bucket/*key", get(serve_object))
        .with_state(Arc::new(bucket))
}

async fn serve_object(
    State(bucket): State<Arc<FsBucket>>,
    Path((bucket_name, key)): Path<(String, String)>,
    query: Option<Query<SignedQuery>>,
) -> Response {
    let Some(Query(query)) = query else {
        return StatusCode::FORBIDDEN.into_response();
    };

    if let Err(e) = bucket.verify(&bucket_name, &key, query.expires, &query.signature, unix_now()) {
        tracing::debug!(bucket = %bucket_name, key = %key, error = %e, "rejected media link");
        return StatusCode::FORBIDDEN.into_response();
    }

    match bucket.open(&bucket_name, &key).await {
        Ok(object) => (
            [
                (header::CONTENT_TYPE, object.content_type),
                (header::CONTENT_LENGTH, object.len.to_string()),
            ],
            Body::from_stream(ReaderStream::new(object.file)),
        )
            .into_response(),
        Err(StorageError::NotFound(_)) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!(bucket = %bucket_name, key = %key, error = %e, "media read failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
