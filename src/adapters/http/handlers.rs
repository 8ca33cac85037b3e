use super::auth::bearer_token;
use super::AppState;
use crate::application::orchestrator::{IncomingVideo, VIDEO_FIELD};
use crate::application::validate::BodyLimitExceeded;
use crate::domain::VideoRecord;
use crate::error::{ClientError, UploadError};
use crate::ports::{MediaTools, ObjectStorage, VideoRepository};
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use futures::TryStreamExt;
use serde::Deserialize;
use std::io;
use tokio_util::io::StreamReader;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateVideo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn parse_id(raw: &str) -> Result<Uuid, ClientError> {
    Uuid::parse_str(raw).map_err(|_| ClientError::InvalidId)
}

/// Multipart framing errors; the route's body limit shows up as 413.
fn multipart_error(err: MultipartError, limit: u64) -> ClientError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ClientError::TooLarge { limit }
    } else {
        ClientError::Malformed(err.body_text())
    }
}

/// Same as [`multipart_error`], for errors surfacing while the file part streams.
fn field_read_error(err: MultipartError, limit: u64) -> io::Error {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        io::Error::new(io::ErrorKind::InvalidData, BodyLimitExceeded { limit })
    } else {
        io::Error::new(io::ErrorKind::Other, err)
    }
}

pub async fn create_video<R, S, M>(
    State(state): State<AppState<R, S, M>>,
    headers: HeaderMap,
    Json(body): Json<CreateVideo>,
) -> Result<(StatusCode, Json<VideoRecord>), UploadError>
where
    R: VideoRepository + 'static,
    S: ObjectStorage + 'static,
    M: MediaTools + 'static,
{
    let caller = state.authenticate(&headers)?;
    let record = state
        .orchestrator
        .create_draft(caller, &body.title, body.description)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_video<R, S, M>(
    State(state): State<AppState<R, S, M>>,
    headers: HeaderMap,
    Path(video_id): Path<String>,
) -> Result<Json<VideoRecord>, UploadError>
where
    R: VideoRepository + 'static,
    S: ObjectStorage + 'static,
    M: MediaTools + 'static,
{
    let video_id = parse_id(&video_id)?;
    let caller = state.authenticate(&headers)?;
    let record = state.orchestrator.playback(video_id, caller).await?;
    Ok(Json(record))
}

/// Streams the `video` field straight into the pipeline without buffering it.
pub async fn upload_video<R, S, M>(
    State(state): State<AppState<R, S, M>>,
    headers: HeaderMap,
    Path(video_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<VideoRecord>, UploadError>
where
    R: VideoRepository + 'static,
    S: ObjectStorage + 'static,
    M: MediaTools + 'static,
{
    let video_id = parse_id(&video_id)?;
    let caller = state.authenticate(&headers)?;
    let limit = state.orchestrator.max_upload_bytes();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_owned);
        let body = StreamReader::new(field.map_err(move |e| field_read_error(e, limit)));
        futures::pin_mut!(body);

        let record = state
            .orchestrator
            .upload(video_id, caller, Some(IncomingVideo { content_type, body }))
            .await?;
        return Ok(Json(record));
    }

    let record = state
        .orchestrator
        .upload(video_id, caller, None::<IncomingVideo<tokio::io::Empty>>)
        .await?;
    Ok(Json(record))
}
