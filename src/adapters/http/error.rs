use crate::error::{ClientError, UploadError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

pub fn status_for(err: &UploadError) -> StatusCode {
    match err.client() {
        Some(ClientError::InvalidId)
        | Some(ClientError::MissingField(_))
        | Some(ClientError::UnsupportedType(_))
        | Some(ClientError::MissingContentType)
        | Some(ClientError::Malformed(_)) => StatusCode::BAD_REQUEST,
        Some(ClientError::InvalidCredential) | Some(ClientError::NotOwner) => {
            StatusCode::UNAUTHORIZED
        }
        Some(ClientError::NotFound) => StatusCode::NOT_FOUND,
        Some(ClientError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = status_for(&self);

        // Server-side detail stays in the logs
        let error = match self.client() {
            Some(client) => client.to_string(),
            None => String::from("upload failed"),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}
