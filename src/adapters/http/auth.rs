use crate::error::ClientError;
use axum::http::{header, HeaderMap};

/// The token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ClientError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ClientError::InvalidCredential)?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(ClientError::InvalidCredential)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(ClientError::InvalidCredential);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(ClientError::InvalidCredential);
    }
    Ok(token)
}
