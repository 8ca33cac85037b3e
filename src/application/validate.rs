//! Up-front request checks: declared content type and the body byte ceiling.

use crate::error::ClientError;
use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};

/// The only container accepted for upload.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &["video/mp4"];

#[derive(Clone, Copy, Debug)]
pub struct RequestValidator {
    max_bytes: u64,
}

impl RequestValidator {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Parse the declared content type and match it against the allow-list.
    /// Parameters such as `; codecs=...` are ignored.
    pub fn check_content_type(&self, declared: Option<&str>) -> Result<&'static str, ClientError> {
        let media_type = declared
            .and_then(|d| d.split(';').next())
            .map(|m| m.trim().to_ascii_lowercase())
            .filter(|m| !m.is_empty())
            .ok_or(ClientError::MissingContentType)?;

        ALLOWED_CONTENT_TYPES
            .iter()
            .find(|allowed| **allowed == media_type)
            .copied()
            .ok_or(ClientError::UnsupportedType(media_type))
    }

    /// Wrap a body so reading past the ceiling fails.
    pub fn limit<R>(&self, reader: R) -> LimitedReader<R> {
        LimitedReader::new(reader, self.max_bytes)
    }
}

/// Marker carried inside the `io::Error` a [`LimitedReader`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLimitExceeded {
    pub limit: u64,
}

impl fmt::Display for BodyLimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body exceeded {} bytes", self.limit)
    }
}

impl std::error::Error for BodyLimitExceeded {}

impl BodyLimitExceeded {
    /// Recover the marker from an I/O error, if that is what caused it.
    pub fn from_io(err: &io::Error) -> Option<Self> {
        err.get_ref()
            .and_then(|inner| inner.downcast_ref::<BodyLimitExceeded>())
            .copied()
    }
}

/// Reader that errors instead of truncating once more than `limit` bytes pass through.
#[derive(Debug)]
pub struct LimitedReader<R> {
    inner: R,
    limit: u64,
    remaining: u64,
}

impl<R> LimitedReader<R> {
    pub fn new(inner: R, limit: u64) -> Self {
        Self {
            inner,
            limit,
            remaining: limit,
        }
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for LimitedReader<R> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = &mut *self;
        let before = buf.filled().len();
        ready!(Pin::new(&mut this.inner).poll_read(cx, buf))?;
        let read = (buf.filled().len() - before) as u64;

        if read > this.remaining {
            // An erroring read must not hand back any bytes
            buf.set_filled(before);
            this.remaining = 0;
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::InvalidData,
                BodyLimitExceeded { limit: this.limit },
            )));
        }
        this.remaining -= read;
        Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[test]
    fn test_accepts_mp4_with_parameters_and_case() {
        let validator = RequestValidator::new(10);
        assert_eq!(validator.check_content_type(Some("video/mp4")), Ok("video/mp4"));
        assert_eq!(
            validator.check_content_type(Some("Video/MP4; codecs=\"avc1\"")),
            Ok("video/mp4")
        );
    }

    #[test]
    fn test_rejects_other_types() {
        let validator = RequestValidator::new(10);
        assert_eq!(
            validator.check_content_type(Some("video/quicktime")),
            Err(ClientError::UnsupportedType("video/quicktime".into()))
        );
        assert!(validator.check_content_type(Some("image/png")).is_err());
    }

    #[test]
    fn test_missing_content_type_has_its_own_error() {
        let validator = RequestValidator::new(10);
        for declared in [None, Some(""), Some("  ; charset=utf-8")] {
            assert_eq!(
                validator.check_content_type(declared),
                Err(ClientError::MissingContentType)
            );
        }
        assert_eq!(
            ClientError::MissingContentType.to_string(),
            "upload has no declared content type"
        );
    }

    #[tokio::test]
    async fn test_reads_up_to_the_limit() {
        let data = vec![7u8; 64];
        let mut reader = RequestValidator::new(64).limit(&data[..]);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).await.unwrap();
        assert_eq!(out.len(), 64);
    }

    #[tokio::test]
    async fn test_fails_past_the_limit() {
        let data = vec![7u8; 65];
        let mut reader = RequestValidator::new(64).limit(&data[..]);
        let mut out = Vec::new();
        let err = reader.read_to_end(&mut out).await.unwrap_err();
        assert_eq!(
            BodyLimitExceeded::from_io(&err),
            Some(BodyLimitExceeded { limit: 64 })
        );
    }

    #[tokio::test]
    async fn test_failed_read_leaves_buffer_unfilled() {
        let data = vec![7u8; 100];
        let mut reader = RequestValidator::new(10).limit(&data[..]);
        let mut storage = [0u8; 128];
        let mut buf = ReadBuf::new(&mut storage);

        let result = std::future::poll_fn(|cx| Pin::new(&mut reader).poll_read(cx, &mut buf)).await;

        assert!(result.is_err());
        assert!(buf.filled().is_empty());
    }

    #[test]
    fn test_unrelated_io_errors_are_not_limit_errors() {
        let err = io::Error::new(io::ErrorKind::Other, "connection reset");
        assert_eq!(BodyLimitExceeded::from_io(&err), None);
    }
}
