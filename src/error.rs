//! Error taxonomy for the upload pipeline.
//!
//! Client errors map to 4xx responses; everything else is a server-side failure
//! whose detail only reaches the logs.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Problems caused by the request itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("invalid video id")]
    InvalidId,

    #[error("missing form field `{0}`")]
    MissingField(&'static str),

    #[error("unsupported media type `{0}`")]
    UnsupportedType(String),

    #[error("upload has no declared content type")]
    MissingContentType,

    #[error("upload exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },

    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("missing or invalid credential")]
    InvalidCredential,

    #[error("not authorized to modify this video")]
    NotOwner,

    #[error("video not found")]
    NotFound,
}

/// The external remux tool failed.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    Failed {
        tool: &'static str,
        status: String,
        stderr: String,
    },

    #[error("{tool} produced no output at {path:?}")]
    MissingOutput { tool: &'static str, path: PathBuf },
}

/// Width/height could not be read from the media file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("could not read media metadata: {0}")]
    Unreadable(String),

    #[error("no video stream found")]
    NoVideoStream,

    #[error("invalid video dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Object storage is unreachable or refused the request.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload of `{key}` failed: {reason}")]
    Put { key: String, reason: String },

    #[error("could not sign link: {0}")]
    Sign(String),

    #[error("invalid object key `{0}`")]
    InvalidKey(String),

    #[error("object `{0}` not found")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// The metadata store is unreachable or refused the request.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("metadata store unavailable: {0}")]
    Unavailable(String),

    #[error("video {0} does not exist")]
    Missing(uuid::Uuid),
}

/// A stored locator did not split into exactly `bucket,key`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed object locator `{0}`")]
pub struct LocatorError(pub String);

/// Everything that can abort an upload or a playback lookup.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("local scratch file error: {0}")]
    Scratch(#[source] io::Error),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Locator(#[from] LocatorError),
}

impl UploadError {
    /// Coarse category used for logging and response mapping.
    pub fn kind(&self) -> &'static str {
        match self {
            UploadError::Client(_) => "client",
            UploadError::Scratch(_) => "internal",
            UploadError::Tool(_) | UploadError::Probe(_) => "tool",
            UploadError::Storage(_) | UploadError::Repository(_) => "transient",
            UploadError::Locator(_) => "invariant",
        }
    }

    pub fn client(&self) -> Option<&ClientError> {
        match self {
            UploadError::Client(e) => Some(e),
            _ => None,
        }
    }
}
