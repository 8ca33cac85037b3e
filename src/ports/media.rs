use crate::domain::Dimensions;
use crate::error::{ProbeError, ToolError};
use async_trait::async_trait;
use std::path::Path;

/// External media tooling, kept behind a trait so tests never spawn real binaries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaTools: Send + Sync {
    /// Rewrite `input` into `output` with the container index moved to the front.
    /// Must not touch `input`.
    async fn remux(&self, input: &Path, output: &Path) -> Result<(), ToolError>;

    /// Width and height of the primary video stream
    async fn probe(&self, input: &Path) -> Result<Dimensions, ProbeError>;
}
