use super::staging::{scratch_path, ScratchFile, TransformedFile};
use crate::error::{ToolError, UploadError};
use crate::ports::media::MediaTools;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Moves the container index to the front of the file so playback can start early.
pub struct FastStartTransformer<M> {
    tools: Arc<M>,
    dir: Option<PathBuf>,
}

impl<M: MediaTools> FastStartTransformer<M> {
    pub fn new(tools: Arc<M>, dir: Option<PathBuf>) -> Self {
        Self { tools, dir }
    }

    /// Produce a fast-start copy of `input`. `input` is left as it is.
    pub async fn relocate(&self, input: &Path) -> Result<TransformedFile, UploadError> {
        let output =
            scratch_path(self.dir.as_deref(), "marquee-faststart-").map_err(UploadError::Scratch)?;

        self.tools.remux(input, &output).await?;

        // The scratch file exists from allocation, so an empty one means the tool wrote nothing
        let len = match tokio::fs::metadata(&output).await {
            Ok(meta) if meta.len() > 0 => meta.len(),
            _ => {
                return Err(ToolError::MissingOutput {
                    tool: "remux",
                    path: output.to_path_buf(),
                }
                .into())
            }
        };

        tracing::debug!(input = ?input, output = ?output, bytes = len, "relocated moov atom");
        Ok(ScratchFile::new(output, len))
    }
}
