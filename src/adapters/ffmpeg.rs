use crate::domain::Dimensions;
use crate::error::{ProbeError, ToolError};
use crate::ports::media::MediaTools;
use async_trait::async_trait;
use ffmpeg_next as ffmpeg;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Remuxes with the `ffmpeg` binary and probes with libavformat.
#[derive(Clone, Debug)]
pub struct FfmpegTools {
    binary: PathBuf,
}

impl Default for FfmpegTools {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegTools {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl MediaTools for FfmpegTools {
    async fn remux(&self, input: &Path, output: &Path) -> Result<(), ToolError> {
        // Stream copy only; the moov atom is rewritten ahead of mdat
        let result = Command::new(&self.binary)
            .arg("-y")
            .arg("-v")
            .arg("error")
            .arg("-i")
            .arg(input)
            .arg("-c")
            .arg("copy")
            .arg("-movflags")
            .arg("faststart")
            .arg("-f")
            .arg("mp4")
            .arg(output)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ToolError::Spawn {
                tool: "ffmpeg",
                source,
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            tracing::warn!(status = %result.status, stderr = %stderr, "ffmpeg remux failed");
            return Err(ToolError::Failed {
                tool: "ffmpeg",
                status: result.status.to_string(),
                stderr,
            });
        }
        Ok(())
    }

    async fn probe(&self, input: &Path) -> Result<Dimensions, ProbeError> {
        let input = input.to_path_buf();

        tokio::task::spawn_blocking(move || -> Result<Dimensions, ProbeError> {
            ffmpeg::init().map_err(|e| ProbeError::Unreadable(e.to_string()))?;

            let ictx =
                ffmpeg::format::input(&input).map_err(|e| ProbeError::Unreadable(e.to_string()))?;
            let stream = ictx
                .streams()
                .best(ffmpeg::media::Type::Video)
                .ok_or(ProbeError::NoVideoStream)?;

            let context = ffmpeg::codec::context::Context::from_parameters(stream.parameters())
                .map_err(|e| ProbeError::Unreadable(e.to_string()))?;
            let decoder = context
                .decoder()
                .video()
                .map_err(|e| ProbeError::Unreadable(e.to_string()))?;

            Ok(Dimensions {
                width: decoder.width(),
                height: decoder.height(),
            })
        })
        .await
        .map_err(|e| ProbeError::Unreadable(e.to_string()))?
    }
}
