use super::validate::BodyLimitExceeded;
use crate::error::{ClientError, UploadError};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempPath};
use tokio::io::{AsyncRead, AsyncWriteExt, BufWriter};

/// A request-scoped file on local disk. The file is removed when this is dropped.
#[derive(Debug)]
pub struct ScratchFile {
    path: TempPath,
    len: u64,
}

impl ScratchFile {
    pub(crate) fn new(path: TempPath, len: u64) -> Self {
        Self { path, len }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// The raw upload as received.
pub type StagedFile = ScratchFile;
/// The fast-start rewrite of a staged upload.
pub type TransformedFile = ScratchFile;

/// Allocate a uniquely named, drop-guarded path under `dir` (or the system temp dir).
pub(crate) fn scratch_path(dir: Option<&Path>, prefix: &str) -> io::Result<TempPath> {
    let mut builder = Builder::new();
    builder.prefix(prefix).suffix(".mp4");
    let file = match dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };
    Ok(file.into_temp_path())
}

#[derive(Clone, Debug, Default)]
pub struct StagingStore {
    dir: Option<PathBuf>,
}

impl StagingStore {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Copy the whole stream into a fresh temp file.
    ///
    /// A byte-ceiling breach from the reader surfaces as `ClientError::TooLarge`;
    /// any other fault is a scratch error. The partial file is removed either way.
    pub async fn stage<R>(&self, reader: &mut R) -> Result<StagedFile, UploadError>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let path = scratch_path(self.dir(), "marquee-upload-").map_err(UploadError::Scratch)?;

        let file = tokio::fs::File::create(&path)
            .await
            .map_err(UploadError::Scratch)?;
        let mut writer = BufWriter::new(file);

        let written = match tokio::io::copy(reader, &mut writer).await {
            Ok(n) => n,
            Err(err) => {
                return Err(match BodyLimitExceeded::from_io(&err) {
                    Some(exceeded) => ClientError::TooLarge {
                        limit: exceeded.limit,
                    }
                    .into(),
                    None => UploadError::Scratch(err),
                })
            }
        };
        writer.flush().await.map_err(UploadError::Scratch)?;

        tracing::debug!(path = ?path, bytes = written, "staged upload");
        Ok(ScratchFile::new(path, written))
    }
}
