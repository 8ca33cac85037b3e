//! Hand-written fakes shared by the unit tests.

use crate::domain::{Dimensions, VideoRecord};
use crate::error::{ProbeError, RepositoryError, StorageError, ToolError};
use crate::ports::{MediaTools, ObjectStorage, VideoRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, ReadBuf};
use uuid::Uuid;

/// Number of entries in a directory.
pub fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

#[derive(Clone, Debug)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Object storage that keeps every put in memory.
#[derive(Clone, Default)]
pub struct RecordingBucket {
    puts: Arc<Mutex<Vec<StoredObject>>>,
    fail_puts: bool,
}

impl RecordingBucket {
    pub fn failing() -> Self {
        Self {
            fail_puts: true,
            ..Self::default()
        }
    }

    pub fn puts(&self) -> Vec<StoredObject> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for RecordingBucket {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        local_path: &Path,
        content_type: &str,
    ) -> Result<(), StorageError> {
        if self.fail_puts {
            return Err(StorageError::Put {
                key: key.to_string(),
                reason: "bucket unreachable".into(),
            });
        }
        let bytes = tokio::fs::read(local_path).await?;
        self.puts.lock().unwrap().push(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            content_type: content_type.to_string(),
            bytes,
        });
        Ok(())
    }

    async fn signed_url(
        &self,
        bucket: &str,
        key: &str,
        ttl: Duration,
    ) -> Result<String, StorageError> {
        Ok(format!(
            "https://signed.test/{}/{}?ttl={}",
            bucket,
            key,
            ttl.as_secs()
        ))
    }
}

/// Metadata store over a shared map, counting updates.
#[derive(Clone, Default)]
pub struct FakeRepo {
    videos: Arc<Mutex<HashMap<Uuid, VideoRecord>>>,
    updates: Arc<AtomicUsize>,
}

impl FakeRepo {
    pub fn seed(&self, record: VideoRecord) -> VideoRecord {
        self.videos
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        record
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoRepository for FakeRepo {
    async fn create(&self, record: &VideoRecord) -> Result<(), RepositoryError> {
        self.seed(record.clone());
        Ok(())
    }

    async fn get(&self, video_id: Uuid) -> Result<Option<VideoRecord>, RepositoryError> {
        Ok(self.videos.lock().unwrap().get(&video_id).cloned())
    }

    async fn update(&self, record: &VideoRecord) -> Result<(), RepositoryError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.videos
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Remux {
    /// Copy input to output unchanged
    Copy,
    /// Exit non-zero
    Fail,
    /// Report success but write nothing
    NoOutput,
}

/// Media tools with scripted outcomes.
#[derive(Clone)]
pub struct ScriptedTools {
    remux: Remux,
    probe: Result<Dimensions, ProbeError>,
    pub remux_calls: Arc<AtomicUsize>,
    pub probe_calls: Arc<AtomicUsize>,
    remux_inputs: Arc<Mutex<Vec<PathBuf>>>,
}

impl ScriptedTools {
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            remux: Remux::Copy,
            probe: Ok(Dimensions { width, height }),
            remux_calls: Arc::default(),
            probe_calls: Arc::default(),
            remux_inputs: Arc::default(),
        }
    }

    pub fn landscape() -> Self {
        Self::with_dimensions(1920, 1080)
    }

    pub fn with_remux(mut self, remux: Remux) -> Self {
        self.remux = remux;
        self
    }

    pub fn with_probe(mut self, probe: Result<Dimensions, ProbeError>) -> Self {
        self.probe = probe;
        self
    }

    pub fn remux_inputs(&self) -> Vec<PathBuf> {
        self.remux_inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaTools for ScriptedTools {
    async fn remux(&self, input: &Path, output: &Path) -> Result<(), ToolError> {
        self.remux_calls.fetch_add(1, Ordering::SeqCst);
        self.remux_inputs.lock().unwrap().push(input.to_path_buf());
        match self.remux {
            Remux::Copy => {
                tokio::fs::copy(input, output)
                    .await
                    .map_err(|source| ToolError::Spawn {
                        tool: "scripted",
                        source,
                    })?;
                Ok(())
            }
            Remux::Fail => Err(ToolError::Failed {
                tool: "scripted",
                status: "exit status: 1".into(),
                stderr: "moov atom not found".into(),
            }),
            Remux::NoOutput => Ok(()),
        }
    }

    async fn probe(&self, _input: &Path) -> Result<Dimensions, ProbeError> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        self.probe.clone()
    }
}

/// Reader that records whether anyone polled it.
pub struct TrackingReader {
    inner: &'static [u8],
    touched: Arc<AtomicBool>,
}

impl TrackingReader {
    pub fn new(inner: &'static [u8]) -> Self {
        Self {
            inner,
            touched: Arc::default(),
        }
    }

    pub fn touched(&self) -> Arc<AtomicBool> {
        self.touched.clone()
    }
}

impl AsyncRead for TrackingReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        self.touched.store(true, Ordering::SeqCst);
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}
