use crate::domain::Classification;
use crate::error::ProbeError;
use crate::ports::media::MediaTools;
use std::path::Path;
use std::sync::Arc;

pub struct MediaClassifier<M> {
    tools: Arc<M>,
}

impl<M: MediaTools> MediaClassifier<M> {
    pub fn new(tools: Arc<M>) -> Self {
        Self { tools }
    }

    /// Probe the file and bucket it by aspect ratio. Never falls back to a default class.
    pub async fn classify(&self, path: &Path) -> Result<Classification, ProbeError> {
        let dims = self.tools.probe(path).await?;
        let class = Classification::from_dimensions(dims)?;
        tracing::debug!(width = dims.width, height = dims.height, class = %class, "classified");
        Ok(class)
    }
}
