use crate::domain::{Classification, ObjectLocator};
use crate::error::StorageError;
use crate::ports::storage::ObjectStorage;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::path::Path;
use std::sync::Arc;

/// Random bytes per object key (256 bits).
pub const KEY_BYTES: usize = 32;

/// Random URL-safe object name, unrelated to the video id.
pub fn generate_key() -> String {
    let bytes: [u8; KEY_BYTES] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "video/mp4" => "mp4",
        _ => "bin",
    }
}

pub struct ObjectPublisher<S> {
    storage: Arc<S>,
    bucket: String,
}

impl<S: ObjectStorage> ObjectPublisher<S> {
    pub fn new(storage: Arc<S>, bucket: impl Into<String>) -> Self {
        Self {
            storage,
            bucket: bucket.into(),
        }
    }

    /// Upload under `{classification}/{random key}.{ext}`. No retry.
    pub async fn publish(
        &self,
        path: &Path,
        classification: Classification,
        content_type: &str,
    ) -> Result<ObjectLocator, StorageError> {
        let key = format!(
            "{}/{}.{}",
            classification,
            generate_key(),
            extension_for(content_type)
        );

        self.storage
            .put(&self.bucket, &key, path, content_type)
            .await?;

        tracing::info!(bucket = %self.bucket, key = %key, "published object");
        Ok(ObjectLocator::new(self.bucket.clone(), key))
    }
}
