//! Filesystem bucket with HMAC-signed read links.
//!
//! Objects live at `{root}/{bucket}/{key}`, with the content type in a sidecar
//! file next to each object. Signed links point at the `/media` route served by
//! the HTTP adapter, which checks them with [`FsBucket::verify`].

use crate::error::StorageError;
use crate::ports::storage::ObjectStorage;
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

const CONTENT_TYPE_SUFFIX: &str = ".content-type";

/// An object opened for reading.
pub struct LocalObject {
    pub file: tokio::fs::File,
    pub len: u64,
    pub content_type: String,
}

#[derive(Clone)]
pub struct FsBucket {
    root: PathBuf,
    base_url: String,
    secret: Vec<u8>,
}

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl FsBucket {
    pub fn new(root: impl Into<PathBuf>, base_url: &str, secret: &str) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            secret: secret.as_bytes().to_vec(),
        }
    }

    /// Resolve `bucket/key` under the root, refusing anything that could escape it.
    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, StorageError> {
        if bucket.is_empty() || bucket.contains('/') || bucket.starts_with('.') {
            return Err(StorageError::InvalidKey(format!("{}/{}", bucket, key)));
        }
        let rel = Path::new(key);
        let clean = !key.is_empty()
            && !key.ends_with(CONTENT_TYPE_SUFFIX)
            && rel
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !clean {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(bucket).join(rel))
    }

    fn mac(&self, bucket: &str, key: &str, expires: u64) -> Result<HmacSha256, StorageError> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|e| StorageError::Sign(e.to_string()))?;
        mac.update(format!("{}\n{}\n{}", bucket, key, expires).as_bytes());
        Ok(mac)
    }

    /// Check a link's expiry and signature against `now` (unix seconds).
    pub fn verify(
        &self,
        bucket: &str,
        key: &str,
        expires: u64,
        signature: &str,
        now: u64,
    ) -> Result<(), StorageError> {
        self.object_path(bucket, key)?;
        if now > expires {
            return Err(StorageError::Sign("link expired".into()));
        }
        let sig = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| StorageError::Sign("malformed signature".into()))?;
        self.mac(bucket, key, expires)?
            .verify_slice(&sig)
            .map_err(|_| StorageError::Sign("signature mismatch".into()))
    }

    pub async fn open(&self, bucket: &str, key: &str) -> Result<LocalObject, StorageError> {
        let path = self.object_path(bucket, key)?;
        let file = match tokio::fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let len = file.metadata().await?.len();
        let content_type = tokio::fs::read_to_string(sidecar(&path))
            .await
            .unwrap_or_else(|_| String::from("application/octet-stream"));

        Ok(LocalObject {
            file,
            len,
            content_type,
        })
    }

    fn sign_at(&self, bucket: &str, key: &str, expires: u64) -> Result<String, StorageError> {
        self.object_path(bucket, key)?;
        let signature = URL_SAFE_NO_PAD.encode(self.mac(bucket, key, expires)?.finalize().into_bytes());
        Ok(format!(
            "{}/media/{}/{}?expires={}&signature={}",
            self.base_url, bucket, key, expires, signature
        ))
    }
}

fn sidecar(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(CONTENT_TYPE_SUFFIX);
    PathBuf::from(name)
}

#[async_trait]
impl ObjectStorage for FsBucket {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        local_path: &Path,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let dest = self.object_path(bucket, key)?;
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Copy beside the destination, then rename so readers never see a partial object
        let mut partial = dest.as_os_str().to_owned();
        partial.push(".part");
        let partial = PathBuf::from(partial);
        let sidecar_path = sidecar(&dest);

        let written = async {
            tokio::fs::copy(local_path, &partial).await?;
            tokio::fs::write(&sidecar_path, content_type).await?;
            tokio::fs::rename(&partial, &dest).await
        }
        .await;
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&partial).await;
            let _ = tokio::fs::remove_file(&sidecar_path).await;
            return Err(StorageError::Put {
                key: key.to_string(),
                reason: e.to_string(),
            });
        }

        tracing::debug!(path = ?dest, "stored object");
        Ok(())
    }

    async fn signed_url(
        &self,
        bucket: &str,
        key: &str,
        ttl: Duration,
    ) -> Result<String, StorageError> {
        self.sign_at(bucket, key, unix_now() + ttl.as_secs())
    }
}
