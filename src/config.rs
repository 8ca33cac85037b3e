//! Configuration for different deployment environments.
//!
//! Only the binaries read the environment; the pipeline itself receives an
//! explicit [`UploadConfig`] at construction time.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// 1 GiB
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 1 << 30;
/// 100 hours
pub const DEFAULT_LINK_TTL: Duration = Duration::from_secs(100 * 60 * 60);
pub const DEFAULT_BUCKET: &str = "videos";

/// Settings the upload pipeline needs.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    /// Bucket every published object lands in
    pub bucket: String,
    /// Hard ceiling on the request body, in bytes
    pub max_upload_bytes: u64,
    /// Lifetime of signed playback links
    pub link_ttl: Duration,
    /// Where staged and remuxed scratch files go; system temp dir when `None`
    pub staging_dir: Option<PathBuf>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            link_ttl: DEFAULT_LINK_TTL,
            staging_dir: None,
        }
    }
}

impl UploadConfig {
    /// Load pipeline settings from environment variables, with `bucket` as the
    /// fallback bucket name.
    pub fn from_env(bucket: String) -> Self {
        Self {
            bucket,
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            link_ttl: env::var("LINK_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_LINK_TTL),
            staging_dir: env::var("STAGING_DIR").ok().map(PathBuf::from),
        }
    }
}

/// Configuration for local/monolith deployment.
#[cfg(feature = "local")]
#[derive(Clone, Debug)]
pub struct LocalConfig {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    /// HS256 secret used to validate bearer tokens
    pub jwt_secret: String,
    /// Root directory of the filesystem bucket
    pub asset_root: PathBuf,
    /// Public base URL that signed links point at
    pub public_base_url: String,
    /// HMAC key for signed links
    pub signing_secret: String,
    /// Optional user id to print a development token for
    pub dev_user_id: Option<uuid::Uuid>,
    pub upload: UploadConfig,
}

#[cfg(feature = "local")]
impl LocalConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let addr = env::var("ADDR").unwrap_or_else(|_| String::from("127.0.0.1"));
        let port = env::var("PORT").unwrap_or_else(|_| String::from("8091"));
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://{}:{}", addr, port));

        Self {
            public_base_url,
            addr,
            port,
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| String::from("dev-secret")),
            asset_root: PathBuf::from(
                env::var("ASSET_ROOT").unwrap_or_else(|_| String::from("./assets")),
            ),
            signing_secret: env::var("SIGNING_SECRET")
                .unwrap_or_else(|_| String::from("dev-signing-secret")),
            dev_user_id: env::var("DEV_USER_ID")
                .ok()
                .and_then(|v| uuid::Uuid::parse_str(&v).ok()),
            upload: UploadConfig::from_env(
                env::var("VIDEO_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string()),
            ),
        }
    }
}

/// Configuration for AWS deployment.
#[cfg(feature = "aws")]
#[derive(Clone, Debug)]
pub struct AwsConfig {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    /// HS256 secret used to validate bearer tokens
    pub jwt_secret: String,
    /// DynamoDB table holding video records
    pub dynamodb_table: String,
    pub upload: UploadConfig,
}

#[cfg(feature = "aws")]
impl AwsConfig {
    /// Load configuration from environment variables.
    /// Panics if required variables are not set.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            addr: env::var("ADDR").unwrap_or_else(|_| String::from("0.0.0.0")),
            port: env::var("PORT").unwrap_or_else(|_| String::from("8091")),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET env var required"),
            dynamodb_table: env::var("DYNAMODB_TABLE").expect("DYNAMODB_TABLE env var required"),
            upload: UploadConfig::from_env(
                env::var("S3_BUCKET").expect("S3_BUCKET env var required"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UploadConfig::default();
        assert_eq!(config.bucket, "videos");
        assert_eq!(config.max_upload_bytes, 1_073_741_824);
        assert_eq!(config.link_ttl, Duration::from_secs(360_000));
        assert!(config.staging_dir.is_none());
    }
}
