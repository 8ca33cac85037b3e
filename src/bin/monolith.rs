//! Monolith Binary - Local deployment
//!
//! Wires the upload pipeline to local adapters:
//! - In-memory metadata store
//! - Filesystem bucket with HMAC-signed links served from `/media`
//! - `ffmpeg` for the fast-start remux
//!
//! Set `DEV_USER_ID` to print a bearer token for that user at startup.

use marquee::adapters::ffmpeg::FfmpegTools;
use marquee::adapters::http::{self, media::media_router, AppState};
use marquee::adapters::jwt::{issue_token, JwtVerifier};
use marquee::adapters::local::{FsBucket, MemoryVideoStore};
use marquee::{LocalConfig, UploadOrchestrator};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = LocalConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // 1. Adapters (Local implementations)
    let repo = MemoryVideoStore::new();
    let bucket = FsBucket::new(
        &config.asset_root,
        &config.public_base_url,
        &config.signing_secret,
    );
    let tools = FfmpegTools::default();

    // 2. Application
    let orchestrator =
        UploadOrchestrator::new(config.upload.clone(), repo, bucket.clone(), tools);
    let state = AppState::new(orchestrator, Arc::new(JwtVerifier::new(&config.jwt_secret)));

    if let Some(user_id) = config.dev_user_id {
        match issue_token(&config.jwt_secret, user_id, Duration::from_secs(24 * 60 * 60)) {
            Ok(token) => tracing::info!(user_id = %user_id, token = %token, "development token"),
            Err(e) => tracing::warn!(error = %e, "could not issue development token"),
        }
    }

    // 3. HTTP Layer
    let app = http::router(state).merge(media_router(bucket));

    // 4. Start Server
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.addr, config.port))
        .await
        .expect("Failed to bind TCP listener");
    tracing::info!(
        addr = %config.addr,
        port = %config.port,
        bucket = %config.upload.bucket,
        "listening"
    );
    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
