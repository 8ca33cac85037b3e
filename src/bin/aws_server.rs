//! AWS Server Binary
//!
//! Runs the upload API against S3 for objects and DynamoDB for video records.
//!
//! Environment Variables:
//! - AWS_REGION: AWS region
//! - S3_BUCKET: S3 bucket for published videos
//! - DYNAMODB_TABLE: DynamoDB table for video records
//! - JWT_SECRET: HS256 secret for bearer tokens

use marquee::adapters::aws::{DynamoVideoStore, S3Bucket};
use marquee::adapters::ffmpeg::FfmpegTools;
use marquee::adapters::http::{self, AppState};
use marquee::adapters::jwt::JwtVerifier;
use marquee::{AwsConfig, UploadOrchestrator};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AwsConfig::from_env();

    // Load AWS config
    let aws = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

    // Create adapters
    let storage = S3Bucket::new(aws_sdk_s3::Client::new(&aws));
    let repo = DynamoVideoStore::new(
        aws_sdk_dynamodb::Client::new(&aws),
        config.dynamodb_table.clone(),
    );

    let orchestrator =
        UploadOrchestrator::new(config.upload.clone(), repo, storage, FfmpegTools::default());
    let state = AppState::new(orchestrator, Arc::new(JwtVerifier::new(&config.jwt_secret)));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.addr, config.port))
        .await
        .expect("Failed to bind TCP listener");
    tracing::info!(
        addr = %config.addr,
        port = %config.port,
        bucket = %config.upload.bucket,
        table = %config.dynamodb_table,
        "listening"
    );
    axum::serve(listener, http::router(state))
        .await
        .expect("Server failed to start");
}
