//! Marquee - Fast-start video upload and publish service
//!
//! Hexagonal Architecture:
//! - domain/: Pure business types (video records, locators, classification)
//! - ports/: Trait definitions (metadata store, object storage, media tools, auth)
//! - adapters/: Concrete implementations (ffmpeg, JWT, local, AWS, HTTP)
//! - application/: The upload pipeline (stage, transform, classify, publish, link)
//! - config: Environment configuration
//!
//! # Features
//! - `local`: Local/monolith deployment (in-memory metadata, filesystem bucket)
//! - `aws`: S3 bucket with presigned playback links, DynamoDB metadata store
//! - `full`: All features

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use application::orchestrator::{IncomingVideo, UploadOrchestrator};
pub use config::UploadConfig;
pub use domain::{Classification, ObjectLocator, VideoRecord};
pub use error::{ClientError, UploadError};

#[cfg(feature = "local")]
pub use config::LocalConfig;

#[cfg(feature = "aws")]
pub use config::AwsConfig;
