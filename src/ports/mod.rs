//! Ports - Trait definitions for everything outside the pipeline.

pub mod auth;
pub mod media;
pub mod repository;
pub mod storage;

pub use auth::TokenVerifier;
pub use media::MediaTools;
pub use repository::VideoRepository;
pub use storage::ObjectStorage;
