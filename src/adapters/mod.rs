//! Adapters - Concrete implementations of ports.

pub mod ffmpeg;
pub mod http;
pub mod jwt;

#[cfg(feature = "aws")]
pub mod aws;

#[cfg(feature = "local")]
pub mod local;
