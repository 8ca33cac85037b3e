//! AWS adapters.

pub mod dynamodb;
pub mod s3;

pub use dynamodb::DynamoVideoStore;
pub use s3::S3Bucket;
