use crate::error::ClientError;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    /// Validate a bearer credential and return the caller's user id
    fn verify(&self, token: &str) -> Result<Uuid, ClientError>;
}
