//! Application layer - Pipeline stages and the orchestrator that runs them.

pub mod classify;
pub mod link;
pub mod orchestrator;
pub mod publish;
pub mod staging;
pub mod transform;
pub mod validate;
