//! Local adapters for monolith deployment.

pub mod fs;
pub mod memory;

pub use fs::FsBucket;
pub use memory::MemoryVideoStore;
