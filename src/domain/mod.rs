//! Domain layer - Pure business types.

pub mod classification;
pub mod video;

pub use classification::{Classification, Dimensions};
pub use video::{ObjectLocator, VideoRecord};
