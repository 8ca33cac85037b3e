use crate::error::ProbeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width / height at or above this is landscape (16:9 is ~1.78).
pub const LANDSCAPE_MIN_RATIO: f64 = 1.7;
/// Width / height at or below this is portrait (9:16 is ~0.56).
pub const PORTRAIT_MAX_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Coarse aspect-ratio bucket, used as the storage path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Landscape,
    Portrait,
    Square,
}

impl Classification {
    pub fn from_dimensions(dims: Dimensions) -> Result<Self, ProbeError> {
        if dims.width == 0 || dims.height == 0 {
            return Err(ProbeError::InvalidDimensions {
                width: dims.width,
                height: dims.height,
            });
        }

        let ratio = dims.width as f64 / dims.height as f64;
        Ok(if ratio >= LANDSCAPE_MIN_RATIO {
            Classification::Landscape
        } else if ratio <= PORTRAIT_MAX_RATIO {
            Classification::Portrait
        } else {
            Classification::Square
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Landscape => "landscape",
            Classification::Portrait => "portrait",
            Classification::Square => "square",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(width: u32, height: u32) -> Result<Classification, ProbeError> {
        Classification::from_dimensions(Dimensions { width, height })
    }

    #[test]
    fn test_reference_resolutions() {
        assert_eq!(classify(1920, 1080), Ok(Classification::Landscape));
        assert_eq!(classify(1080, 1920), Ok(Classification::Portrait));
        assert_eq!(classify(1000, 1000), Ok(Classification::Square));
    }

    #[test]
    fn test_tolerates_inexact_widescreen() {
        // 854x480 and 480x854 are the usual off-by-a-pixel 16:9 / 9:16 encodes
        assert_eq!(classify(854, 480), Ok(Classification::Landscape));
        assert_eq!(classify(480, 854), Ok(Classification::Portrait));
        assert_eq!(classify(1280, 720), Ok(Classification::Landscape));
    }

    #[test]
    fn test_in_between_ratios_are_square() {
        assert_eq!(classify(640, 480), Ok(Classification::Square));
        assert_eq!(classify(480, 640), Ok(Classification::Square));
    }

    #[test]
    fn test_zero_dimensions_fail_instead_of_defaulting() {
        assert_eq!(
            classify(1920, 0),
            Err(ProbeError::InvalidDimensions {
                width: 1920,
                height: 0
            })
        );
        assert!(classify(0, 1080).is_err());
    }

    #[test]
    fn test_prefix_strings() {
        assert_eq!(Classification::Landscape.to_string(), "landscape");
        assert_eq!(Classification::Portrait.as_str(), "portrait");
        assert_eq!(Classification::Square.as_str(), "square");
    }
}
