use crate::error::LocatorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Metadata row for one video, owned by the metadata store.
///
/// `video_url` holds the raw `bucket,key` locator once a publish has completed.
/// It is only ever signed on the way out, never stored signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
}

impl VideoRecord {
    pub fn new(user_id: Uuid, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            description,
            video_url: None,
        }
    }
}

/// Where a published object lives: bucket plus random key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocator {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocator {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Parse a composite `bucket,key` string. Anything other than two
    /// non-empty components is rejected.
    pub fn parse(raw: &str) -> Result<Self, LocatorError> {
        let parts: Vec<&str> = raw.split(',').collect();
        match parts.as_slice() {
            [bucket, key] if !bucket.is_empty() && !key.is_empty() => Ok(Self::new(*bucket, *key)),
            _ => Err(LocatorError(raw.to_string())),
        }
    }
}

impl fmt::Display for ObjectLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.bucket, self.key)
    }
}

impl FromStr for ObjectLocator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_display_and_parse_agree() {
        let locator = ObjectLocator::new("videos", "landscape/abc_-123.mp4");
        let raw = locator.to_string();
        assert_eq!(raw, "videos,landscape/abc_-123.mp4");
        assert_eq!(ObjectLocator::parse(&raw), Ok(locator));
    }

    #[test]
    fn test_locator_rejects_wrong_component_count() {
        assert!(ObjectLocator::parse("videos").is_err());
        assert!(ObjectLocator::parse("videos,a,b").is_err());
        assert!(ObjectLocator::parse("").is_err());
    }

    #[test]
    fn test_locator_rejects_empty_components() {
        assert_eq!(
            ObjectLocator::parse(",key.mp4"),
            Err(LocatorError(",key.mp4".into()))
        );
        assert!(ObjectLocator::parse("videos,").is_err());
    }

    #[test]
    fn test_new_record_has_no_locator() {
        let owner = Uuid::new_v4();
        let record = VideoRecord::new(owner, "Boots", None);
        assert_eq!(record.user_id, owner);
        assert!(record.video_url.is_none());
    }
}
