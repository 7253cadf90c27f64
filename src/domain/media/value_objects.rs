use serde::{Deserialize, Serialize};

// ============================================================================
// Media Value Objects
// ============================================================================

string_id!(
    /// Id of a downloadable video (platform media id)
    VideoId
);

string_id!(PlaylistId);

/// Requested rendition of a video download
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoQuality {
    Low,
    Medium,
    High,
    #[default]
    Highest,
}

/// What the page told us about the video when the download was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub source_url: String,
    pub author: Option<String>,
    pub duration_seconds: Option<u32>,
    pub thumbnail_url: Option<String>,
}

impl VideoMetadata {
    pub fn new(title: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source_url: source_url.into(),
            author: None,
            duration_seconds: None,
            thumbnail_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_default_and_serialization() {
        assert_eq!(VideoQuality::default(), VideoQuality::Highest);
        assert_eq!(serde_json::to_string(&VideoQuality::Medium).unwrap(), "\"medium\"");
    }

    #[test]
    fn test_metadata_builder_defaults() {
        let meta = VideoMetadata::new("Launch demo", "https://video.example/v/1");
        assert_eq!(meta.title, "Launch demo");
        assert!(meta.author.is_none());
        assert!(meta.duration_seconds.is_none());
    }
}
