use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::event_sourcing::core::DomainEvent;
use super::value_objects::{PlaylistId, VideoId, VideoMetadata, VideoQuality};

// ============================================================================
// Media Download Events
// ============================================================================
//
// Pure event data produced by an external download orchestrator. There is no
// aggregate: requests and completions correlate by video id, playlist syncs
// by playlist id. No in-progress or failed event exists at this layer.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum MediaEvent {
    DownloadRequested(VideoDownloadRequested),
    DownloadCompleted(VideoDownloadCompleted),
    PlaylistSynced(PlaylistSynced),
}

impl DomainEvent for MediaEvent {
    fn event_type(&self) -> &'static str {
        match self {
            MediaEvent::DownloadRequested(_) => "video.download_requested",
            MediaEvent::DownloadCompleted(_) => "video.download_completed",
            MediaEvent::PlaylistSynced(_) => "playlist.synced",
        }
    }

    fn occurred_on(&self) -> DateTime<Utc> {
        match self {
            MediaEvent::DownloadRequested(e) => e.occurred_on,
            MediaEvent::DownloadCompleted(e) => e.occurred_on,
            MediaEvent::PlaylistSynced(e) => e.occurred_on,
        }
    }

    fn aggregate_key(&self) -> String {
        match self {
            MediaEvent::DownloadRequested(e) => e.video_id.to_string(),
            MediaEvent::DownloadCompleted(e) => e.video_id.to_string(),
            MediaEvent::PlaylistSynced(e) => e.playlist_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDownloadRequested {
    pub video_id: VideoId,
    pub metadata: VideoMetadata,
    pub quality: VideoQuality,
    pub occurred_on: DateTime<Utc>,
}

impl VideoDownloadRequested {
    pub fn new(video_id: VideoId, metadata: VideoMetadata, quality: VideoQuality) -> Self {
        Self {
            video_id,
            metadata,
            quality,
            occurred_on: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDownloadCompleted {
    pub video_id: VideoId,
    pub download_url: String,
    pub occurred_on: DateTime<Utc>,
}

impl VideoDownloadCompleted {
    pub fn new(video_id: VideoId, download_url: impl Into<String>) -> Self {
        Self {
            video_id,
            download_url: download_url.into(),
            occurred_on: Utc::now(),
        }
    }
}

/// A playlist's member list was refreshed. Nothing checks these ids against
/// individual download events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSynced {
    pub playlist_id: PlaylistId,
    pub video_ids: Vec<VideoId>,
    pub occurred_on: DateTime<Utc>,
}

impl PlaylistSynced {
    pub fn new(playlist_id: PlaylistId, video_ids: Vec<VideoId>) -> Self {
        Self {
            playlist_id,
            video_ids,
            occurred_on: Utc::now(),
        }
    }
}

impl From<VideoDownloadRequested> for MediaEvent {
    fn from(e: VideoDownloadRequested) -> Self {
        MediaEvent::DownloadRequested(e)
    }
}

impl From<VideoDownloadCompleted> for MediaEvent {
    fn from(e: VideoDownloadCompleted) -> Self {
        MediaEvent::DownloadCompleted(e)
    }
}

impl From<PlaylistSynced> for MediaEvent {
    fn from(e: PlaylistSynced) -> Self {
        MediaEvent::PlaylistSynced(e)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
