use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::domain::actor::ActorId;
use crate::event_sourcing::core::DomainEvent;
use super::value_objects::{ContentId, ContentProps, ThreadId};

// ============================================================================
// Content Events - Domain Events for ContentItem Aggregate
// ============================================================================

/// Union type for all content item events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ContentEvent {
    Saved(ContentSaved),
    Liked(ContentLiked),
    Retweeted(ContentRetweeted),
}

impl DomainEvent for ContentEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ContentEvent::Saved(_) => "tweet.saved",
            ContentEvent::Liked(_) => "tweet.liked",
            ContentEvent::Retweeted(_) => "tweet.retweeted",
        }
    }

    fn occurred_on(&self) -> DateTime<Utc> {
        match self {
            ContentEvent::Saved(e) => e.saved_at,
            ContentEvent::Liked(e) => e.liked_at,
            ContentEvent::Retweeted(e) => e.retweeted_at,
        }
    }

    fn aggregate_key(&self) -> String {
        self.content_id().to_string()
    }
}

impl ContentEvent {
    pub fn content_id(&self) -> &ContentId {
        match self {
            ContentEvent::Saved(e) => &e.content_id,
            ContentEvent::Liked(e) => &e.content_id,
            ContentEvent::Retweeted(e) => &e.content_id,
        }
    }
}

// ============================================================================
// Individual Event Types
// ============================================================================

/// Tweet Saved - first event of every content stream, carries the full props
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSaved {
    pub content_id: ContentId,
    pub author_id: ActorId,
    pub props: ContentProps,
    pub thread_id: Option<ThreadId>,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentLiked {
    pub content_id: ContentId,
    pub author_id: ActorId,
    pub liked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRetweeted {
    pub content_id: ContentId,
    pub author_id: ActorId,
    pub retweeted_at: DateTime<Utc>,
}
