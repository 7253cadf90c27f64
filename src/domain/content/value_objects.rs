use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

// ============================================================================
// Content Value Objects
// ============================================================================

string_id!(
    /// Platform status id of a tweet
    ContentId
);

string_id!(
    /// Conversation thread a tweet has been grouped into locally
    ThreadId
);

/// Everything scraped about a tweet at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentProps {
    pub content: String,
    pub media_urls: Vec<String>,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
    pub retweet_count: u64,
    pub like_count: u64,
    pub reply_count: u64,
    pub quote_count: u64,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    pub is_retweet: bool,
    pub original_content_id: Option<ContentId>,
    pub in_reply_to_id: Option<ContentId>,
    pub is_quote_tweet: bool,
    pub quoted_content_id: Option<ContentId>,
    pub language: Option<String>,
    pub source: Option<String>,
}

impl ContentProps {
    /// Plain text tweet with zeroed counters, created now.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            media_urls: Vec::new(),
            hashtags: Vec::new(),
            mentions: Vec::new(),
            retweet_count: 0,
            like_count: 0,
            reply_count: 0,
            quote_count: 0,
            view_count: 0,
            created_at: Utc::now(),
            is_retweet: false,
            original_content_id: None,
            in_reply_to_id: None,
            is_quote_tweet: false,
            quoted_content_id: None,
            language: None,
            source: None,
        }
    }
}
