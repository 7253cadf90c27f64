use super::value_objects::ContentId;

// ============================================================================
// Content Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ContentError {
    #[error("Tweet {0} is already liked")]
    AlreadyLiked(ContentId),

    #[error("Tweet {0} is already retweeted")]
    AlreadyRetweeted(ContentId),

    #[error("Content stream must start with a saved event")]
    NotInitialized,

    #[error("Event for tweet {found} applied to tweet {expected}")]
    AggregateMismatch { expected: ContentId, found: ContentId },
}

impl ContentError {
    /// True for the local duplicate-action guards (like/retweet twice)
    pub fn is_duplicate_action(&self) -> bool {
        matches!(self, Self::AlreadyLiked(_) | Self::AlreadyRetweeted(_))
    }
}
