use chrono::{DateTime, Utc};

use crate::domain::actor::ActorId;
use crate::event_sourcing::core::{AggregateRoot, EventBuffer};
use super::value_objects::{ContentId, ContentProps, ThreadId};
use super::events::*;
use super::errors::ContentError;

// ============================================================================
// ContentItem Aggregate - a saved tweet
// ============================================================================
//
// like()/retweet() are optimistic local updates: they bump the counter by one
// and record the fact. update_engagement() is the authoritative reconciliation
// path and overwrites all counters without recording anything.
//
// Event policy:
//   create            -> tweet.saved
//   like / retweet    -> tweet.liked / tweet.retweeted
//   everything else   -> no event
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct ContentItem {
    id: ContentId,
    version: u64,
    author_id: ActorId,
    props: ContentProps,
    thread_id: Option<ThreadId>,
    saved_at: DateTime<Utc>,
    liked_at: Option<DateTime<Utc>>,
    retweeted_at: Option<DateTime<Utc>>,
    events: EventBuffer<ContentEvent>,
}

impl ContentItem {
    /// Save a tweet. The returned item already holds one uncommitted
    /// `tweet.saved` event.
    pub fn create(
        id: ContentId,
        author_id: ActorId,
        props: ContentProps,
        thread_id: Option<ThreadId>,
    ) -> Self {
        let saved = ContentSaved {
            content_id: id,
            author_id,
            props,
            thread_id,
            saved_at: Utc::now(),
        };

        let mut item = Self::from_saved(&saved);
        tracing::debug!(content_id = %item.id, "Tweet saved");
        item.events.push(ContentEvent::Saved(saved));
        item
    }

    /// Rebuild a tweet from its full event stream.
    pub fn from_history(events: &[ContentEvent]) -> Result<Self, ContentError> {
        let (first, rest) = events.split_first().ok_or(ContentError::NotInitialized)?;

        let mut item = match first {
            ContentEvent::Saved(e) => Self::from_saved(e),
            _ => return Err(ContentError::NotInitialized),
        };

        for event in rest {
            item.apply_event(event)?;
        }

        Ok(item)
    }

    fn from_saved(e: &ContentSaved) -> Self {
        Self {
            id: e.content_id.clone(),
            version: 1,
            author_id: e.author_id.clone(),
            props: e.props.clone(),
            thread_id: e.thread_id.clone(),
            saved_at: e.saved_at,
            liked_at: None,
            retweeted_at: None,
            events: EventBuffer::new(),
        }
    }

    // =========================================================================
    // Local interactions
    // =========================================================================

    pub fn like(&mut self) -> Result<(), ContentError> {
        if self.is_liked() {
            tracing::warn!(content_id = %self.id, "Rejected like: already liked");
            return Err(ContentError::AlreadyLiked(self.id.clone()));
        }

        self.record(ContentEvent::Liked(ContentLiked {
            content_id: self.id.clone(),
            author_id: self.author_id.clone(),
            liked_at: Utc::now(),
        }))
    }

    pub fn retweet(&mut self) -> Result<(), ContentError> {
        if self.is_retweeted() {
            tracing::warn!(content_id = %self.id, "Rejected retweet: already retweeted");
            return Err(ContentError::AlreadyRetweeted(self.id.clone()));
        }

        self.record(ContentEvent::Retweeted(ContentRetweeted {
            content_id: self.id.clone(),
            author_id: self.author_id.clone(),
            retweeted_at: Utc::now(),
        }))
    }

    // =========================================================================
    // Passive syncs and annotations (no events)
    // =========================================================================

    /// Overwrite all counters with a fresh server read.
    pub fn update_engagement(
        &mut self,
        retweets: u64,
        likes: u64,
        replies: u64,
        quotes: u64,
        views: u64,
    ) {
        self.props.retweet_count = retweets;
        self.props.like_count = likes;
        self.props.reply_count = replies;
        self.props.quote_count = quotes;
        self.props.view_count = views;
    }

    pub fn add_hashtag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.props.hashtags.contains(&tag) {
            self.props.hashtags.push(tag);
        }
    }

    pub fn add_mention(&mut self, username: impl Into<String>) {
        let username = username.into();
        if !self.props.mentions.contains(&username) {
            self.props.mentions.push(username);
        }
    }

    pub fn add_to_thread(&mut self, thread_id: ThreadId) {
        self.thread_id = Some(thread_id);
    }

    pub fn remove_from_thread(&mut self) {
        self.thread_id = None;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn id(&self) -> &ContentId {
        &self.id
    }

    pub fn author_id(&self) -> &ActorId {
        &self.author_id
    }

    pub fn props(&self) -> &ContentProps {
        &self.props
    }

    pub fn content(&self) -> &str {
        &self.props.content
    }

    pub fn hashtags(&self) -> &[String] {
        &self.props.hashtags
    }

    pub fn mentions(&self) -> &[String] {
        &self.props.mentions
    }

    pub fn thread_id(&self) -> Option<&ThreadId> {
        self.thread_id.as_ref()
    }

    pub fn saved_at(&self) -> DateTime<Utc> {
        self.saved_at
    }

    pub fn liked_at(&self) -> Option<DateTime<Utc>> {
        self.liked_at
    }

    pub fn retweeted_at(&self) -> Option<DateTime<Utc>> {
        self.retweeted_at
    }

    pub fn like_count(&self) -> u64 {
        self.props.like_count
    }

    pub fn retweet_count(&self) -> u64 {
        self.props.retweet_count
    }

    pub fn reply_count(&self) -> u64 {
        self.props.reply_count
    }

    pub fn quote_count(&self) -> u64 {
        self.props.quote_count
    }

    pub fn view_count(&self) -> u64 {
        self.props.view_count
    }

    /// Retweets + likes + replies + quotes, saturating at `u64::MAX`
    pub fn total_engagement(&self) -> u64 {
        self.props
            .retweet_count
            .saturating_add(self.props.like_count)
            .saturating_add(self.props.reply_count)
            .saturating_add(self.props.quote_count)
    }

    pub fn is_liked(&self) -> bool {
        self.liked_at.is_some()
    }

    pub fn is_retweeted(&self) -> bool {
        self.retweeted_at.is_some()
    }

    pub fn is_reply(&self) -> bool {
        self.props.in_reply_to_id.is_some()
    }

    pub fn is_quote_tweet(&self) -> bool {
        self.props.quoted_content_id.is_some()
    }

    pub fn has_media(&self) -> bool {
        !self.props.media_urls.is_empty()
    }

    pub fn is_in_thread(&self) -> bool {
        self.thread_id.is_some()
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl AggregateRoot for ContentItem {
    type Id = ContentId;
    type Event = ContentEvent;
    type Error = ContentError;

    fn aggregate_id(&self) -> &ContentId {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn apply_event(&mut self, event: &ContentEvent) -> Result<(), ContentError> {
        if event.content_id() != &self.id {
            return Err(ContentError::AggregateMismatch {
                expected: self.id.clone(),
                found: event.content_id().clone(),
            });
        }

        match event {
            ContentEvent::Saved(e) => {
                // A re-save replaces the scraped snapshot wholesale
                self.props = e.props.clone();
                self.thread_id = e.thread_id.clone();
                self.saved_at = e.saved_at;
            }
            ContentEvent::Liked(e) => {
                self.liked_at = Some(e.liked_at);
                self.props.like_count = self.props.like_count.saturating_add(1);
            }
            ContentEvent::Retweeted(e) => {
                self.retweeted_at = Some(e.retweeted_at);
                self.props.retweet_count = self.props.retweet_count.saturating_add(1);
            }
        }

        self.version += 1;
        Ok(())
    }

    fn event_buffer(&self) -> &EventBuffer<ContentEvent> {
        &self.events
    }

    fn event_buffer_mut(&mut self) -> &mut EventBuffer<ContentEvent> {
        &mut self.events
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
