use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};
use std::fmt;

use crate::domain::actor::ActorId;
use crate::domain::content::ContentId;

// ============================================================================
// Engagement Value Objects
// ============================================================================

/// Identity of a snapshot: one tweet as seen for one author.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngagementKey {
    pub content_id: ContentId,
    pub author_id: ActorId,
}

impl EngagementKey {
    pub fn new(content_id: ContentId, author_id: ActorId) -> Self {
        Self { content_id, author_id }
    }
}

impl fmt::Display for EngagementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.content_id, self.author_id)
    }
}

/// Raw analytics counters for one tweet over one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub impressions: u64,
    pub engagements: u64,
    /// engagements / impressions. Only recomputed when counters are patched.
    pub engagement_rate: f64,
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
    pub quotes: u64,
    pub profile_clicks: u64,
    pub url_clicks: u64,
    pub hashtag_clicks: u64,
    pub detail_expands: u64,
    pub media_views: u64,
    pub media_engagements: u64,
}

/// Partial counter update. There is deliberately no rate field: the rate is
/// always derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsPatch {
    pub impressions: Option<u64>,
    pub engagements: Option<u64>,
    pub likes: Option<u64>,
    pub retweets: Option<u64>,
    pub replies: Option<u64>,
    pub quotes: Option<u64>,
    pub profile_clicks: Option<u64>,
    pub url_clicks: Option<u64>,
    pub hashtag_clicks: Option<u64>,
    pub detail_expands: Option<u64>,
    pub media_views: Option<u64>,
    pub media_engagements: Option<u64>,
}

impl EngagementMetrics {
    /// Shallow-merge a patch, then recompute the rate when impressions are
    /// non-zero. With zero impressions the previous rate is kept.
    pub fn apply_patch(&mut self, patch: &MetricsPatch) {
        fn set(field: &mut u64, value: Option<u64>) {
            if let Some(v) = value {
                *field = v;
            }
        }

        set(&mut self.impressions, patch.impressions);
        set(&mut self.engagements, patch.engagements);
        set(&mut self.likes, patch.likes);
        set(&mut self.retweets, patch.retweets);
        set(&mut self.replies, patch.replies);
        set(&mut self.quotes, patch.quotes);
        set(&mut self.profile_clicks, patch.profile_clicks);
        set(&mut self.url_clicks, patch.url_clicks);
        set(&mut self.hashtag_clicks, patch.hashtag_clicks);
        set(&mut self.detail_expands, patch.detail_expands);
        set(&mut self.media_views, patch.media_views);
        set(&mut self.media_engagements, patch.media_engagements);

        if self.impressions > 0 {
            self.engagement_rate = self.engagements as f64 / self.impressions as f64;
        }
    }
}

/// Rollup window of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementPeriod {
    Hour,
    Day,
    Week,
    Month,
}

impl EngagementPeriod {
    /// Nominal length of the window; a month counts as 30 days.
    pub fn duration(&self) -> Duration {
        match self {
            EngagementPeriod::Hour => Duration::hours(1),
            EngagementPeriod::Day => Duration::days(1),
            EngagementPeriod::Week => Duration::weeks(1),
            EngagementPeriod::Month => Duration::days(30),
        }
    }
}

/// What the observer supplies when it starts tracking a tweet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementProps {
    pub metrics: EngagementMetrics,
    pub period: EngagementPeriod,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl EngagementProps {
    /// Window of `period` length ending at `end_date`.
    pub fn ending_at(metrics: EngagementMetrics, period: EngagementPeriod, end_date: DateTime<Utc>) -> Self {
        Self {
            metrics,
            period,
            start_date: end_date - period.duration(),
            end_date,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
