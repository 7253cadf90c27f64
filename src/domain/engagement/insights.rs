use serde::{Deserialize, Serialize};

use super::value_objects::EngagementMetrics;

// ============================================================================
// Insight Generation
// ============================================================================
//
// Six independent threshold rules, evaluated in a fixed order. Every rule is
// checked; none depends on another's outcome.
//
// ============================================================================

pub const HIGH_ENGAGEMENT_RATE: f64 = 0.05;
pub const RETWEET_TO_LIKE_RATIO: f64 = 0.3;
pub const REPLY_TO_LIKE_RATIO: f64 = 0.2;
pub const URL_CLICK_THROUGH_RATE: f64 = 0.02;
pub const MEDIA_ENGAGEMENT_RATE: f64 = 0.1;
pub const PROFILE_CLICK_RATE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsightRule {
    HighEngagementRate,
    HighRetweetRatio,
    HighReplyRatio,
    StrongClickThrough,
    MediaPerformsWell,
    DrivesProfileVisits,
}

impl InsightRule {
    /// Evaluation order
    pub const ALL: [InsightRule; 6] = [
        InsightRule::HighEngagementRate,
        InsightRule::HighRetweetRatio,
        InsightRule::HighReplyRatio,
        InsightRule::StrongClickThrough,
        InsightRule::MediaPerformsWell,
        InsightRule::DrivesProfileVisits,
    ];

    pub fn message(&self) -> &'static str {
        match self {
            InsightRule::HighEngagementRate => {
                "High engagement rate - this content resonates with its audience"
            }
            InsightRule::HighRetweetRatio => "High retweet ratio - content is highly shareable",
            InsightRule::HighReplyRatio => "High reply ratio - content sparks conversation",
            InsightRule::StrongClickThrough => {
                "Strong click-through rate - audience follows the linked content"
            }
            InsightRule::MediaPerformsWell => {
                "Media performs well - attached visuals drive interaction"
            }
            InsightRule::DrivesProfileVisits => {
                "Drives profile visits - content builds interest in the author"
            }
        }
    }

    /// Stable snake_case name, used as a metrics label
    pub fn name(&self) -> &'static str {
        match self {
            InsightRule::HighEngagementRate => "high_engagement_rate",
            InsightRule::HighRetweetRatio => "high_retweet_ratio",
            InsightRule::HighReplyRatio => "high_reply_ratio",
            InsightRule::StrongClickThrough => "strong_click_through",
            InsightRule::MediaPerformsWell => "media_performs_well",
            InsightRule::DrivesProfileVisits => "drives_profile_visits",
        }
    }

    pub fn from_message(message: &str) -> Option<InsightRule> {
        Self::ALL.into_iter().find(|rule| rule.message() == message)
    }

    pub fn matches(&self, m: &EngagementMetrics) -> bool {
        let impressions = m.impressions as f64;
        let likes = m.likes as f64;

        match self {
            InsightRule::HighEngagementRate => m.engagement_rate > HIGH_ENGAGEMENT_RATE,
            InsightRule::HighRetweetRatio => m.retweets as f64 > likes * RETWEET_TO_LIKE_RATIO,
            InsightRule::HighReplyRatio => m.replies as f64 > likes * REPLY_TO_LIKE_RATIO,
            // Zero impressions with clicks yields an infinite ratio, which passes.
            InsightRule::StrongClickThrough => {
                m.url_clicks > 0 && m.url_clicks as f64 / impressions > URL_CLICK_THROUGH_RATE
            }
            InsightRule::MediaPerformsWell => {
                m.media_views > 0
                    && m.media_engagements as f64 / m.media_views as f64 > MEDIA_ENGAGEMENT_RATE
            }
            InsightRule::DrivesProfileVisits => {
                m.profile_clicks as f64 > impressions * PROFILE_CLICK_RATE
            }
        }
    }
}

/// Rules that fire for `metrics`, in evaluation order.
pub fn matching_rules(metrics: &EngagementMetrics) -> Vec<InsightRule> {
    InsightRule::ALL
        .into_iter()
        .filter(|rule| rule.matches(metrics))
        .collect()
}

/// Human-readable insights for `metrics`, in evaluation order.
pub fn generate_insights(metrics: &EngagementMetrics) -> Vec<String> {
    matching_rules(metrics)
        .into_iter()
        .map(|rule| rule.message().to_string())
        .collect()
}
