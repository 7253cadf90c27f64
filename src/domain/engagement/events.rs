use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::event_sourcing::core::DomainEvent;
use super::value_objects::{EngagementKey, EngagementMetrics, EngagementPeriod};

// ============================================================================
// Engagement Events
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EngagementEvent {
    Tracked(EngagementTracked),
    Analyzed(EngagementAnalyzed),
}

impl DomainEvent for EngagementEvent {
    fn event_type(&self) -> &'static str {
        match self {
            EngagementEvent::Tracked(_) => "engagement.tracked",
            EngagementEvent::Analyzed(_) => "engagement.analyzed",
        }
    }

    fn occurred_on(&self) -> DateTime<Utc> {
        match self {
            EngagementEvent::Tracked(e) => e.tracked_at,
            EngagementEvent::Analyzed(e) => e.analyzed_at,
        }
    }

    fn aggregate_key(&self) -> String {
        self.key().to_string()
    }
}

impl EngagementEvent {
    pub fn key(&self) -> &EngagementKey {
        match self {
            EngagementEvent::Tracked(e) => &e.key,
            EngagementEvent::Analyzed(e) => &e.key,
        }
    }
}

/// First event of a snapshot stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementTracked {
    pub key: EngagementKey,
    pub metrics: EngagementMetrics,
    pub period: EngagementPeriod,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub tracked_at: DateTime<Utc>,
}

/// Metrics as analyzed plus the insights derived from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementAnalyzed {
    pub key: EngagementKey,
    pub metrics: EngagementMetrics,
    pub insights: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}
