use chrono::{DateTime, Utc};

use crate::domain::actor::ActorId;
use crate::domain::content::ContentId;
use crate::event_sourcing::core::{AggregateRoot, EventBuffer};
use super::value_objects::{EngagementKey, EngagementMetrics, EngagementPeriod, EngagementProps, MetricsPatch};
use super::insights::generate_insights;
use super::events::*;
use super::errors::EngagementError;

// ============================================================================
// EngagementSnapshot Aggregate - metrics rollup for one tweet and window
// ============================================================================
//
// tracked -> analyzed. analyze() may run again: each call re-derives the
// insights from current metrics and records a fresh engagement.analyzed.
//
// Event policy:
//   create                      -> engagement.tracked
//   analyze                     -> engagement.analyzed
//   update_metrics / insight edits -> no event
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct EngagementSnapshot {
    key: EngagementKey,
    version: u64,
    metrics: EngagementMetrics,
    period: EngagementPeriod,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    analyzed_at: Option<DateTime<Utc>>,
    insights: Vec<String>,
    events: EventBuffer<EngagementEvent>,
}

impl EngagementSnapshot {
    pub fn create(content_id: ContentId, author_id: ActorId, props: EngagementProps) -> Self {
        let tracked = EngagementTracked {
            key: EngagementKey::new(content_id, author_id),
            metrics: props.metrics,
            period: props.period,
            start_date: props.start_date,
            end_date: props.end_date,
            tracked_at: Utc::now(),
        };

        let mut snapshot = Self::from_tracked(&tracked);
        tracing::debug!(snapshot = %snapshot.key, period = ?snapshot.period, "Engagement tracked");
        snapshot.events.push(EngagementEvent::Tracked(tracked));
        snapshot
    }

    /// Rebuild a snapshot from its full event stream.
    pub fn from_history(events: &[EngagementEvent]) -> Result<Self, EngagementError> {
        let (first, rest) = events.split_first().ok_or(EngagementError::NotInitialized)?;

        let mut snapshot = match first {
            EngagementEvent::Tracked(e) => Self::from_tracked(e),
            _ => return Err(EngagementError::NotInitialized),
        };

        for event in rest {
            snapshot.apply_event(event)?;
        }

        Ok(snapshot)
    }

    fn from_tracked(e: &EngagementTracked) -> Self {
        Self {
            key: e.key.clone(),
            version: 1,
            metrics: e.metrics,
            period: e.period,
            start_date: e.start_date,
            end_date: e.end_date,
            analyzed_at: None,
            insights: Vec::new(),
            events: EventBuffer::new(),
        }
    }

    /// Merge fresh counters. The engagement rate follows automatically when
    /// impressions are known.
    pub fn update_metrics(&mut self, patch: MetricsPatch) {
        self.metrics.apply_patch(&patch);
    }

    /// Stamp `analyzed_at`, replace the insight list with the rules that fire
    /// for the current metrics, and record `engagement.analyzed`. Always
    /// succeeds, including on re-analysis.
    pub fn analyze(&mut self) {
        let insights = generate_insights(&self.metrics);

        tracing::debug!(
            snapshot = %self.key,
            insight_count = insights.len(),
            reanalysis = self.is_analyzed(),
            "Engagement analyzed"
        );

        let event = EngagementEvent::Analyzed(EngagementAnalyzed {
            key: self.key.clone(),
            metrics: self.metrics,
            insights,
            analyzed_at: Utc::now(),
        });
        self.transition(&event);
        self.events.push(event);
    }

    // State change for an event already known to belong to this snapshot
    fn transition(&mut self, event: &EngagementEvent) {
        match event {
            EngagementEvent::Tracked(e) => {
                self.metrics = e.metrics;
                self.period = e.period;
                self.start_date = e.start_date;
                self.end_date = e.end_date;
            }
            EngagementEvent::Analyzed(e) => {
                self.metrics = e.metrics;
                self.insights = e.insights.clone();
                self.analyzed_at = Some(e.analyzed_at);
            }
        }

        self.version += 1;
    }

    pub fn add_custom_insight(&mut self, insight: impl Into<String>) {
        let insight = insight.into();
        if !self.insights.contains(&insight) {
            self.insights.push(insight);
        }
    }

    pub fn remove_insight(&mut self, insight: &str) {
        self.insights.retain(|existing| existing != insight);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn key(&self) -> &EngagementKey {
        &self.key
    }

    pub fn content_id(&self) -> &ContentId {
        &self.key.content_id
    }

    pub fn author_id(&self) -> &ActorId {
        &self.key.author_id
    }

    pub fn metrics(&self) -> &EngagementMetrics {
        &self.metrics
    }

    pub fn engagement_rate(&self) -> f64 {
        self.metrics.engagement_rate
    }

    pub fn period(&self) -> EngagementPeriod {
        self.period
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    pub fn analyzed_at(&self) -> Option<DateTime<Utc>> {
        self.analyzed_at
    }

    pub fn is_analyzed(&self) -> bool {
        self.analyzed_at.is_some()
    }

    pub fn insights(&self) -> &[String] {
        &self.insights
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl AggregateRoot for EngagementSnapshot {
    type Id = EngagementKey;
    type Event = EngagementEvent;
    type Error = EngagementError;

    fn aggregate_id(&self) -> &EngagementKey {
        &self.key
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn apply_event(&mut self, event: &EngagementEvent) -> Result<(), EngagementError> {
        if event.key() != &self.key {
            return Err(EngagementError::AggregateMismatch {
                expected: self.key.clone(),
                found: event.key().clone(),
            });
        }

        self.transition(event);
        Ok(())
    }

    fn event_buffer(&self) -> &EventBuffer<EngagementEvent> {
        &self.events
    }

    fn event_buffer_mut(&mut self) -> &mut EventBuffer<EngagementEvent> {
        &mut self.events
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
