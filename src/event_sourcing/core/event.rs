use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use anyhow::Result;

// ============================================================================
// Domain Event Trait
// ============================================================================

/// Immutable record of something that already happened.
///
/// Every concrete event carries its own timestamp and knows which aggregate
/// stream it belongs to, so the dispatcher can route it without inspecting
/// the payload.
pub trait DomainEvent: Clone + std::fmt::Debug {
    /// Dotted event name, e.g. `tweet.saved`
    fn event_type(&self) -> &'static str;

    fn occurred_on(&self) -> DateTime<Utc>;

    /// Stream key the event correlates by (content id, actor id, video id...)
    fn aggregate_key(&self) -> String;

    fn event_version(&self) -> i32 {
        1
    }
}

// ============================================================================
// Event Envelope - Metadata added at the dispatch boundary
// ============================================================================

/// Wraps a domain event with the metadata an external store or transport needs.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EventEnvelope<E> {
    // Event Identity
    pub event_id: Uuid,
    pub aggregate_id: String,
    pub sequence_number: i64,

    // Event Type Information
    pub event_type: String,
    pub event_version: i32,

    // Event Payload
    pub event_data: E,

    // Causation & Correlation
    pub causation_id: Option<Uuid>,
    pub correlation_id: Uuid,

    // Timing
    pub timestamp: DateTime<Utc>,

    pub metadata: HashMap<String, String>,
}

impl<E: DomainEvent> EventEnvelope<E> {
    /// Wrap an event. The envelope timestamp is the event's own `occurred_on`.
    pub fn wrap(event: E, sequence_number: i64, correlation_id: Uuid) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            aggregate_id: event.aggregate_key(),
            sequence_number,
            event_type: event.event_type().to_string(),
            event_version: event.event_version(),
            timestamp: event.occurred_on(),
            event_data: event,
            causation_id: None,
            correlation_id,
            metadata: HashMap::new(),
        }
    }
}

impl<E> EventEnvelope<E> {
    pub fn with_causation(mut self, causation_id: Uuid) -> Self {
        self.causation_id = Some(causation_id);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

// ============================================================================
// Event Serialization Helpers
// ============================================================================

pub fn serialize_event<E: Serialize>(event: &E) -> Result<String> {
    Ok(serde_json::to_string(event)?)
}

pub fn deserialize_event<E: for<'de> Deserialize<'de>>(json: &str) -> Result<E> {
    Ok(serde_json::from_str(json)?)
}

// ============================================================================
// Tests
// ============================================================================
