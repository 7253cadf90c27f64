// ============================================================================
// Event Sourcing Core - Generic Infrastructure Abstractions
// ============================================================================
//
// Generic, reusable pieces shared by every content-domain aggregate.
// Nothing in here knows about tweets, users or engagement.
//
// ============================================================================

pub mod aggregate;
pub mod event;

pub use aggregate::{AggregateRoot, EventBuffer};
pub use event::{DomainEvent, EventEnvelope, serialize_event, deserialize_event};
