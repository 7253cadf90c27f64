// ============================================================================
// Event Dispatch - hand-off point between aggregates and the outside world
// ============================================================================

pub mod outbox;

pub use outbox::{EventDispatcher, InMemoryOutbox, publish_uncommitted};
