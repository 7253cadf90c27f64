use super::event::DomainEvent;

// ============================================================================
// Aggregate Root Pattern - Event Sourcing Core
// ============================================================================
//
// Key Principles:
// 1. Mutators validate invariants before recording an event
// 2. Events represent facts that have already happened
// 3. Recorded events flow through apply_event, the same path replay uses
// 4. Uncommitted events are kept in creation order until commit()
//
// Not every mutation is a fact: passive syncs (stats, engagement counters)
// change state directly and are never recorded.
//
// ============================================================================

/// Ordered buffer of events an aggregate has produced but nobody has drained yet.
#[derive(Debug, Clone)]
pub struct EventBuffer<E> {
    events: Vec<E>,
}

impl<E> Default for EventBuffer<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E: Clone> EventBuffer<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: E) {
        self.events.push(event);
    }

    pub fn as_slice(&self) -> &[E] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Hand back every buffered event and leave the buffer empty.
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }
}

/// Generic aggregate root - every content-domain aggregate implements this
///
/// Type Parameters:
/// - `Id`: The strongly typed identity of the aggregate
/// - `Event`: The domain event type this aggregate records and replays
/// - `Error`: The error type for business rule and replay violations
pub trait AggregateRoot {
    type Id: std::fmt::Display;
    type Event: DomainEvent;
    type Error;

    /// Aggregate identity
    fn aggregate_id(&self) -> &Self::Id;

    /// Number of events applied to this instance (recorded or replayed)
    fn version(&self) -> u64;

    /// Apply one event to the in-memory state. Used both when recording a
    /// new fact and when replaying history.
    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error>;

    fn event_buffer(&self) -> &EventBuffer<Self::Event>;

    fn event_buffer_mut(&mut self) -> &mut EventBuffer<Self::Event>;

    /// Apply a freshly produced event and queue it for dispatch.
    fn record(&mut self, event: Self::Event) -> Result<(), Self::Error> {
        self.apply_event(&event)?;
        tracing::debug!(
            aggregate_id = %self.aggregate_id(),
            event_type = event.event_type(),
            version = self.version(),
            "Recorded domain event"
        );
        self.event_buffer_mut().push(event);
        Ok(())
    }

    /// Copy of the pending events. Does not clear the buffer.
    fn uncommitted_events(&self) -> Vec<Self::Event> {
        self.event_buffer().as_slice().to_vec()
    }

    fn has_uncommitted_events(&self) -> bool {
        !self.event_buffer().is_empty()
    }

    /// Take the pending events in creation order and clear the buffer, so a
    /// second drain never re-delivers the same facts.
    fn commit(&mut self) -> Vec<Self::Event> {
        self.event_buffer_mut().drain()
    }
}

// ============================================================================
// Tests
// ============================================================================
