use super::value_objects::ActorId;

// ============================================================================
// Actor Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ActorError {
    #[error("Actor {0} is already followed")]
    AlreadyFollowed(ActorId),

    #[error("Event for actor {found} applied to actor {expected}")]
    AggregateMismatch { expected: ActorId, found: ActorId },
}
