// ============================================================================
// Actor Domain - a platform user observed during an analysis session
// ============================================================================
//
// - Value objects (ActorId, UserProfile, ProfileChanges, ActorStats)
// - Events (ActorFollowed, ActorProfileUpdated)
// - Errors (ActorError)
// - Aggregate (Actor)
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod errors;
pub mod aggregate;

pub use value_objects::*;
pub use events::*;
pub use errors::*;
pub use aggregate::*;
