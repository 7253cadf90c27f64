// ============================================================================
// Content Domain - saved tweets and local interactions with them
// ============================================================================
//
// - Value objects (ContentId, ThreadId, ContentProps)
// - Events (ContentSaved, ContentLiked, ContentRetweeted)
// - Errors (ContentError)
// - Aggregate (ContentItem)
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
