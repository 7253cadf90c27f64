// ============================================================================
// Media Domain - video download and playlist sync events
// ============================================================================

pub mod value_objects;
pub mod events;

pub use value_objects::*;
pub use events::*;
