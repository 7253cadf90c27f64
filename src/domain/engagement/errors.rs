use super::value_objects::EngagementKey;

// ============================================================================
// Engagement Errors
// ============================================================================
//
// Engagement mutators have no business-rule failures; these only arise when
// rebuilding a snapshot from history.
//
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EngagementError {
    #[error("Engagement stream must start with a tracked event")]
    NotInitialized,

    #[error("Event for snapshot {found} applied to snapshot {expected}")]
    AggregateMismatch { expected: EngagementKey, found: EngagementKey },
}
