// ============================================================================
// Engagement Domain - time-windowed metrics and derived insights
// ============================================================================
//
// - Value objects (EngagementKey, EngagementMetrics, MetricsPatch, EngagementPeriod)
// - Insight rules (InsightRule, generate_insights)
// - Events (EngagementTracked, EngagementAnalyzed)
// - Errors (EngagementError)
// - Aggregate (EngagementSnapshot)
//
// ============================================================================

pub mod value_objects;
pub mod insights;
pub mod events;
pub mod errors;
pub mod aggregate;

pub use value_objects::*;
pub use insights::{generate_insights, matching_rules, InsightRule};
pub use events::*;
pub use errors::*;
pub use aggregate::*;
