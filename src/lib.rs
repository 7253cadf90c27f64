//! Event-sourced content tracking domain.
//!
//! Aggregates for saved tweets ([`ContentItem`]), observed users ([`Actor`])
//! and engagement rollups ([`EngagementSnapshot`]) validate their invariants,
//! mutate in memory and record domain events. Callers drain those events with
//! [`AggregateRoot::commit`] or [`publish_uncommitted`] and hand them to an
//! [`EventDispatcher`].
//!
//! Everything here is synchronous and free of I/O except the dispatch
//! boundary, which is async so real transports can sit behind it.

pub mod domain;
pub mod event_sourcing;
pub mod metrics;

pub use domain::actor::{Actor, ActorError, ActorEvent, ActorId, UserProfile};
pub use domain::content::{ContentError, ContentEvent, ContentId, ContentItem, ContentProps, ThreadId};
pub use domain::engagement::{
    EngagementError, EngagementEvent, EngagementMetrics, EngagementPeriod, EngagementProps,
    EngagementSnapshot, InsightRule, MetricsPatch,
};
pub use domain::media::{MediaEvent, PlaylistId, VideoId};
pub use event_sourcing::{
    AggregateRoot, DomainEvent, EventDispatcher, EventEnvelope, InMemoryOutbox, publish_uncommitted,
};
pub use metrics::Metrics;
