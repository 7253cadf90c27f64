use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::event_sourcing::core::DomainEvent;
use super::value_objects::{ActorId, UserProfile};

// ============================================================================
// Actor Domain Events
// ============================================================================

/// Union type for all actor events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ActorEvent {
    Followed(ActorFollowed),
    ProfileUpdated(ActorProfileUpdated),
}

impl DomainEvent for ActorEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ActorEvent::Followed(_) => "user.followed",
            ActorEvent::ProfileUpdated(_) => "user.profile_updated",
        }
    }

    fn occurred_on(&self) -> DateTime<Utc> {
        match self {
            ActorEvent::Followed(e) => e.followed_at,
            ActorEvent::ProfileUpdated(e) => e.updated_at,
        }
    }

    fn aggregate_key(&self) -> String {
        self.actor_id().to_string()
    }
}

impl ActorEvent {
    pub fn actor_id(&self) -> &ActorId {
        match self {
            ActorEvent::Followed(e) => &e.actor_id,
            ActorEvent::ProfileUpdated(e) => &e.actor_id,
        }
    }
}

// Individual event types

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorFollowed {
    pub actor_id: ActorId,
    pub username: String,
    pub followed_at: DateTime<Utc>,
}

/// Carries both snapshots so consumers can diff without loading state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorProfileUpdated {
    pub actor_id: ActorId,
    pub old_profile: UserProfile,
    pub new_profile: UserProfile,
    pub updated_at: DateTime<Utc>,
}
