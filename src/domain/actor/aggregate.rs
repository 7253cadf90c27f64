use chrono::{DateTime, Utc};

use crate::event_sourcing::core::{AggregateRoot, EventBuffer};
use super::value_objects::{ActorId, ActorStats, ProfileChanges, UserProfile};
use super::events::*;
use super::errors::ActorError;

// ============================================================================
// Actor Aggregate - an observed platform user
// ============================================================================
//
// Event policy:
//   create          -> no event (actors are observed, not saved)
//   follow          -> user.followed
//   unfollow        -> no event
//   update_profile  -> user.profile_updated
//   update_stats    -> no event (passive sync)
//   verify/protect/unprotect -> no event (mirror platform flags)
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct Actor {
    id: ActorId,
    version: u64,
    profile: UserProfile,
    followed_at: Option<DateTime<Utc>>,
    events: EventBuffer<ActorEvent>,
}

impl Actor {
    pub fn create(id: ActorId, profile: UserProfile) -> Self {
        Self {
            id,
            version: 0,
            profile,
            followed_at: None,
            events: EventBuffer::new(),
        }
    }

    /// Rebuild an actor from a loaded snapshot plus the events recorded since.
    /// Replayed events are not queued for dispatch again.
    pub fn replay(
        id: ActorId,
        profile: UserProfile,
        followed_at: Option<DateTime<Utc>>,
        events: &[ActorEvent],
    ) -> Result<Self, ActorError> {
        let mut actor = Self::create(id, profile);
        actor.followed_at = followed_at;
        for event in events {
            actor.apply_event(event)?;
        }
        Ok(actor)
    }

    pub fn follow(&mut self) -> Result<(), ActorError> {
        if self.is_followed() {
            tracing::warn!(actor_id = %self.id, "Rejected follow: already followed");
            return Err(ActorError::AlreadyFollowed(self.id.clone()));
        }

        self.record(ActorEvent::Followed(ActorFollowed {
            actor_id: self.id.clone(),
            username: self.profile.username.clone(),
            followed_at: Utc::now(),
        }))
    }

    /// Clears local follow state. Emits nothing; unfollowing an actor that
    /// was never followed is a no-op.
    pub fn unfollow(&mut self) {
        self.followed_at = None;
    }

    /// Shallow-merge `changes` and record both snapshots. Cannot fail: the
    /// event is built from this actor's own id.
    pub fn update_profile(&mut self, changes: ProfileChanges) {
        let new_profile = changes.merged_into(&self.profile);

        let event = ActorEvent::ProfileUpdated(ActorProfileUpdated {
            actor_id: self.id.clone(),
            old_profile: self.profile.clone(),
            new_profile,
            updated_at: Utc::now(),
        });
        self.transition(&event);
        tracing::debug!(actor_id = %self.id, version = self.version, "Recorded profile update");
        self.events.push(event);
    }

    /// Overwrite the supplied counters with the latest observed values.
    pub fn update_stats(&mut self, stats: ActorStats) {
        if let Some(followers) = stats.followers_count {
            self.profile.followers_count = followers;
        }
        if let Some(following) = stats.following_count {
            self.profile.following_count = following;
        }
        if let Some(tweets) = stats.tweets_count {
            self.profile.tweets_count = tweets;
        }
        if let Some(listed) = stats.listed_count {
            self.profile.listed_count = listed;
        }
    }

    pub fn verify(&mut self) {
        self.profile.is_verified = true;
    }

    pub fn protect(&mut self) {
        self.profile.is_protected = true;
    }

    pub fn unprotect(&mut self) {
        self.profile.is_protected = false;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn id(&self) -> &ActorId {
        &self.id
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn username(&self) -> &str {
        &self.profile.username
    }

    pub fn followed_at(&self) -> Option<DateTime<Utc>> {
        self.followed_at
    }

    pub fn is_followed(&self) -> bool {
        self.followed_at.is_some()
    }

    pub fn is_verified(&self) -> bool {
        self.profile.is_verified
    }

    pub fn is_protected(&self) -> bool {
        self.profile.is_protected
    }

    /// Followers per followed account; `None` when the actor follows nobody.
    pub fn follower_ratio(&self) -> Option<f64> {
        if self.profile.following_count == 0 {
            return None;
        }
        Some(self.profile.followers_count as f64 / self.profile.following_count as f64)
    }

    // State change for an event already known to belong to this actor
    fn transition(&mut self, event: &ActorEvent) {
        match event {
            ActorEvent::Followed(e) => {
                self.followed_at = Some(e.followed_at);
            }
            ActorEvent::ProfileUpdated(e) => {
                self.profile = e.new_profile.clone();
            }
        }

        self.version += 1;
    }

    fn ensure_same_actor(&self, event: &ActorEvent) -> Result<(), ActorError> {
        if event.actor_id() != &self.id {
            return Err(ActorError::AggregateMismatch {
                expected: self.id.clone(),
                found: event.actor_id().clone(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl AggregateRoot for Actor {
    type Id = ActorId;
    type Event = ActorEvent;
    type Error = ActorError;

    fn aggregate_id(&self) -> &ActorId {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn apply_event(&mut self, event: &ActorEvent) -> Result<(), ActorError> {
        self.ensure_same_actor(event)?;
        self.transition(event);
        Ok(())
    }

    fn event_buffer(&self) -> &EventBuffer<ActorEvent> {
        &self.events
    }

    fn event_buffer_mut(&mut self) -> &mut EventBuffer<ActorEvent> {
        &mut self.events
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_sourcing::core::DomainEvent;

    fn create_test_profile() -> UserProfile {
        let joined = Utc::now();
        UserProfile {
            username: "ferris".to_string(),
            display_name: "Ferris the Crab".to_string(),
            bio: None,
            location: Some("Ocean".to_string()),
            website: None,
            profile_image_url: None,
            banner_image_url: None,
            is_verified: false,
            is_protected: false,
            followers_count: 1200,
            following_count: 300,
            tweets_count: 4000,
            listed_count: 12,
            created_at: joined,
            joined_at: joined,
        }
    }

    fn create_test_actor() -> Actor {
        Actor::create(ActorId::new("1001"), create_test_profile())
    }

    #[test]
    fn test_create_emits_no_events() {
        let actor = create_test_actor();
        assert!(actor.uncommitted_events().is_empty());
        assert!(!actor.is_followed());
        assert_eq!(actor.version(), 0);
    }

    #[test]
    fn test_follow_emits_exactly_one_event() {
        let mut actor = create_test_actor();
        assert_eq!(actor.uncommitted_events().len(), 0);

        actor.follow().unwrap();

        let events = actor.uncommitted_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "user.followed");
        match &events[0] {
            ActorEvent::Followed(e) => {
                assert_eq!(e.actor_id, ActorId::new("1001"));
                assert_eq!(e.username, "ferris");
                assert_eq!(Some(e.followed_at), actor.followed_at());
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert!(actor.is_followed());
    }

    #[test]
    fn test_follow_twice_fails() {
        let mut actor = create_test_actor();
        actor.follow().unwrap();

        let result = actor.follow();
        assert!(matches!(result, Err(ActorError::AlreadyFollowed(_))));
        assert_eq!(actor.uncommitted_events().len(), 1);
    }

    #[test]
    fn test_unfollow_clears_state_without_event() {
        let mut actor = create_test_actor();
        actor.follow().unwrap();
        actor.commit();

        actor.unfollow();
        assert!(!actor.is_followed());
        assert!(actor.uncommitted_events().is_empty());

        // Following again is allowed after unfollow
        actor.follow().unwrap();
        assert!(actor.is_followed());
    }

    #[test]
    fn test_update_profile_carries_both_snapshots() {
        let mut actor = create_test_actor();
        let before = actor.profile().clone();

        actor.update_profile(ProfileChanges {
            display_name: Some("Ferris".to_string()),
            bio: Some(Some("Unofficial mascot".to_string())),
            ..Default::default()
        });

        assert_eq!(actor.profile().display_name, "Ferris");
        assert_eq!(actor.profile().bio.as_deref(), Some("Unofficial mascot"));

        let events = actor.commit();
        assert_eq!(events.len(), 1);
        match &events[0] {
            ActorEvent::ProfileUpdated(e) => {
                assert_eq!(e.old_profile, before);
                assert_eq!(&e.new_profile, actor.profile());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_update_profile_has_no_failure_path() {
        let mut actor = create_test_actor();
        let before = actor.profile().clone();

        let () = actor.update_profile(ProfileChanges::default());
        let () = actor.update_profile(ProfileChanges::default());

        assert_eq!(actor.version(), 2);
        assert_eq!(actor.uncommitted_events().len(), 2);
        assert_eq!(actor.profile(), &before);
    }

    #[test]
    fn test_update_stats_is_idempotent_and_silent() {
        let stats = ActorStats {
            followers_count: Some(5000),
            tweets_count: Some(4100),
            ..Default::default()
        };

        let mut once = create_test_actor();
        once.update_stats(stats);

        let mut twice = create_test_actor();
        twice.update_stats(stats);
        twice.update_stats(stats);

        assert_eq!(once.profile().followers_count, 5000);
        assert_eq!(once.profile().following_count, 300);
        assert_eq!(once.profile().tweets_count, twice.profile().tweets_count);
        assert_eq!(once.profile().followers_count, twice.profile().followers_count);
        assert!(twice.uncommitted_events().is_empty());
    }

    #[test]
    fn test_flag_flips_emit_nothing() {
        let mut actor = create_test_actor();

        actor.verify();
        actor.protect();
        assert!(actor.is_verified());
        assert!(actor.is_protected());

        actor.unprotect();
        assert!(!actor.is_protected());
        assert!(actor.uncommitted_events().is_empty());
    }

    #[test]
    fn test_follower_ratio() {
        let mut actor = create_test_actor();
        assert_eq!(actor.follower_ratio(), Some(4.0));

        actor.update_stats(ActorStats {
            following_count: Some(0),
            ..Default::default()
        });
        assert_eq!(actor.follower_ratio(), None);
    }

    #[test]
    fn test_replay_restores_follow_and_profile() {
        let mut live = create_test_actor();
        live.follow().unwrap();
        live.update_profile(ProfileChanges {
            username: Some("ferris_rs".to_string()),
            ..Default::default()
        });
        let events = live.commit();

        let replayed = Actor::replay(ActorId::new("1001"), create_test_profile(), None, &events).unwrap();

        assert!(replayed.is_followed());
        assert_eq!(replayed.followed_at(), live.followed_at());
        assert_eq!(replayed.username(), "ferris_rs");
        assert_eq!(replayed.version(), 2);
        assert!(replayed.uncommitted_events().is_empty());
    }

    #[test]
    fn test_replay_rejects_foreign_events() {
        let mut other = Actor::create(ActorId::new("2002"), create_test_profile());
        other.follow().unwrap();
        let events = other.commit();

        let result = Actor::replay(ActorId::new("1001"), create_test_profile(), None, &events);
        assert!(matches!(result, Err(ActorError::AggregateMismatch { .. })));
    }
}
