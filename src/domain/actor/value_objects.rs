use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

// ============================================================================
// Actor Value Objects
// ============================================================================

string_id!(
    /// Platform user id (the numeric id string the site exposes)
    ActorId
);

/// Snapshot of an actor's public profile as last observed on the page.
///
/// Counters are supplied by the observer, never derived locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub profile_image_url: Option<String>,
    pub banner_image_url: Option<String>,
    pub is_verified: bool,
    pub is_protected: bool,
    pub followers_count: u64,
    pub following_count: u64,
    pub tweets_count: u64,
    pub listed_count: u64,
    pub created_at: DateTime<Utc>,
    pub joined_at: DateTime<Utc>,
}

/// Partial profile update. `None` leaves the field untouched; for optional
/// fields `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub profile_image_url: Option<Option<String>>,
    pub banner_image_url: Option<Option<String>>,
    pub is_verified: Option<bool>,
    pub is_protected: Option<bool>,
}

impl ProfileChanges {
    /// Shallow merge onto a profile, producing the new snapshot.
    pub fn merged_into(&self, profile: &UserProfile) -> UserProfile {
        let mut next = profile.clone();
        if let Some(ref username) = self.username {
            next.username = username.clone();
        }
        if let Some(ref display_name) = self.display_name {
            next.display_name = display_name.clone();
        }
        if let Some(ref bio) = self.bio {
            next.bio = bio.clone();
        }
        if let Some(ref location) = self.location {
            next.location = location.clone();
        }
        if let Some(ref website) = self.website {
            next.website = website.clone();
        }
        if let Some(ref url) = self.profile_image_url {
            next.profile_image_url = url.clone();
        }
        if let Some(ref url) = self.banner_image_url {
            next.banner_image_url = url.clone();
        }
        if let Some(verified) = self.is_verified {
            next.is_verified = verified;
        }
        if let Some(protected) = self.is_protected {
            next.is_protected = protected;
        }
        next
    }
}

/// Externally observed counters; any subset may be refreshed at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorStats {
    pub followers_count: Option<u64>,
    pub following_count: Option<u64>,
    pub tweets_count: Option<u64>,
    pub listed_count: Option<u64>,
}

// ============================================================================
// Unit Tests
// ============================================================================
