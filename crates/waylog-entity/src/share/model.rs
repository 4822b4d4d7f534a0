//! Share-link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::policy::{PrivacyPolicy, VisibilityPolicy};

/// What a share link targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_scope", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ShareScope {
    /// A single trip.
    Trip,
    /// All of the owner's non-deleted trips.
    Profile,
}

/// A share link granting unauthenticated, redacted, read-only access.
///
/// Only the SHA-256 digest of the token is stored; the raw token exists
/// exactly once, in the create/rotate response. Links are never physically
/// deleted by this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShareLink {
    /// Unique share-link identifier.
    pub id: Uuid,
    /// Owning profile.
    pub owner_id: Uuid,
    /// Trip or profile scope.
    pub scope: ShareScope,
    /// Target trip. Present iff `scope` is [`ShareScope::Trip`].
    pub target_id: Option<Uuid>,
    /// One-way digest of the raw token.
    #[serde(skip_serializing, default)]
    pub token_digest: String,
    /// Sparse owner-supplied policy override map.
    pub policy_overrides: serde_json::Value,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
    /// When the link was revoked. Cleared again by rotation.
    pub revoked_at: Option<DateTime<Utc>>,
    /// When the link stops working. `None` means never.
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShareLink {
    /// Whether the link has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Whether the link has expired as of `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| expires <= now)
    }

    /// Whether the link passes the liveness gate (not revoked, not expired).
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && !self.is_expired(now)
    }

    /// Derive the privacy policy from the stored override map.
    pub fn privacy(&self) -> PrivacyPolicy {
        PrivacyPolicy::from_overrides(&self.policy_overrides)
    }

    /// Derive the visibility policy from the stored override map.
    pub fn visibility(&self) -> VisibilityPolicy {
        VisibilityPolicy::from_overrides(&self.policy_overrides)
    }
}

/// Data required to persist a new share link.
#[derive(Debug, Clone)]
pub struct CreateShareLink {
    /// Owning profile.
    pub owner_id: Uuid,
    /// Trip or profile scope.
    pub scope: ShareScope,
    /// Target trip for trip scope.
    pub target_id: Option<Uuid>,
    /// Digest of the freshly minted token.
    pub token_digest: String,
    /// Policy override map.
    pub policy_overrides: serde_json::Value,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link(revoked: Option<DateTime<Utc>>, expires: Option<DateTime<Utc>>) -> ShareLink {
        ShareLink {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            scope: ShareScope::Trip,
            target_id: Some(Uuid::new_v4()),
            token_digest: "d".repeat(64),
            policy_overrides: serde_json::json!({}),
            created_at: Utc::now(),
            revoked_at: revoked,
            expires_at: expires,
        }
    }

    #[test]
    fn live_without_revocation_or_expiry() {
        assert!(link(None, None).is_live(Utc::now()));
    }

    #[test]
    fn revoked_link_is_dead() {
        assert!(!link(Some(Utc::now()), None).is_live(Utc::now()));
    }

    #[test]
    fn expiry_is_inclusive_at_the_boundary() {
        let now = Utc::now();
        assert!(!link(None, Some(now)).is_live(now));
        assert!(link(None, Some(now + Duration::seconds(1))).is_live(now));
    }

    #[test]
    fn serialization_never_includes_the_digest() {
        let value = serde_json::to_value(link(None, None)).unwrap();
        assert!(value.get("token_digest").is_none());
    }
}
