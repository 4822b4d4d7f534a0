//! Share redemption gate.
//!
//! Resolves a presented raw token and runs the liveness checks before any
//! record data is read. Every failure mode — unknown token, revoked link,
//! expired link, deleted target — collapses into one identical NotFound so
//! guests cannot enumerate dead links or distinguish why one died.

use std::sync::Arc;

use chrono::Utc;

use waylog_core::error::AppError;
use waylog_core::result::AppResult;
use waylog_database::repositories::share_link::ShareLinkRepository;
use waylog_entity::share::ShareLink;

use super::payload::SharePayload;
use super::serializer::RedactionSerializer;
use super::token::TokenCodec;

/// The single guest-facing message for every dead-link reason.
pub(crate) const DEAD_LINK_MESSAGE: &str = "Share link not found";

/// The uniform dead-link error.
pub(crate) fn dead_link() -> AppError {
    AppError::not_found(DEAD_LINK_MESSAGE)
}

/// Check the liveness gate for a resolved link.
///
/// Order matters: existence is checked by the caller, then revocation,
/// then expiry. All failures map to the same error.
pub(crate) fn ensure_live(link: &ShareLink, now: chrono::DateTime<Utc>) -> AppResult<()> {
    if link.is_revoked() {
        return Err(dead_link());
    }
    if link.is_expired(now) {
        return Err(dead_link());
    }
    Ok(())
}

/// Handles unauthenticated share redemption.
#[derive(Debug, Clone)]
pub struct ShareAccessService {
    /// Share-link repository.
    links: Arc<ShareLinkRepository>,
    /// Token codec for digest lookup.
    codec: TokenCodec,
    /// Redaction serializer.
    serializer: Arc<RedactionSerializer>,
}

impl ShareAccessService {
    /// Create a new access service.
    pub fn new(links: Arc<ShareLinkRepository>, serializer: Arc<RedactionSerializer>) -> Self {
        Self {
            links,
            codec: TokenCodec::new(),
            serializer,
        }
    }

    /// Redeem a raw token into the redacted payload its link permits.
    pub async fn redeem(&self, raw_token: &str) -> AppResult<SharePayload> {
        let digest = self.codec.digest(raw_token);
        let link = self
            .links
            .find_by_digest(&digest)
            .await?
            .ok_or_else(dead_link)?;

        ensure_live(&link, Utc::now())?;

        self.serializer.serialize(&link).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;
    use waylog_entity::share::ShareScope;

    fn link(revoked: bool, expired: bool) -> ShareLink {
        let now = Utc::now();
        ShareLink {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            scope: ShareScope::Profile,
            target_id: None,
            token_digest: "d".repeat(64),
            policy_overrides: serde_json::json!({}),
            created_at: now,
            revoked_at: revoked.then_some(now - Duration::hours(1)),
            expires_at: expired.then_some(now - Duration::minutes(1)),
        }
    }

    #[test]
    fn live_link_passes_the_gate() {
        assert!(ensure_live(&link(false, false), Utc::now()).is_ok());
    }

    #[test]
    fn revoked_and_expired_yield_identical_errors() {
        let revoked = ensure_live(&link(true, false), Utc::now()).unwrap_err();
        let expired = ensure_live(&link(false, true), Utc::now()).unwrap_err();
        assert_eq!(revoked.kind, expired.kind);
        assert_eq!(revoked.message, expired.message);
        assert_eq!(revoked.message, dead_link().message);
    }
}
