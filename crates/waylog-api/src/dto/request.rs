//! Request body and query DTOs.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use waylog_entity::share::ShareScope;

/// Body for `POST /api/share-links`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShareLinkBody {
    /// `trip` or `profile`.
    pub scope: ShareScope,
    /// Target trip; required for trip scope.
    #[serde(default)]
    pub target_id: Option<Uuid>,
    /// Sparse policy override map; omitted keys fall back to defaults.
    #[serde(default)]
    pub policy: Option<serde_json::Value>,
    /// Optional expiry instant.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Filter query for `GET /api/share-links`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShareLinkListQuery {
    /// Restrict to one scope.
    #[serde(default)]
    pub scope: Option<ShareScope>,
    /// Restrict to links targeting one trip.
    #[serde(default)]
    pub target_id: Option<Uuid>,
}
