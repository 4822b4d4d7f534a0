//! Moment (timeline entry) entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single timeline entry within a trip.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Moment {
    /// Unique moment identifier.
    pub id: Uuid,
    /// Parent trip.
    pub trip_id: Uuid,
    /// Optional heading.
    pub title: Option<String>,
    /// Journal text.
    pub note: Option<String>,
    /// When the moment happened (user-supplied, not `created_at`).
    pub taken_at: Option<DateTime<Utc>>,
    /// Explicit ordering within the trip; ties break on `created_at`.
    pub position: i32,
    /// When the moment was created.
    pub created_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}
