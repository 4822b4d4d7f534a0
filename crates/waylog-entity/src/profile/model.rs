//! Owner profile entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A trip owner's public-facing profile fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    /// Unique profile identifier (same as the owner's user id).
    pub id: Uuid,
    /// Display name shown to guests when exposed.
    pub display_name: String,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Free-form biography.
    pub bio: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
}
