//! Trip entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A trip journal owned by a single profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    /// Unique trip identifier.
    pub id: Uuid,
    /// Owning profile.
    pub owner_id: Uuid,
    /// Trip title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Human-readable location name.
    pub location_name: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: Option<String>,
    /// Latitude of the trip's primary location.
    pub lat: Option<f64>,
    /// Longitude of the trip's primary location.
    pub lng: Option<f64>,
    /// First day of the trip.
    pub start_date: Option<NaiveDate>,
    /// Last day of the trip.
    pub end_date: Option<NaiveDate>,
    /// Cover image URL.
    pub cover_url: Option<String>,
    /// Comma-free tag list.
    pub tags: Vec<String>,
    /// When the trip was created.
    pub created_at: DateTime<Utc>,
    /// When the trip was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker. A deleted trip is invisible to share links.
    pub deleted_at: Option<DateTime<Utc>>,
}
