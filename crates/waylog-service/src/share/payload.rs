//! Guest-facing payload shapes.
//!
//! A [`SharePayload`] is the only value that ever crosses the trust
//! boundary. Every field is populated by the redaction serializer; nothing
//! here exposes storage paths, token digests, or soft-deleted records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use waylog_entity::media::MediaKind;
use waylog_entity::share::{PrivacyPolicy, VisibilityPolicy};

/// The redacted payload, discriminated by share scope.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum SharePayload {
    /// Single-trip share.
    Trip(TripSharePayload),
    /// Whole-profile share.
    Profile(ProfileSharePayload),
}

/// Payload for a trip-scope link.
#[derive(Debug, Clone, Serialize)]
pub struct TripSharePayload {
    /// Id of the share link that produced this payload.
    pub share_link_id: Uuid,
    /// Effective privacy policy.
    pub privacy: PrivacyPolicy,
    /// Effective visibility policy.
    pub visibility: VisibilityPolicy,
    /// Owner block, omitted entirely unless `show_owner`.
    pub owner: Option<OwnerView>,
    /// The redacted trip.
    pub trip: TripView,
    /// Timeline entries; empty unless `show_moments`.
    pub story_entries: Vec<StoryEntryView>,
}

/// Payload for a profile-scope link.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSharePayload {
    /// Id of the share link that produced this payload.
    pub share_link_id: Uuid,
    /// Effective privacy policy.
    pub privacy: PrivacyPolicy,
    /// Effective visibility policy.
    pub visibility: VisibilityPolicy,
    /// Owner block, omitted entirely unless `show_owner`.
    pub owner: Option<OwnerView>,
    /// Aggregate statistics; all zero unless `show_stats`.
    pub stats: ProfileStats,
    /// Redacted trip summaries; empty unless `show_trip_list`.
    pub trips: Vec<TripView>,
}

/// The owner as guests may see them.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerView {
    /// Owner profile id.
    pub id: Uuid,
    /// Display name.
    pub display_name: String,
    /// Avatar URL.
    pub avatar_url: Option<String>,
    /// Biography; further gated by `show_profile_bio`.
    pub bio: Option<String>,
}

/// A trip with per-field redaction applied.
#[derive(Debug, Clone, Serialize)]
pub struct TripView {
    /// Trip id.
    pub id: Uuid,
    /// Trip title.
    pub title: String,
    /// Description; null unless `show_trip_descriptions`.
    pub description: Option<String>,
    /// Human-readable location name.
    pub location_name: Option<String>,
    /// ISO country code.
    pub country_code: Option<String>,
    /// Latitude; null unless `show_globe`.
    pub lat: Option<f64>,
    /// Longitude; null unless `show_globe`.
    pub lng: Option<f64>,
    /// First day; null when `hide_exact_dates`.
    pub start_date: Option<NaiveDate>,
    /// Last day; null when `hide_exact_dates`.
    pub end_date: Option<NaiveDate>,
    /// Human-readable date label at the policy's precision.
    pub date_label: Option<String>,
    /// Cover image URL.
    pub cover_url: Option<String>,
    /// Tags; empty unless `show_tags`.
    pub tags: Vec<String>,
    /// Moment count; zero unless `show_stats`.
    pub moment_count: i64,
    /// Media count; zero unless `show_stats`.
    pub media_count: i64,
}

/// A timeline entry with its permitted media.
#[derive(Debug, Clone, Serialize)]
pub struct StoryEntryView {
    /// Moment id.
    pub id: Uuid,
    /// Optional heading.
    pub title: Option<String>,
    /// Journal text.
    pub note: Option<String>,
    /// When it happened; null when `hide_exact_dates`.
    pub taken_at: Option<DateTime<Utc>>,
    /// Media items; empty unless `show_media`.
    pub media: Vec<MediaView>,
}

/// A media item reduced to signed URLs and display metadata.
#[derive(Debug, Clone, Serialize)]
pub struct MediaView {
    /// Media id.
    pub id: Uuid,
    /// Photo or video.
    pub kind: MediaKind,
    /// Pixel width, if known.
    pub width: Option<i32>,
    /// Pixel height, if known.
    pub height: Option<i32>,
    /// Time-limited preview URL (thumbnail when present, else full asset).
    pub preview_url: String,
    /// Time-limited full-asset URL; null unless `allow_downloads`.
    pub download_url: Option<String>,
}

/// Aggregate statistics for a profile share.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ProfileStats {
    /// Number of non-deleted trips.
    pub trip_count: i64,
    /// Total non-deleted moments across those trips.
    pub moment_count: i64,
    /// Total media attached to those moments.
    pub media_count: i64,
    /// Distinct non-null country codes across those trips.
    pub country_count: i64,
}
