//! Media attachment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Kind of media asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "media_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// A still photo.
    Photo,
    /// A video clip.
    Video,
}

/// A media object attached to a moment.
///
/// `storage_path` and `thumbnail_path` are object keys inside the media
/// bucket; they are never exposed raw, only as time-limited signed URLs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MediaAsset {
    /// Unique media identifier.
    pub id: Uuid,
    /// Parent moment.
    pub moment_id: Uuid,
    /// Photo or video.
    pub kind: MediaKind,
    /// Object key of the full-size asset.
    #[serde(skip_serializing)]
    pub storage_path: String,
    /// Object key of the pre-generated thumbnail, if any.
    #[serde(skip_serializing)]
    pub thumbnail_path: Option<String>,
    /// Pixel width, if known.
    pub width: Option<i32>,
    /// Pixel height, if known.
    pub height: Option<i32>,
    /// Ordering within the moment.
    pub position: i32,
    /// When the asset was uploaded.
    pub created_at: DateTime<Utc>,
}
