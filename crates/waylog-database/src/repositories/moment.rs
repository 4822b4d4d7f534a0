//! Moment repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use waylog_core::error::{AppError, ErrorKind};
use waylog_core::result::AppResult;
use waylog_entity::moment::Moment;

/// Repository for moment reads.
#[derive(Debug, Clone)]
pub struct MomentRepository {
    pool: PgPool,
}

impl MomentRepository {
    /// Create a new moment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a trip's non-deleted moments in timeline order.
    pub async fn list_live_by_trip(&self, trip_id: Uuid) -> AppResult<Vec<Moment>> {
        sqlx::query_as::<_, Moment>(
            "SELECT * FROM moments WHERE trip_id = $1 AND deleted_at IS NULL \
             ORDER BY position ASC, created_at ASC",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list moments", e))
    }

    /// Count a trip's non-deleted moments.
    pub async fn count_live_by_trip(&self, trip_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM moments WHERE trip_id = $1 AND deleted_at IS NULL",
        )
        .bind(trip_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count moments", e))
    }

    /// Per-trip moment counts across an owner's non-deleted trips.
    pub async fn counts_by_trip_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<(Uuid, i64)>> {
        sqlx::query_as(
            "SELECT m.trip_id, COUNT(*) FROM moments m \
             JOIN trips t ON t.id = m.trip_id \
             WHERE t.owner_id = $1 AND t.deleted_at IS NULL AND m.deleted_at IS NULL \
             GROUP BY m.trip_id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count moments", e))
    }

    /// Count non-deleted moments across an owner's non-deleted trips.
    pub async fn count_live_by_owner(&self, owner_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM moments m \
             JOIN trips t ON t.id = m.trip_id \
             WHERE t.owner_id = $1 AND t.deleted_at IS NULL AND m.deleted_at IS NULL",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count moments", e))
    }
}
