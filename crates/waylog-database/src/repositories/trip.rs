//! Trip repository implementation (read-only queries used by the share
//! pipeline; trip CRUD lives in a different service).

use sqlx::PgPool;
use uuid::Uuid;

use waylog_core::error::{AppError, ErrorKind};
use waylog_core::result::AppResult;
use waylog_entity::trip::Trip;

/// Repository for trip reads.
#[derive(Debug, Clone)]
pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    /// Create a new trip repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a non-deleted trip by id, scoped to its owner.
    pub async fn find_live_for_owner(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Trip>> {
        sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find trip", e))
    }

    /// List an owner's non-deleted trips, newest created first.
    pub async fn list_live_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Trip>> {
        sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips WHERE owner_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list trips", e))
    }
}
