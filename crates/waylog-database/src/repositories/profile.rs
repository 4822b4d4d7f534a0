//! Profile repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use waylog_core::error::{AppError, ErrorKind};
use waylog_core::result::AppResult;
use waylog_entity::profile::Profile;

/// Repository for owner profile reads.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a profile by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find profile", e))
    }
}
