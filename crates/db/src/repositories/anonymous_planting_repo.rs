//! Repository for the `anonymous_plantings` table.
//!
//! Every read is scoped by the caller's session digest.

use forest_core::types::DbId;
use sqlx::PgPool;

use crate::models::anonymous_planting::AnonymousPlanting;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, session_key_hash, user_name, trees_planted, created_at, updated_at";

/// Provides session-scoped operations for anonymous tallies.
pub struct AnonymousPlantingRepo;

impl AnonymousPlantingRepo {
    /// Open a new tally for a session.
    pub async fn create(
        pool: &PgPool,
        session_key_hash: &str,
        user_name: &str,
    ) -> Result<AnonymousPlanting, sqlx::Error> {
        let query = format!(
            "INSERT INTO anonymous_plantings (session_key_hash, user_name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AnonymousPlanting>(&query)
            .bind(session_key_hash)
            .bind(user_name)
            .fetch_one(pool)
            .await
    }

    /// All tallies opened under a session, oldest first.
    pub async fn list_for_session(
        pool: &PgPool,
        session_key_hash: &str,
    ) -> Result<Vec<AnonymousPlanting>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM anonymous_plantings
             WHERE session_key_hash = $1
             ORDER BY id"
        );
        sqlx::query_as::<_, AnonymousPlanting>(&query)
            .bind(session_key_hash)
            .fetch_all(pool)
            .await
    }

    /// Find one tally, only if it belongs to the session.
    pub async fn find_for_session(
        pool: &PgPool,
        id: DbId,
        session_key_hash: &str,
    ) -> Result<Option<AnonymousPlanting>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM anonymous_plantings
             WHERE id = $1 AND session_key_hash = $2"
        );
        sqlx::query_as::<_, AnonymousPlanting>(&query)
            .bind(id)
            .bind(session_key_hash)
            .fetch_optional(pool)
            .await
    }
}
