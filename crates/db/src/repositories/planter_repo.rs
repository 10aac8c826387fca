//! Repository for the `planters` table.

use sqlx::{PgConnection, PgPool};

use crate::models::planter::{Planter, PlanterMatch, TopPlanter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, trees_planted, created_at, updated_at";

/// Provides crediting, search and leaderboard queries for planters.
pub struct PlanterRepo;

impl PlanterRepo {
    /// Credit one planting to `name`, creating the planter on first use.
    ///
    /// A single upsert statement, so concurrent plantings under the same new
    /// name neither duplicate the row nor lose an increment.
    pub async fn credit_planting(
        conn: &mut PgConnection,
        name: &str,
    ) -> Result<Planter, sqlx::Error> {
        let query = format!(
            "INSERT INTO planters (name, trees_planted)
             VALUES ($1, 1)
             ON CONFLICT (name) DO UPDATE
                SET trees_planted = planters.trees_planted + 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Planter>(&query)
            .bind(name)
            .fetch_one(conn)
            .await
    }

    /// Planters whose name matches an `ILIKE` pattern built by
    /// [`forest_core::search::contains_pattern`].
    pub async fn search(
        pool: &PgPool,
        pattern: &str,
        limit: i64,
    ) -> Result<Vec<PlanterMatch>, sqlx::Error> {
        sqlx::query_as::<_, PlanterMatch>(
            "SELECT id, name, trees_planted FROM planters
             WHERE name ILIKE $1 ESCAPE '\\'
             ORDER BY trees_planted DESC, id
             LIMIT $2",
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Planters ranked by the number of trees they own.
    ///
    /// Counts rows in `trees` rather than trusting the stored counter.
    pub async fn top_by_tree_count(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<TopPlanter>, sqlx::Error> {
        sqlx::query_as::<_, TopPlanter>(
            "SELECT p.id, p.name, COUNT(t.id) AS tree_count
             FROM planters p
             LEFT JOIN trees t ON t.planter_id = p.id
             GROUP BY p.id, p.name
             ORDER BY tree_count DESC, p.id
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
