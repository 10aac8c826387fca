//! Repository for the `trees` table.

use forest_core::planting::{Planting, Position};
use forest_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::tree::{CreateTree, Tree};
use crate::repositories::PlanterRepo;

/// Tree columns joined with the owning planter's name.
const SELECT_JOINED: &str = "\
    SELECT t.id, t.name, t.tree_type, t.position_x, t.position_y, t.position_z, \
           t.planter_id, p.name AS planter_name, t.planted_at, t.is_real_tree_planted \
    FROM trees t \
    JOIN planters p ON p.id = t.planter_id";

/// Insert a tree and return it in the same joined shape as [`SELECT_JOINED`].
const INSERT_RETURNING_JOINED: &str = "\
    WITH t AS ( \
        INSERT INTO trees (name, tree_type, position_x, position_y, position_z, planter_id) \
        VALUES ($1, $2, $3, $4, $5, $6) \
        RETURNING * \
    ) \
    SELECT t.id, t.name, t.tree_type, t.position_x, t.position_y, t.position_z, \
           t.planter_id, p.name AS planter_name, t.planted_at, t.is_real_tree_planted \
    FROM t \
    JOIN planters p ON p.id = t.planter_id";

/// Provides planting, listing and counting operations for trees.
pub struct TreeRepo;

impl TreeRepo {
    /// Plant a tree: credit the planter and insert the tree in one transaction.
    ///
    /// If the insert fails the planter upsert is rolled back with it, so the
    /// stored counter never drifts from the number of trees.
    pub async fn plant(
        pool: &PgPool,
        planting: &Planting,
        position: Position,
    ) -> Result<Tree, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let planter = PlanterRepo::credit_planting(&mut *tx, &planting.planter_name).await?;

        let input = CreateTree {
            name: planting.tree_name.clone(),
            tree_type: planting.species,
            position,
            planter_id: planter.id,
        };
        let tree = Self::insert(&mut *tx, &input).await?;

        tx.commit().await?;

        tracing::debug!(
            tree_id = tree.id,
            planter_id = planter.id,
            trees_planted = planter.trees_planted,
            "Tree planted"
        );
        Ok(tree)
    }

    /// Insert a tree row under an existing planter, returning the joined row.
    pub async fn insert(conn: &mut PgConnection, input: &CreateTree) -> Result<Tree, sqlx::Error> {
        sqlx::query_as::<_, Tree>(INSERT_RETURNING_JOINED)
            .bind(&input.name)
            .bind(input.tree_type.as_str())
            .bind(input.position.x)
            .bind(input.position.y)
            .bind(input.position.z)
            .bind(input.planter_id)
            .fetch_one(conn)
            .await
    }

    /// Find a tree by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tree>, sqlx::Error> {
        let query = format!("{SELECT_JOINED} WHERE t.id = $1");
        sqlx::query_as::<_, Tree>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List trees, most recently planted first.
    ///
    /// When `pattern` is given, only trees whose own name or planter name
    /// matches it (case-insensitive) are returned.
    pub async fn list(pool: &PgPool, pattern: Option<&str>) -> Result<Vec<Tree>, sqlx::Error> {
        let query = format!(
            "{SELECT_JOINED}
             WHERE $1::TEXT IS NULL
                OR t.name ILIKE $1 ESCAPE '\\'
                OR p.name ILIKE $1 ESCAPE '\\'
             ORDER BY t.planted_at DESC, t.id DESC"
        );
        sqlx::query_as::<_, Tree>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// Trees matching `pattern` by name or planter name, capped at `limit`.
    pub async fn search(pool: &PgPool, pattern: &str, limit: i64) -> Result<Vec<Tree>, sqlx::Error> {
        let query = format!(
            "{SELECT_JOINED}
             WHERE t.name ILIKE $1 ESCAPE '\\' OR p.name ILIKE $1 ESCAPE '\\'
             ORDER BY t.planted_at DESC, t.id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Tree>(&query)
            .bind(pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Total number of trees in the forest.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM trees")
            .fetch_one(pool)
            .await
    }

    /// Number of trees confirmed as physically planted.
    pub async fn count_real(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM trees WHERE is_real_tree_planted")
            .fetch_one(pool)
            .await
    }
}
