//! Planter entity model.

use forest_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full planter row from the `planters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Planter {
    pub id: DbId,
    pub name: String,
    pub trees_planted: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Compact planter shape returned by search (`users` list).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlanterMatch {
    pub id: DbId,
    pub name: String,
    pub trees_planted: i32,
}

/// Leaderboard row ranked by the number of trees actually owned.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopPlanter {
    pub id: DbId,
    pub name: String,
    pub tree_count: i64,
}
