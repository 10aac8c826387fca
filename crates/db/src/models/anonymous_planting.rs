//! Anonymous planting tally model.

use forest_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A tally row from the `anonymous_plantings` table.
///
/// The owning session digest is skipped on serialization.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnonymousPlanting {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub session_key_hash: String,
    pub user_name: String,
    pub trees_planted: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
