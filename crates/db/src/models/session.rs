//! Browser session model and DTOs.

use forest_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub key_hash: String,
    pub account_id: Option<DbId>,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new session.
pub struct CreateSession {
    pub key_hash: String,
    pub account_id: Option<DbId>,
    pub expires_at: Timestamp,
}
