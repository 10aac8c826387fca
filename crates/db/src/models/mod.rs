//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Serialize` response shape where the row holds private columns
//! - A create DTO for inserts

pub mod account;
pub mod anonymous_planting;
pub mod planter;
pub mod session;
pub mod stats;
pub mod tree;
