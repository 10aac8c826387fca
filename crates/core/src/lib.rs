//! Domain types and pure logic for the forest backend.
//!
//! No I/O lives here: request validation, species, placement and search
//! helpers are shared by the repository and HTTP layers.

pub mod accounts;
pub mod anonymous;
pub mod error;
pub mod planting;
pub mod search;
pub mod session_keys;
pub mod species;
pub mod types;
pub mod validation;
