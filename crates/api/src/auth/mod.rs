//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`session`] -- Session cookie configuration, parsing and formatting.

pub mod password;
pub mod session;
