//! Request extractors.
//!
//! - [`session::SessionContext`] -- The caller's browser session and logged-in
//!   account, resolved from the session cookie.

pub mod session;
