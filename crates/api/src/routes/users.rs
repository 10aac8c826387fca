//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::accounts;
use crate::state::AppState;

/// ```text
/// GET  /users/                -> list
/// POST /users/                -> create
/// POST /users/register/       -> register
/// POST /users/login/          -> login
/// POST /users/logout/         -> logout
/// GET  /users/current_user/   -> current_user
/// GET  /users/{id}/           -> retrieve
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/", get(accounts::list).post(accounts::create))
        .route("/users/register/", post(accounts::register))
        .route("/users/login/", post(accounts::login))
        .route("/users/logout/", post(accounts::logout))
        .route("/users/current_user/", get(accounts::current_user))
        .route("/users/{id}/", get(accounts::retrieve))
}
