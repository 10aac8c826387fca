pub mod anonymous_plantings;
pub mod health;
pub mod trees;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /trees/                          list (?search), plant
/// /trees/stats/                    totals and leaderboard
/// /trees/search/                   search trees and planters (?q)
/// /trees/{id}/                     get
///
/// /users/                          list, create
/// /users/register/                 register and log in
/// /users/login/                    log in
/// /users/logout/                   log out
/// /users/current_user/             profile or null
/// /users/{id}/                     get
///
/// /anonymous-plantings/            list, create (session-scoped)
/// /anonymous-plantings/{id}/       get (session-scoped)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(trees::router())
        .merge(users::router())
        .merge(anonymous_plantings::router())
}
