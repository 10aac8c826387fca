//! Route definitions for the `/trees` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::trees;
use crate::state::AppState;

/// Tree routes. Paths keep their trailing slash.
///
/// ```text
/// GET  /trees/          -> list
/// POST /trees/          -> plant
/// GET  /trees/stats/    -> stats
/// GET  /trees/search/   -> search
/// GET  /trees/{id}/     -> retrieve
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trees/", get(trees::list).post(trees::plant))
        .route("/trees/stats/", get(trees::stats))
        .route("/trees/search/", get(trees::search))
        .route("/trees/{id}/", get(trees::retrieve))
}
