use axum::routing::get;
use axum::Router;

use crate::handlers::anonymous;
use crate::state::AppState;

/// Session-scoped anonymous tallies.
///
/// ```text
/// GET  /anonymous-plantings/        -> list
/// POST /anonymous-plantings/        -> create
/// GET  /anonymous-plantings/{id}/   -> retrieve
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/anonymous-plantings/",
            get(anonymous::list).post(anonymous::create),
        )
        .route("/anonymous-plantings/{id}/", get(anonymous::retrieve))
}
