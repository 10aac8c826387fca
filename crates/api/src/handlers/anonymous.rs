//! Handlers for `/anonymous-plantings`: per-session tallies for visitors
//! without an account.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use forest_core::anonymous::AnonymousPlantingInput;
use forest_core::error::CoreError;
use forest_core::types::DbId;
use forest_db::models::anonymous_planting::AnonymousPlanting;
use forest_db::repositories::AnonymousPlantingRepo;

use crate::error::AppResult;
use crate::handlers::json_body;
use crate::middleware::session::{start_session, SessionContext};
use crate::state::AppState;

/// GET /api/anonymous-plantings/
///
/// Only the caller's own tallies; no session means an empty list.
pub async fn list(
    State(state): State<AppState>,
    ctx: SessionContext,
) -> AppResult<Json<Vec<AnonymousPlanting>>> {
    let Some(key_hash) = ctx.key_hash() else {
        return Ok(Json(Vec::new()));
    };
    let tallies = AnonymousPlantingRepo::list_for_session(&state.pool, key_hash).await?;
    Ok(Json(tallies))
}

/// POST /api/anonymous-plantings/
///
/// Creates an anonymous session first when the caller has none.
pub async fn create(
    State(state): State<AppState>,
    ctx: SessionContext,
    body: Result<Json<AnonymousPlantingInput>, JsonRejection>,
) -> AppResult<(StatusCode, HeaderMap, Json<AnonymousPlanting>)> {
    let user_name = json_body(body)?.into_user_name()?;

    let mut headers = HeaderMap::new();
    let key_hash = match ctx.key_hash() {
        Some(hash) => hash.to_owned(),
        None => {
            let (session, cookie) = start_session(&state, None).await?;
            headers.insert(SET_COOKIE, cookie);
            session.key_hash
        }
    };

    let tally = AnonymousPlantingRepo::create(&state.pool, &key_hash, &user_name).await?;
    tracing::info!(tally_id = tally.id, "Anonymous planting tally created");

    Ok((StatusCode::CREATED, headers, Json(tally)))
}

/// GET /api/anonymous-plantings/{id}/
pub async fn retrieve(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<AnonymousPlanting>> {
    let not_found = CoreError::NotFound {
        entity: "AnonymousPlanting",
        id,
    };
    let Some(key_hash) = ctx.key_hash() else {
        return Err(not_found.into());
    };
    let tally = AnonymousPlantingRepo::find_for_session(&state.pool, id, key_hash)
        .await?
        .ok_or(not_found)?;
    Ok(Json(tally))
}
