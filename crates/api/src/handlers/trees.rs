//! Handlers for the `/trees` resource: planting, listing, stats and search.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use forest_core::error::CoreError;
use forest_core::planting::{random_position, PlantTreeInput};
use forest_core::search::{
    contains_pattern, normalize_query, PLANTER_SEARCH_LIMIT, TOP_PLANTERS_LIMIT,
    TREE_SEARCH_LIMIT,
};
use forest_core::types::DbId;
use forest_db::models::planter::PlanterMatch;
use forest_db::models::stats::ForestStats;
use forest_db::models::tree::TreeResponse;
use forest_db::repositories::{PlanterRepo, TreeRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::handlers::json_body;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /trees/`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Case-insensitive substring of the tree or planter name.
    pub search: Option<String>,
}

/// Query parameters for `GET /trees/search/`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Combined tree and planter matches.
#[derive(Debug, Default, Serialize)]
pub struct SearchResponse {
    pub trees: Vec<TreeResponse>,
    pub users: Vec<PlanterMatch>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/trees/
///
/// All trees, most recently planted first, optionally filtered by `?search=`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<TreeResponse>>> {
    let pattern = normalize_query(params.search.as_deref()).map(contains_pattern);
    let trees = TreeRepo::list(&state.pool, pattern.as_deref()).await?;
    Ok(Json(trees.into_iter().map(TreeResponse::from).collect()))
}

/// POST /api/trees/
///
/// Plant a tree for the named planter at a random spot in the forest.
pub async fn plant(
    State(state): State<AppState>,
    body: Result<Json<PlantTreeInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<TreeResponse>)> {
    let planting = json_body(body)?.into_planting()?;
    let position = random_position(&mut rand::rng());

    let tree = TreeRepo::plant(&state.pool, &planting, position).await?;

    tracing::info!(
        tree_id = tree.id,
        planter_id = tree.planter_id,
        species = %tree.tree_type,
        "Tree planted"
    );

    Ok((StatusCode::CREATED, Json(tree.into())))
}

/// GET /api/trees/{id}/
pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TreeResponse>> {
    let tree = TreeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Tree", id })?;
    Ok(Json(tree.into()))
}

/// GET /api/trees/stats/
///
/// Totals and the planter leaderboard, recomputed on every call.
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<ForestStats>> {
    let (total_trees, real_trees_planted, top_planters) = tokio::try_join!(
        TreeRepo::count(&state.pool),
        TreeRepo::count_real(&state.pool),
        PlanterRepo::top_by_tree_count(&state.pool, TOP_PLANTERS_LIMIT),
    )?;

    Ok(Json(ForestStats {
        total_trees,
        real_trees_planted,
        top_planters,
    }))
}

/// GET /api/trees/search/?q=
///
/// A blank query short-circuits to empty results without touching the
/// database.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let Some(query) = normalize_query(params.q.as_deref()) else {
        return Ok(Json(SearchResponse::default()));
    };

    let pattern = contains_pattern(query);
    let (trees, users) = tokio::try_join!(
        TreeRepo::search(&state.pool, &pattern, TREE_SEARCH_LIMIT),
        PlanterRepo::search(&state.pool, &pattern, PLANTER_SEARCH_LIMIT),
    )?;

    Ok(Json(SearchResponse {
        trees: trees.into_iter().map(TreeResponse::from).collect(),
        users,
    }))
}
