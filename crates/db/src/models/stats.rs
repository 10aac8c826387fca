//! Aggregate forest statistics.

use serde::Serialize;

use crate::models::planter::TopPlanter;

/// Response body for the stats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ForestStats {
    pub total_trees: i64,
    pub real_trees_planted: i64,
    pub top_planters: Vec<TopPlanter>,
}
