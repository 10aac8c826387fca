//! Tree entity model and DTOs.

use forest_core::planting::Position;
use forest_core::species::TreeSpecies;
use forest_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A tree row joined with its planter's name.
#[derive(Debug, Clone, FromRow)]
pub struct Tree {
    pub id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub tree_type: TreeSpecies,
    pub position_x: f64,
    pub position_y: f64,
    pub position_z: f64,
    pub planter_id: DbId,
    pub planter_name: String,
    pub planted_at: Timestamp,
    pub is_real_tree_planted: bool,
}

/// Wire representation of a tree.
///
/// `planter` carries the owning planter's id; `planter_name` and
/// `tree_type_display` are denormalized for display.
#[derive(Debug, Clone, Serialize)]
pub struct TreeResponse {
    pub id: DbId,
    pub name: String,
    pub tree_type: TreeSpecies,
    pub tree_type_display: &'static str,
    pub position_x: f64,
    pub position_y: f64,
    pub position_z: f64,
    pub planter: DbId,
    pub planter_name: String,
    pub planted_at: Timestamp,
    pub is_real_tree_planted: bool,
}

impl From<Tree> for TreeResponse {
    fn from(tree: Tree) -> Self {
        Self {
            id: tree.id,
            name: tree.name,
            tree_type: tree.tree_type,
            tree_type_display: tree.tree_type.display_name(),
            position_x: tree.position_x,
            position_y: tree.position_y,
            position_z: tree.position_z,
            planter: tree.planter_id,
            planter_name: tree.planter_name,
            planted_at: tree.planted_at,
            is_real_tree_planted: tree.is_real_tree_planted,
        }
    }
}

/// DTO for inserting a tree under an already-resolved planter.
#[derive(Debug, Clone)]
pub struct CreateTree {
    pub name: String,
    pub tree_type: TreeSpecies,
    pub position: Position,
    pub planter_id: DbId,
}
