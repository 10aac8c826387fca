//! Integration tests for the planting, search and stats queries.
//!
//! Exercises the repository layer against a real database:
//! - Get-or-create planter with counter increment
//! - Transactional rollback when the tree insert fails
//! - Case-insensitive search with literal wildcards
//! - Leaderboard ordering

use forest_core::planting::{Planting, Position};
use forest_core::search::{contains_pattern, PLANTER_SEARCH_LIMIT, TREE_SEARCH_LIMIT};
use forest_core::species::TreeSpecies;
use forest_db::models::planter::Planter;
use forest_db::models::tree::CreateTree;
use forest_db::repositories::{PlanterRepo, TreeRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn planting(planter: &str, tree: &str) -> Planting {
    Planting {
        planter_name: planter.to_string(),
        tree_name: tree.to_string(),
        species: TreeSpecies::Kapok,
    }
}

fn origin() -> Position {
    Position::default()
}

async fn planter_named(pool: &PgPool, name: &str) -> Option<Planter> {
    sqlx::query_as::<_, Planter>(
        "SELECT id, name, trees_planted, created_at, updated_at FROM planters WHERE name = $1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await
    .unwrap()
}

async fn all_planters(pool: &PgPool) -> Vec<Planter> {
    sqlx::query_as::<_, Planter>(
        "SELECT id, name, trees_planted, created_at, updated_at FROM planters ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .unwrap()
}

async fn plant(pool: &PgPool, planter: &str, tree: &str) {
    TreeRepo::plant(pool, &planting(planter, tree), origin())
        .await
        .expect("planting should succeed");
}

// ---------------------------------------------------------------------------
// Planting
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn first_planting_creates_planter_with_count_one(pool: PgPool) {
    let tree = TreeRepo::plant(&pool, &planting("Alice", "Shade"), origin())
        .await
        .unwrap();

    assert_eq!(tree.planter_name, "Alice");
    assert_eq!(tree.tree_type, TreeSpecies::Kapok);
    assert!(!tree.is_real_tree_planted);

    let planter = planter_named(&pool, "Alice").await.expect("planter should exist");
    assert_eq!(planter.trees_planted, 1);
    assert_eq!(planter.id, tree.planter_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeat_planting_reuses_planter(pool: PgPool) {
    let first = TreeRepo::plant(&pool, &planting("Alice", "One"), origin())
        .await
        .unwrap();
    let second = TreeRepo::plant(&pool, &planting("Alice", "Two"), origin())
        .await
        .unwrap();

    assert_eq!(first.planter_id, second.planter_id);

    let planters = all_planters(&pool).await;
    assert_eq!(planters.len(), 1, "no duplicate planter rows");
    assert_eq!(planters[0].trees_planted, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn planter_names_are_case_sensitive(pool: PgPool) {
    plant(&pool, "alice", "a").await;
    plant(&pool, "Alice", "b").await;

    assert_eq!(all_planters(&pool).await.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_plantings_do_not_lose_updates(pool: PgPool) {
    let mut handles = Vec::new();
    for i in 0..10 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            TreeRepo::plant(&pool, &planting("Crowd", &format!("tree-{i}")), origin()).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().expect("planting should succeed");
    }

    let planter = planter_named(&pool, "Crowd").await.unwrap();
    assert_eq!(planter.trees_planted, 10);
    assert_eq!(TreeRepo::count(&pool).await.unwrap(), 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_tree_insert_rolls_back_counter(pool: PgPool) {
    plant(&pool, "Alice", "ok").await;

    // Oversized tree name violates the VARCHAR(100) column after the planter
    // upsert has already run inside the transaction.
    let result = TreeRepo::plant(&pool, &planting("Alice", &"x".repeat(101)), origin()).await;
    assert!(result.is_err());

    let planter = planter_named(&pool, "Alice").await.unwrap();
    assert_eq!(planter.trees_planted, 1);
    assert_eq!(TreeRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn position_is_persisted(pool: PgPool) {
    let position = Position {
        x: -7.5,
        y: 0.0,
        z: 3.25,
    };
    let tree = TreeRepo::plant(&pool, &planting("Alice", "Placed"), position)
        .await
        .unwrap();

    let stored = TreeRepo::find_by_id(&pool, tree.id).await.unwrap().unwrap();
    assert_eq!(stored.position_x, -7.5);
    assert_eq!(stored.position_y, 0.0);
    assert_eq!(stored.position_z, 3.25);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn insert_under_unknown_planter_fails(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let input = CreateTree {
        name: "Orphan".to_string(),
        tree_type: TreeSpecies::Cocoa,
        position: origin(),
        planter_id: 999_999,
    };
    let result = TreeRepo::insert(&mut conn, &input).await;
    assert!(result.is_err(), "foreign key must be enforced");
}

// ---------------------------------------------------------------------------
// Listing and search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_is_newest_first_and_filters_by_either_name(pool: PgPool) {
    plant(&pool, "Oakley", "Maple").await;
    plant(&pool, "Bob", "Great Oak").await;
    plant(&pool, "Carol", "Birch").await;

    let all = TreeRepo::list(&pool, None).await.unwrap();
    let names: Vec<_> = all.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Birch", "Great Oak", "Maple"]);

    let pattern = contains_pattern("OAK");
    let filtered = TreeRepo::list(&pool, Some(&pattern)).await.unwrap();
    let names: Vec<_> = filtered.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Great Oak", "Maple"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_caps_results(pool: PgPool) {
    for i in 0..25 {
        plant(&pool, &format!("oak-fan-{i}"), "sapling").await;
    }

    let pattern = contains_pattern("oak");
    let trees = TreeRepo::search(&pool, &pattern, TREE_SEARCH_LIMIT).await.unwrap();
    let planters = PlanterRepo::search(&pool, &pattern, PLANTER_SEARCH_LIMIT)
        .await
        .unwrap();

    assert_eq!(trees.len(), 20);
    assert_eq!(planters.len(), 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_treats_wildcards_literally(pool: PgPool) {
    plant(&pool, "Alice", "100% canopy").await;
    plant(&pool, "Bob", "1000 canopy").await;

    let pattern = contains_pattern("100%");
    let trees = TreeRepo::search(&pool, &pattern, TREE_SEARCH_LIMIT).await.unwrap();
    assert_eq!(trees.len(), 1);
    assert_eq!(trees[0].name, "100% canopy");
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn leaderboard_ranks_by_owned_trees(pool: PgPool) {
    plant(&pool, "Bob", "b1").await;
    for i in 0..3 {
        plant(&pool, "Alice", &format!("a{i}")).await;
    }

    let top = PlanterRepo::top_by_tree_count(&pool, 10).await.unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].name, "Alice");
    assert_eq!(top[0].tree_count, 3);
    assert_eq!(top[1].name, "Bob");
    assert_eq!(top[1].tree_count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn real_tree_flag_is_counted(pool: PgPool) {
    let tree = TreeRepo::plant(&pool, &planting("Alice", "Real"), origin())
        .await
        .unwrap();
    plant(&pool, "Alice", "Virtual").await;

    assert_eq!(TreeRepo::count_real(&pool).await.unwrap(), 0);
    sqlx::query("UPDATE trees SET is_real_tree_planted = true WHERE id = $1")
        .bind(tree.id)
        .execute(&pool)
        .await
        .unwrap();
    assert_eq!(TreeRepo::count_real(&pool).await.unwrap(), 1);
    assert!(TreeRepo::find_by_id(&pool, tree.id)
        .await
        .unwrap()
        .unwrap()
        .is_real_tree_planted);
    assert_eq!(TreeRepo::count(&pool).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_planter_cascades_to_trees(pool: PgPool) {
    let tree = TreeRepo::plant(&pool, &planting("Alice", "Doomed"), origin())
        .await
        .unwrap();

    sqlx::query("DELETE FROM planters WHERE id = $1")
        .bind(tree.planter_id)
        .execute(&pool)
        .await
        .unwrap();

    assert!(TreeRepo::find_by_id(&pool, tree.id).await.unwrap().is_none());
    assert!(all_planters(&pool).await.is_empty());
}
