//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod account_repo;
pub mod anonymous_planting_repo;
pub mod planter_repo;
pub mod session_repo;
pub mod tree_repo;

pub use account_repo::AccountRepo;
pub use anonymous_planting_repo::AnonymousPlantingRepo;
pub use planter_repo::PlanterRepo;
pub use session_repo::SessionRepo;
pub use tree_repo::TreeRepo;
