pub mod db;
pub mod memory;
pub mod wger;

pub use db::DbAdapter;
pub use memory::{InMemoryUserRepository, InMemoryWorkoutStore};
pub use wger::WgerCatalogAdapter;
