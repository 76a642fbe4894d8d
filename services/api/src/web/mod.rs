pub mod auth;
pub mod catalog;
pub mod extract;
pub mod rest;
pub mod state;
pub mod workouts;

// Re-export the router builder to make it easily accessible
// to the binary that serves it and to the integration tests.
pub use rest::{router, ApiDoc};
pub use state::AppState;
