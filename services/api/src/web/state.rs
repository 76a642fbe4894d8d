//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use fitness_tracker_core::ports::{ExerciseCatalogService, UserRepository, WorkoutStore};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub workouts: Arc<dyn WorkoutStore>,
    pub catalog: Arc<dyn ExerciseCatalogService>,
}
