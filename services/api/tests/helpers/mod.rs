//! Shared fixtures for the HTTP integration tests.

#![allow(dead_code)]

pub mod axum_test;

use std::sync::Arc;

use api_lib::adapters::{InMemoryUserRepository, InMemoryWorkoutStore};
use api_lib::web::{router, AppState};
use async_trait::async_trait;
use axum::Router;
use fitness_tracker_core::domain::ExerciseFilter;
use fitness_tracker_core::ports::{ExerciseCatalogService, PortError, PortResult};
use serde_json::{json, Value};
use tokio::sync::Mutex;

/// A catalog that answers from memory and remembers the filters it was given.
#[derive(Default)]
pub struct FakeCatalog {
    pub exercises: Vec<Value>,
    pub unavailable: bool,
    pub seen_filters: Mutex<Vec<ExerciseFilter>>,
}

#[async_trait]
impl ExerciseCatalogService for FakeCatalog {
    async fn fetch_exercises(&self, filter: &ExerciseFilter) -> PortResult<Vec<Value>> {
        self.seen_filters.lock().await.push(filter.clone());
        if self.unavailable {
            return Ok(Vec::new());
        }
        Ok(self.exercises.clone())
    }

    async fn list_exercises(&self) -> PortResult<Value> {
        if self.unavailable {
            return Err(PortError::Unexpected("catalog down".to_string()));
        }
        Ok(json!({ "count": self.exercises.len(), "results": self.exercises }))
    }
}

/// A fresh application with empty stores.
pub struct TestApp {
    pub state: Arc<AppState>,
    pub catalog: Arc<FakeCatalog>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_catalog(FakeCatalog {
            exercises: vec![
                json!({"id": 1, "name": "Push-ups", "description": "Chest exercise"}),
                json!({"id": 2, "name": "Squats", "description": "Leg exercise"}),
            ],
            ..FakeCatalog::default()
        })
    }

    pub fn with_catalog(catalog: FakeCatalog) -> Self {
        let catalog = Arc::new(catalog);
        let state = Arc::new(AppState {
            users: Arc::new(InMemoryUserRepository::new()),
            workouts: Arc::new(InMemoryWorkoutStore::new()),
            catalog: catalog.clone(),
        });
        Self { state, catalog }
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }
}
