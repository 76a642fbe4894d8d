//! crates/fitness_tracker_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific implementations like databases or remote APIs.

use async_trait::async_trait;

use crate::domain::{ExerciseFilter, User, UserCredentials, WorkoutRecord};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Per-user, append-only sequences of workout records.
///
/// Implementations serialize their own mutations; callers may share one store
/// across request handlers.
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Adds `record` to the end of the user's sequence, creating it if absent.
    /// Identical records are not deduplicated.
    async fn append(&self, user_id: i64, record: WorkoutRecord);

    /// The user's records in insertion order; empty if the user has none.
    async fn list(&self, user_id: i64) -> Vec<WorkoutRecord>;

    /// Drops every record for every user.
    async fn clear(&self);
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with [`PortError::Conflict`] when the username is taken.
    async fn create_user(&self, username: &str, hashed_password: &str) -> PortResult<User>;

    async fn get_user_by_username(&self, username: &str) -> PortResult<UserCredentials>;

    async fn update_password(&self, user_id: i64, hashed_password: &str) -> PortResult<()>;
}

#[async_trait]
pub trait ExerciseCatalogService: Send + Sync {
    /// Exercises matching the filter, as returned in the catalog's `results` list.
    async fn fetch_exercises(&self, filter: &ExerciseFilter) -> PortResult<Vec<serde_json::Value>>;

    /// The catalog's first page of English exercises, untouched.
    async fn list_exercises(&self) -> PortResult<serde_json::Value>;
}
