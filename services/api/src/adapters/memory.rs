//! services/api/src/adapters/memory.rs
//!
//! Process-local implementations of the storage ports. Workout records only
//! ever live here; users live here when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use fitness_tracker_core::domain::{User, UserCredentials, WorkoutRecord};
use fitness_tracker_core::ports::{PortError, PortResult, UserRepository, WorkoutStore};
use tokio::sync::RwLock;
use tracing::debug;

//=========================================================================================
// Workout Records
//=========================================================================================

/// Append-only workout logs keyed by user id. One lock guards the whole map,
/// so concurrent appends to the same user are serialized.
#[derive(Default)]
pub struct InMemoryWorkoutStore {
    logs: RwLock<HashMap<i64, Vec<WorkoutRecord>>>,
}

impl InMemoryWorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkoutStore for InMemoryWorkoutStore {
    async fn append(&self, user_id: i64, record: WorkoutRecord) {
        let mut logs = self.logs.write().await;
        let entries = logs.entry(user_id).or_default();
        entries.push(record);
        debug!("User {} now has {} workout records", user_id, entries.len());
    }

    async fn list(&self, user_id: i64) -> Vec<WorkoutRecord> {
        self.logs
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn clear(&self) {
        self.logs.write().await.clear();
    }
}

//=========================================================================================
// Users
//=========================================================================================

#[derive(Default)]
struct UserTable {
    by_username: HashMap<String, UserCredentials>,
    last_id: i64,
}

/// A `UserRepository` for development and tests. Ids start at 1, like a serial column.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, username: &str, hashed_password: &str) -> PortResult<User> {
        let mut table = self.table.write().await;
        if table.by_username.contains_key(username) {
            return Err(PortError::Conflict(format!(
                "Username {} already exists",
                username
            )));
        }

        table.last_id += 1;
        let credentials = UserCredentials {
            user_id: table.last_id,
            username: username.to_string(),
            hashed_password: hashed_password.to_string(),
        };
        table
            .by_username
            .insert(username.to_string(), credentials.clone());

        Ok(User {
            user_id: credentials.user_id,
            username: credentials.username,
        })
    }

    async fn get_user_by_username(&self, username: &str) -> PortResult<UserCredentials> {
        self.table
            .read()
            .await
            .by_username
            .get(username)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", username)))
    }

    async fn update_password(&self, user_id: i64, hashed_password: &str) -> PortResult<()> {
        let mut table = self.table.write().await;
        let credentials = table
            .by_username
            .values_mut()
            .find(|c| c.user_id == user_id)
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", user_id)))?;
        credentials.hashed_password = hashed_password.to_string();
        Ok(())
    }
}
