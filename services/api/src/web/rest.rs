//! services/api/src/web/rest.rs
//!
//! Assembles the REST API: the route table, the health check, and the master
//! definition for the OpenAPI specification.

use crate::web::{
    auth::{self, create_account_handler, login_handler, update_password_handler},
    catalog::{self, get_exercises_handler, recommendations_handler},
    state::AppState,
    workouts::{self, log_workout_handler, progress_handler, view_workouts_handler},
};
use axum::{
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        auth::create_account_handler,
        auth::login_handler,
        auth::update_password_handler,
        workouts::log_workout_handler,
        workouts::view_workouts_handler,
        workouts::progress_handler,
        catalog::recommendations_handler,
        catalog::get_exercises_handler,
    ),
    components(
        schemas(
            HealthResponse,
            auth::CreateAccountRequest,
            auth::LoginRequest,
            auth::UpdatePasswordRequest,
            auth::MessageResponse,
            workouts::LogWorkoutRequest,
            workouts::WorkoutView,
            workouts::LogWorkoutResponse,
            workouts::WorkoutsResponse,
            workouts::ProgressView,
            workouts::ProgressResponse,
            workouts::ErrorResponse,
            catalog::RecommendationsResponse,
        )
    ),
    tags(
        (name = "accounts", description = "Account creation, login, and password changes"),
        (name = "workouts", description = "Workout logging and weekly progress"),
        (name = "exercises", description = "Exercise recommendations from the wger catalog")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Router
//=========================================================================================

/// Builds the application's routes over the shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/create-account", post(create_account_handler))
        .route("/login", post(login_handler))
        .route("/update-password", post(update_password_handler))
        .route("/log-workout", post(log_workout_handler))
        .route("/view-workouts", get(view_workouts_handler))
        .route("/progress", get(progress_handler))
        .route("/recommendations", get(recommendations_handler))
        .route("/get-exercises", get(get_exercises_handler))
        .with_state(state)
}

//=========================================================================================
// Health
//=========================================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Verify the service is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "The service is up", body = HealthResponse)
    )
)]
pub async fn health_handler() -> Json<HealthResponse> {
    debug!("Health check endpoint called");
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}
