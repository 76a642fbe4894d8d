//! services/api/src/web/catalog.rs
//!
//! Exercise recommendations proxied from the external catalog.

use axum::{extract::State, http::StatusCode, Json};
use fitness_tracker_core::ExerciseFilter;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::web::extract::ApiQuery;
use crate::web::state::AppState;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecommendationsQuery {
    /// Catalog category id.
    pub category: Option<String>,
    /// Catalog equipment id.
    pub equipment: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RecommendationsResponse {
    pub status: String,
    #[schema(value_type = Vec<Object>)]
    pub exercises: Vec<Value>,
}

/// Fetch exercise recommendations, optionally filtered by category and equipment.
#[utoipa::path(
    get,
    path = "/recommendations",
    params(RecommendationsQuery),
    responses(
        (status = 200, description = "Exercises retrieved (empty if the catalog is unavailable)", body = RecommendationsResponse),
        (status = 500, description = "Unreadable catalog response", body = crate::web::workouts::ErrorResponse)
    ),
    tag = "exercises"
)]
pub async fn recommendations_handler(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<RecommendationsQuery>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let filter = ExerciseFilter {
        category: query.category,
        equipment: query.equipment,
    };
    let exercises = state.catalog.fetch_exercises(&filter).await?;

    Ok(Json(RecommendationsResponse {
        status: "success".to_string(),
        exercises,
    }))
}

/// Pass the catalog's English exercise listing straight through.
#[utoipa::path(
    get,
    path = "/get-exercises",
    responses(
        (status = 200, description = "The catalog page, untouched"),
        (status = 500, description = "The catalog could not be reached")
    ),
    tag = "exercises"
)]
pub async fn get_exercises_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state.catalog.list_exercises().await.map(Json).map_err(|e| {
        error!("Failed to fetch exercises: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to fetch exercises" })),
        )
    })
}
