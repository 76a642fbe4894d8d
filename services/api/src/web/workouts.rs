//! services/api/src/web/workouts.rs
//!
//! Workout logging, history, and weekly progress endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use fitness_tracker_core::{
    aggregate_weekly, filter_by_date_range, parse_date, week_start, Metric, MetricValue,
    WeeklyProgress, WorkoutRecord,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::web::extract::{blank_as_none, ApiJson, ApiQuery};
use crate::web::state::AppState;

const SUCCESS: &str = "success";

//=========================================================================================
// API Payload Structs
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct LogWorkoutRequest {
    pub user_id: Option<i64>,
    pub exercise_id: Option<i64>,
    pub repetitions: Option<u32>,
    /// Kilograms; 0 when omitted.
    pub weight: Option<f64>,
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
    pub comment: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ViewWorkoutsQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub user_id: Option<i64>,
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProgressQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub user_id: Option<i64>,
    /// `weight` (default) or `repetitions`.
    pub metric: Option<String>,
}

/// A logged workout as returned to clients, without its owner.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WorkoutView {
    pub exercise_id: i64,
    pub repetitions: u32,
    pub weight: f64,
    pub date: String,
    pub comment: String,
}

impl From<&WorkoutRecord> for WorkoutView {
    fn from(record: &WorkoutRecord) -> Self {
        Self {
            exercise_id: record.exercise_id,
            repetitions: record.repetitions,
            weight: record.weight,
            date: record.date.clone(),
            comment: record.comment.clone(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct LogWorkoutResponse {
    pub status: String,
    pub workout: WorkoutView,
}

#[derive(Serialize, ToSchema)]
pub struct WorkoutsResponse {
    pub status: String,
    pub workouts: Vec<WorkoutView>,
}

/// Parallel arrays of Sunday week-starts and the metric summed over each week.
#[derive(Serialize, ToSchema)]
pub struct ProgressView {
    pub labels: Vec<String>,
    #[schema(value_type = Vec<f64>)]
    pub data: Vec<MetricValue>,
}

impl From<WeeklyProgress> for ProgressView {
    fn from(progress: WeeklyProgress) -> Self {
        Self {
            labels: progress.labels,
            data: progress.data,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ProgressResponse {
    pub status: String,
    pub progress: ProgressView,
}

/// The envelope of every failed workout or catalog request.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::BadRequest(format!("Missing required field: '{}'", field)))
}

fn date_bound(value: Option<&str>, name: &str) -> Result<Option<chrono::NaiveDate>, ApiError> {
    value
        .map(|raw| parse_date(raw).map_err(|e| ApiError::BadRequest(format!("Invalid {}: {}", name, e))))
        .transpose()
}

//=========================================================================================
// Handlers
//=========================================================================================

/// Log one workout entry for a user.
#[utoipa::path(
    post,
    path = "/log-workout",
    request_body = LogWorkoutRequest,
    responses(
        (status = 201, description = "Workout logged", body = LogWorkoutResponse),
        (status = 400, description = "Missing field, invalid value, or malformed body", body = ErrorResponse)
    ),
    tag = "workouts"
)]
pub async fn log_workout_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LogWorkoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let record = WorkoutRecord {
        user_id: required(req.user_id, "user_id")?,
        exercise_id: required(req.exercise_id, "exercise_id")?,
        repetitions: required(req.repetitions, "repetitions")?,
        weight: req.weight.unwrap_or(0.0),
        date: required(req.date, "date")?,
        comment: req.comment.unwrap_or_default(),
    };

    if record.weight < 0.0 {
        return Err(ApiError::BadRequest(
            "weight must be non-negative".to_string(),
        ));
    }
    parse_date(&record.date)
        .and_then(week_start)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let user_id = record.user_id;
    let workout = WorkoutView::from(&record);
    state.workouts.append(user_id, record).await;
    info!("Logged workout for user {}: {:?}", user_id, workout);

    Ok((
        StatusCode::CREATED,
        Json(LogWorkoutResponse {
            status: SUCCESS.to_string(),
            workout,
        }),
    ))
}

/// List a user's workouts, optionally restricted to an inclusive date range.
#[utoipa::path(
    get,
    path = "/view-workouts",
    params(ViewWorkoutsQuery),
    responses(
        (status = 200, description = "Workouts retrieved", body = WorkoutsResponse),
        (status = 400, description = "Missing user_id or malformed date bound", body = ErrorResponse),
        (status = 500, description = "A stored record has a malformed date", body = ErrorResponse)
    ),
    tag = "workouts"
)]
pub async fn view_workouts_handler(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<ViewWorkoutsQuery>,
) -> Result<Json<WorkoutsResponse>, ApiError> {
    let user_id = query
        .user_id
        .ok_or_else(|| ApiError::BadRequest("Missing user_id".to_string()))?;
    let start = date_bound(query.start_date.as_deref(), "start_date")?;
    let end = date_bound(query.end_date.as_deref(), "end_date")?;

    let records = state.workouts.list(user_id).await;
    let workouts = filter_by_date_range(&records, start, end)?
        .into_iter()
        .map(WorkoutView::from)
        .collect();

    Ok(Json(WorkoutsResponse {
        status: SUCCESS.to_string(),
        workouts,
    }))
}

/// Weekly progress of one metric, for charting.
#[utoipa::path(
    get,
    path = "/progress",
    params(ProgressQuery),
    responses(
        (status = 200, description = "Weekly totals computed", body = ProgressResponse),
        (status = 400, description = "Missing user_id or invalid metric", body = ErrorResponse),
        (status = 500, description = "A stored record has a malformed date", body = ErrorResponse)
    ),
    tag = "workouts"
)]
pub async fn progress_handler(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<ProgressQuery>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let user_id = query
        .user_id
        .ok_or_else(|| ApiError::BadRequest("Missing user_id".to_string()))?;
    let metric = match query.metric.as_deref() {
        Some(name) => name.parse::<Metric>()?,
        None => Metric::default(),
    };

    let records = state.workouts.list(user_id).await;
    let progress = aggregate_weekly(&records, metric)?;

    Ok(Json(ProgressResponse {
        status: SUCCESS.to_string(),
        progress: progress.into(),
    }))
}
