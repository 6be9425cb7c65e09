//! Route handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::response::{ApiError, ErrorBody};
use super::AppState;
use crate::error::FeedbackError;
use crate::intake::validation::leading_integer;
use crate::intake::{SubmissionAck, SubmissionRequest, SubmissionStats, SubmissionStatus};
use crate::roster::Employee;
use crate::storage::FeedbackRecord;

/// Liveness report
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server started
    pub uptime: f64,
    pub total_employees: usize,
}

pub async fn submit_feedback(
    State(state): State<AppState>,
    payload: Result<Json<SubmissionRequest>, JsonRejection>,
) -> Result<Json<SubmissionAck>, ApiError> {
    let Json(request) = payload?;

    state
        .service
        .submit(&request)
        .await
        .map(Json)
        .map_err(ApiError::context("Failed to save feedback"))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<SubmissionStats>, ApiError> {
    state
        .service
        .stats()
        .await
        .map(Json)
        .map_err(ApiError::context("Failed to fetch statistics"))
}

/// The path segment is read like a form field: `"5abc"` is employee 5
pub async fn check_submission(
    State(state): State<AppState>,
    Path(employee_number): Path<String>,
) -> Result<Json<SubmissionStatus>, ApiError> {
    let context = ApiError::context("Failed to check submission status");

    let number = leading_integer(&employee_number)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| context(FeedbackError::not_found("Employee not found")))?;

    state
        .service
        .check_submission(number)
        .await
        .map(Json)
        .map_err(context)
}

pub async fn list_employees(State(state): State<AppState>) -> Json<Vec<Employee>> {
    Json(state.service.roster().employees().to_vec())
}

pub async fn admin_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<FeedbackRecord>>, ApiError> {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    state
        .service
        .list_all(authorization)
        .await
        .map(Json)
        .map_err(ApiError::context("Failed to fetch feedback data"))
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK".to_string(),
        timestamp: Utc::now(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        total_employees: state.service.roster().len(),
    })
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new("Endpoint not found")),
    )
}
