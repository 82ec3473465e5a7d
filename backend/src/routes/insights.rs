//! Insights API routes

use crate::error::ApiError;
use crate::services::{ExportService, InsightsService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use trackwell_shared::types::{
    ConsistencyResponse, MonthViewQuery, MonthViewResponse, SleepCorrelationResponse, WindowQuery,
};
use trackwell_shared::DaySummary;
use uuid::Uuid;

/// Create insights routes
pub fn insights_routes() -> Router<AppState> {
    Router::new()
        .route("/:user_id/month/:month", get(get_month_view))
        .route("/:user_id/month/:month/export.csv", get(export_month_csv))
        .route("/:user_id/day/:date", get(get_day_summary))
        .route("/:user_id/consistency", get(get_consistency))
        .route("/:user_id/sleep-correlation", get(get_sleep_correlation))
}

/// GET /api/v1/insights/:user_id/month/:month - Month view
///
/// One summary per calendar day of `month` (YYYY-MM), with the best and
/// worst days marked by the requested metric (calories when omitted).
async fn get_month_view(
    State(state): State<AppState>,
    Path((user_id, month)): Path<(Uuid, String)>,
    Query(query): Query<MonthViewQuery>,
) -> Result<Json<MonthViewResponse>, ApiError> {
    let metric = query.metric.unwrap_or_default();
    let view = InsightsService::month_view(&state, user_id, &month, metric).await?;
    Ok(Json(view))
}

/// GET /api/v1/insights/:user_id/month/:month/export.csv - Month view as CSV
async fn export_month_csv(
    State(state): State<AppState>,
    Path((user_id, month)): Path<(Uuid, String)>,
    Query(query): Query<MonthViewQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let metric = query.metric.unwrap_or_default();
    let csv = ExportService::month_csv(&state, user_id, &month, metric).await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"month-view-export.csv\""),
    );

    Ok((headers, csv))
}

/// GET /api/v1/insights/:user_id/day/:date - Single day summary
async fn get_day_summary(
    State(state): State<AppState>,
    Path((user_id, date)): Path<(Uuid, String)>,
) -> Result<Json<DaySummary>, ApiError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| ApiError::Validation("date must be formatted as YYYY-MM-DD".to_string()))?;
    let summary = InsightsService::daily_summary(&state, user_id, date).await?;
    Ok(Json(summary))
}

/// GET /api/v1/insights/:user_id/consistency - Consistency scores
///
/// Scores the trailing window ending today (local time). `window_days`
/// defaults to 7 and is capped at 90; `calorie_goal` overrides the
/// configured default.
async fn get_consistency(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<ConsistencyResponse>, ApiError> {
    let response = InsightsService::consistency(&state, user_id, query).await?;
    Ok(Json(response))
}

/// GET /api/v1/insights/:user_id/sleep-correlation - Sleep vs next-day intake
async fn get_sleep_correlation(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<SleepCorrelationResponse>, ApiError> {
    let response = InsightsService::sleep_correlation(&state, user_id, query).await?;
    Ok(Json(response))
}
