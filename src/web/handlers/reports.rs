// Report endpoints.
//
// GET  /api/reports?limit=N — most recent reports (default 10, max 500)
// GET  /api/reports/{id}    — single report
// POST /api/reports         — create a report, 201 with the new id
// PUT  /api/reports/{id}    — change a report's status, 404 if it doesn't exist

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::db::models::{NewReport, ReportSummary, Severity, STATUS_PENDING};
use crate::web::error::AppJson;
use crate::web::{ApiError, AppState};

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 500;

#[derive(Deserialize, Default)]
pub struct ReportsQuery {
    /// Kept as text so a malformed value gets our own 400 message.
    pub limit: Option<String>,
}

impl ReportsQuery {
    /// The requested row count, defaulted and capped.
    pub fn limit(&self) -> Result<u32, ApiError> {
        match self.limit.as_deref() {
            None => Ok(DEFAULT_LIMIT),
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map(|n| n.min(MAX_LIMIT))
                .map_err(|_| {
                    ApiError::BadRequest(format!(
                        "limit must be a non-negative integer, got '{raw}'"
                    ))
                }),
        }
    }
}

/// Body of POST /api/reports. Required fields are optional here so their
/// absence is reported as a 400 with a clear message.
#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    pub category_id: Option<i64>,
    pub title: Option<String>,
    pub location_id: Option<i64>,
    pub description: Option<String>,
    pub severity: Option<Severity>,
    pub status: Option<String>,
}

impl CreateReportRequest {
    /// Check required fields and apply defaults.
    pub fn into_new_report(self) -> Result<NewReport, ApiError> {
        let category_id = self
            .category_id
            .ok_or_else(|| ApiError::BadRequest("category_id is required".to_string()))?;
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest("title is required".to_string()))?;

        Ok(NewReport {
            category_id,
            location_id: self.location_id,
            title,
            description: self.description.unwrap_or_default(),
            severity: self.severity.unwrap_or_default(),
            status: self.status.unwrap_or_else(|| STATUS_PENDING.to_string()),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// GET /api/reports — recent reports, newest first.
pub async fn list_reports(
    State(state): State<AppState>,
    Query(params): Query<ReportsQuery>,
) -> Result<Json<Vec<ReportSummary>>, ApiError> {
    let limit = params.limit()?;
    Ok(Json(state.db.recent_reports(limit).await?))
}

/// GET /api/reports/{id}
pub async fn get_report(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ReportSummary>, ApiError> {
    let id = report_id(id)?;
    match state.db.get_report(id).await? {
        Some(report) => Ok(Json(report)),
        None => Err(not_found(id)),
    }
}

/// POST /api/reports
pub async fn create_report(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateReportRequest>,
) -> Result<Response, ApiError> {
    let report = body.into_new_report()?;
    let report_id = state.db.create_report(&report).await?;
    info!(report_id, category_id = report.category_id, "Report created");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "report_id": report_id })),
    )
        .into_response())
}

/// PUT /api/reports/{id}
pub async fn update_report(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    AppJson(body): AppJson<UpdateStatusRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = report_id(id)?;
    let status = body
        .status
        .ok_or_else(|| ApiError::BadRequest("status is required".to_string()))?;

    if !state.db.update_report_status(id, &status).await? {
        return Err(not_found(id));
    }
    info!(report_id = id, status = %status, "Report status updated");

    Ok(Json(serde_json::json!({ "success": true })))
}

fn report_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::BadRequest("report id must be an integer".to_string()))
}

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Report {id} not found"))
}
