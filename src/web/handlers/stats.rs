// Aggregation endpoints — read-only dashboard panels.
//
// GET /api/overview    — totals, status and severity groupings
// GET /api/categories  — reports per category
// GET /api/trends      — reports per month, trailing twelve months
// GET /api/locations   — top ten most-reported locations
// GET /api/severity    — reports per severity, critical first
// GET /api/milestones  — milestone progress
// GET /api/species     — sightings per species

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::db::models::{
    CategoryCount, LocationCount, MilestoneProgress, MonthlyCount, Overview, SeverityCount,
    SpeciesSightings,
};
use crate::db::queries::TOP_LOCATIONS;
use crate::web::{ApiError, AppState};

pub async fn overview(State(state): State<AppState>) -> Result<Json<Overview>, ApiError> {
    Ok(Json(state.db.overview().await?))
}

pub async fn categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryCount>>, ApiError> {
    Ok(Json(state.db.category_breakdown().await?))
}

/// The window ends at the current UTC month.
pub async fn trends(State(state): State<AppState>) -> Result<Json<Vec<MonthlyCount>>, ApiError> {
    let today = Utc::now().date_naive();
    Ok(Json(state.db.monthly_trend(today).await?))
}

pub async fn locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<LocationCount>>, ApiError> {
    Ok(Json(state.db.top_locations(TOP_LOCATIONS).await?))
}

pub async fn severity(
    State(state): State<AppState>,
) -> Result<Json<Vec<SeverityCount>>, ApiError> {
    Ok(Json(state.db.severity_breakdown().await?))
}

pub async fn milestones(
    State(state): State<AppState>,
) -> Result<Json<Vec<MilestoneProgress>>, ApiError> {
    Ok(Json(state.db.milestone_progress().await?))
}

pub async fn species(
    State(state): State<AppState>,
) -> Result<Json<Vec<SpeciesSightings>>, ApiError> {
    Ok(Json(state.db.species_sightings().await?))
}
