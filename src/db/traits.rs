// Database trait — async interface for every dashboard query and report write.
//
// Implementor: SqliteDatabase (opens a rusqlite connection per call). The
// trait mirrors the queries.rs function signatures so handlers can hold an
// `Arc<dyn Database>` and tests can swap in a different backend.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use super::models::{
    CategoryCount, LocationCount, MilestoneProgress, MonthlyCount, NewReport, Overview,
    ReportSummary, SeverityCount, SpeciesSightings,
};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Aggregations ---

    /// Total report count plus status and severity groupings.
    async fn overview(&self) -> Result<Overview>;

    /// Report counts per category, zero-count categories included.
    async fn category_breakdown(&self) -> Result<Vec<CategoryCount>>;

    /// Monthly counts for the trailing twelve months ending at `today`'s month.
    async fn monthly_trend(&self, today: NaiveDate) -> Result<Vec<MonthlyCount>>;

    /// Locations with at least one report, most-reported first.
    async fn top_locations(&self, limit: u32) -> Result<Vec<LocationCount>>;

    /// Report counts per severity, critical first.
    async fn severity_breakdown(&self) -> Result<Vec<SeverityCount>>;

    /// Milestones with computed progress, furthest along first.
    async fn milestone_progress(&self) -> Result<Vec<MilestoneProgress>>;

    /// Sighting counts per species, never-sighted species included.
    async fn species_sightings(&self) -> Result<Vec<SpeciesSightings>>;

    // --- Reports ---

    /// The most recent reports, newest first.
    async fn recent_reports(&self, limit: u32) -> Result<Vec<ReportSummary>>;

    /// A single report by id.
    async fn get_report(&self, id: i64) -> Result<Option<ReportSummary>>;

    /// Insert a report and return its id.
    async fn create_report(&self, report: &NewReport) -> Result<i64>;

    /// Change a report's status. Returns `false` if the id doesn't exist.
    async fn update_report_status(&self, id: i64, status: &str) -> Result<bool>;
}
