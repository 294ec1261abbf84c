// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// No connection is held between calls. Each trait method opens a fresh
// Connection on tokio's blocking pool, runs one query function from
// queries.rs, and drops the connection before returning.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::Connection;

use super::models::{
    CategoryCount, LocationCount, MilestoneProgress, MonthlyCount, NewReport, Overview,
    ReportSummary, SeverityCount, SpeciesSightings,
};
use super::traits::Database;

pub struct SqliteDatabase {
    path: PathBuf,
}

impl SqliteDatabase {
    /// Point at an existing database file. Nothing is opened until a query runs.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open a connection, run `f` on the blocking pool, then close it.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = super::connect(&path)?;
            f(&conn)
        })
        .await
        .context("Database task panicked")?
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        self.with_conn(super::schema::table_count).await
    }

    async fn overview(&self) -> Result<Overview> {
        self.with_conn(super::queries::overview).await
    }

    async fn category_breakdown(&self) -> Result<Vec<CategoryCount>> {
        self.with_conn(super::queries::category_breakdown).await
    }

    async fn monthly_trend(&self, today: NaiveDate) -> Result<Vec<MonthlyCount>> {
        self.with_conn(move |conn| super::queries::monthly_trend(conn, today))
            .await
    }

    async fn top_locations(&self, limit: u32) -> Result<Vec<LocationCount>> {
        self.with_conn(move |conn| super::queries::top_locations(conn, limit))
            .await
    }

    async fn severity_breakdown(&self) -> Result<Vec<SeverityCount>> {
        self.with_conn(super::queries::severity_breakdown).await
    }

    async fn milestone_progress(&self) -> Result<Vec<MilestoneProgress>> {
        self.with_conn(super::queries::milestone_progress).await
    }

    async fn species_sightings(&self) -> Result<Vec<SpeciesSightings>> {
        self.with_conn(super::queries::species_sightings).await
    }

    async fn recent_reports(&self, limit: u32) -> Result<Vec<ReportSummary>> {
        self.with_conn(move |conn| super::queries::recent_reports(conn, limit))
            .await
    }

    async fn get_report(&self, id: i64) -> Result<Option<ReportSummary>> {
        self.with_conn(move |conn| super::queries::get_report(conn, id))
            .await
    }

    async fn create_report(&self, report: &NewReport) -> Result<i64> {
        let report = report.clone();
        self.with_conn(move |conn| super::queries::create_report(conn, &report))
            .await
    }

    async fn update_report_status(&self, id: i64, status: &str) -> Result<bool> {
        let status = status.to_string();
        self.with_conn(move |conn| super::queries::update_report_status(conn, id, &status))
            .await
    }
}
