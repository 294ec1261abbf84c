// Data models — Rust structs that map to database rows and API payloads.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ordinal impact classification of a report.
///
/// Variant order is display order: `Critical` sorts first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Accepts exactly the lowercase names, the same rule serde and the
/// `reports.severity` CHECK constraint apply.
impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            other => Err(format!("unknown severity '{other}'")),
        }
    }
}

/// Status labels the dashboard calls out. Status is free-form text; these are
/// just the well-known values.
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_RESOLVED: &str = "resolved";

/// Fields for inserting a report. Defaults are applied by the caller.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub category_id: i64,
    pub location_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub status: String,
}

impl NewReport {
    /// A report with only the required fields set; everything else defaulted.
    pub fn new(category_id: i64, title: impl Into<String>) -> Self {
        Self {
            category_id,
            location_id: None,
            title: title.into(),
            description: String::new(),
            severity: Severity::default(),
            status: STATUS_PENDING.to_string(),
        }
    }
}

/// A stored report joined with its category and location for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub id: i64,
    pub category_id: i64,
    pub location_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub category_name: String,
    pub category_icon: String,
    pub location_name: Option<String>,
    pub location_city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCount {
    pub severity: Severity,
    pub count: i64,
}

/// Dashboard headline numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overview {
    pub total_reports: i64,
    pub by_status: Vec<StatusCount>,
    pub by_severity: Vec<SeverityCount>,
    pub pending: i64,
    pub resolved: i64,
    pub critical: i64,
}

impl Overview {
    /// Build the overview, pulling the convenience counts out of the groupings.
    pub fn new(
        total_reports: i64,
        by_status: Vec<StatusCount>,
        by_severity: Vec<SeverityCount>,
    ) -> Self {
        let status_count = |label: &str| {
            by_status
                .iter()
                .find(|s| s.status == label)
                .map_or(0, |s| s.count)
        };
        let pending = status_count(STATUS_PENDING);
        let resolved = status_count(STATUS_RESOLVED);
        let critical = by_severity
            .iter()
            .find(|s| s.severity == Severity::Critical)
            .map_or(0, |s| s.count);

        Self {
            total_reports,
            by_status,
            by_severity,
            pending,
            resolved,
            critical,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub count: i64,
}

/// Report count for one calendar month, keyed "YYYY-MM".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationCount {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub region: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneProgress {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub milestone_type: Option<String>,
    pub target_count: i64,
    pub current_count: i64,
    pub achieved: bool,
    /// `None` when the milestone has no target (target_count == 0).
    pub progress_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesSightings {
    pub id: i64,
    pub common_name: String,
    pub scientific_name: Option<String>,
    pub conservation_status: Option<String>,
    pub sighting_count: i64,
}

/// Percentage of `current` towards `target`, rounded to two decimals.
///
/// Returns `None` for a zero or negative target, where the ratio is undefined.
pub fn progress_percentage(current: i64, target: i64) -> Option<f64> {
    if target <= 0 {
        return None;
    }
    let pct = current as f64 / target as f64 * 100.0;
    Some((pct * 100.0).round() / 100.0)
}
