// Database queries — aggregations and report writes.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.
// Each function issues its SQL against the connection it is handed; callers
// decide how long that connection lives.

use std::collections::HashMap;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{
    progress_percentage, CategoryCount, LocationCount, MilestoneProgress, MonthlyCount,
    NewReport, Overview, ReportSummary, Severity, SeverityCount, SpeciesSightings, StatusCount,
};

/// Number of months covered by the trend query, current month included.
pub const TREND_MONTHS: i32 = 12;

/// Number of rows in the location ranking.
pub const TOP_LOCATIONS: u32 = 10;

// Fixed display order for severities; anything unexpected sorts last.
const SEVERITY_ORDER: &str = "CASE severity
        WHEN 'critical' THEN 1
        WHEN 'high' THEN 2
        WHEN 'medium' THEN 3
        WHEN 'low' THEN 4
        ELSE 5
    END";

const REPORT_SUMMARY_SELECT: &str = "
    SELECT r.id, r.category_id, r.location_id, r.title, r.description,
           r.severity, r.status, r.created_at, r.updated_at,
           c.name, c.icon, l.name, l.city
    FROM reports r
    JOIN categories c ON c.id = r.category_id
    LEFT JOIN locations l ON l.id = r.location_id";

// --- Overview ---

/// Headline totals plus the status and severity groupings.
///
/// The three statements share one read transaction, so `total_reports`
/// always equals the sum of the `by_status` counts.
pub fn overview(conn: &Connection) -> Result<Overview> {
    let tx = conn.unchecked_transaction()?;

    let total: i64 = tx.query_row("SELECT COUNT(*) FROM reports", [], |row| row.get(0))?;
    let by_status = status_breakdown(&tx)?;
    let by_severity = severity_breakdown(&tx)?;

    tx.commit()?;
    Ok(Overview::new(total, by_status, by_severity))
}

/// Report counts per status, largest first.
pub fn status_breakdown(conn: &Connection) -> Result<Vec<StatusCount>> {
    let mut stmt = conn.prepare(
        "SELECT status, COUNT(*) AS count
         FROM reports
         GROUP BY status
         ORDER BY count DESC, status",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(StatusCount {
            status: row.get(0)?,
            count: row.get(1)?,
        })
    })?;

    let mut counts = Vec::new();
    for row in rows {
        counts.push(row?);
    }
    Ok(counts)
}

/// Report counts per severity, critical first.
///
/// Severities with no reports are omitted rather than reported as zero.
pub fn severity_breakdown(conn: &Connection) -> Result<Vec<SeverityCount>> {
    let sql = format!(
        "SELECT severity, COUNT(*) AS count
         FROM reports
         GROUP BY severity
         ORDER BY {SEVERITY_ORDER}"
    );
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt.query_map([], |row| {
        Ok(SeverityCount {
            severity: severity_at(row, 0)?,
            count: row.get(1)?,
        })
    })?;

    let mut counts = Vec::new();
    for row in rows {
        counts.push(row?);
    }
    Ok(counts)
}

// --- Breakdowns and rankings ---

/// Report counts per category. Categories without reports are included.
pub fn category_breakdown(conn: &Connection) -> Result<Vec<CategoryCount>> {
    let mut stmt = conn.prepare(
        "SELECT c.id, c.name, c.icon, COUNT(r.id) AS count
         FROM categories c
         LEFT JOIN reports r ON r.category_id = c.id
         GROUP BY c.id, c.name, c.icon
         ORDER BY count DESC, c.name",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(CategoryCount {
            id: row.get(0)?,
            name: row.get(1)?,
            icon: row.get(2)?,
            count: row.get(3)?,
        })
    })?;

    let mut categories = Vec::new();
    for row in rows {
        categories.push(row?);
    }
    Ok(categories)
}

/// Monthly report counts for the `TREND_MONTHS` months ending with the month
/// containing `today`, oldest first. Months without reports count as zero.
pub fn monthly_trend(conn: &Connection, today: NaiveDate) -> Result<Vec<MonthlyCount>> {
    let last = month_index(today);
    let first = last - (TREND_MONTHS - 1);
    let window_start = format!("{}-01", month_key(first));
    let window_end = format!("{}-01", month_key(last + 1));

    let mut stmt = conn.prepare(
        "SELECT strftime('%Y-%m', created_at) AS month, COUNT(*) AS count
         FROM reports
         WHERE created_at >= ?1 AND created_at < ?2
         GROUP BY month",
    )?;

    let rows = stmt.query_map(params![window_start, window_end], |row| {
        Ok((row.get::<_, Option<String>>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut counts: HashMap<String, i64> = HashMap::new();
    for row in rows {
        // Unparseable timestamps yield a NULL month; they can't be bucketed.
        if let (Some(month), count) = row? {
            counts.insert(month, count);
        }
    }

    Ok((first..=last)
        .map(|index| {
            let month = month_key(index);
            let count = counts.get(&month).copied().unwrap_or(0);
            MonthlyCount { month, count }
        })
        .collect())
}

/// The most-reported locations, largest first. Locations without any reports
/// never appear.
pub fn top_locations(conn: &Connection, limit: u32) -> Result<Vec<LocationCount>> {
    let mut stmt = conn.prepare(
        "SELECT l.id, l.name, l.city, l.region, COUNT(r.id) AS count
         FROM locations l
         LEFT JOIN reports r ON r.location_id = l.id
         GROUP BY l.id
         HAVING count > 0
         ORDER BY count DESC, l.name
         LIMIT ?1",
    )?;

    let rows = stmt.query_map(params![limit], |row| {
        Ok(LocationCount {
            id: row.get(0)?,
            name: row.get(1)?,
            city: row.get(2)?,
            region: row.get(3)?,
            count: row.get(4)?,
        })
    })?;

    let mut locations = Vec::new();
    for row in rows {
        locations.push(row?);
    }
    Ok(locations)
}

/// All milestones with their progress, furthest along first. Milestones
/// without a target have no percentage and sort last.
pub fn milestone_progress(conn: &Connection) -> Result<Vec<MilestoneProgress>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, description, milestone_type, target_count, current_count, achieved
         FROM milestones
         ORDER BY id",
    )?;

    let rows = stmt.query_map([], |row| {
        let target_count: i64 = row.get(4)?;
        let current_count: i64 = row.get(5)?;
        Ok(MilestoneProgress {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            milestone_type: row.get(3)?,
            target_count,
            current_count,
            achieved: row.get::<_, i32>(6)? != 0,
            progress_percentage: progress_percentage(current_count, target_count),
        })
    })?;

    let mut milestones = Vec::new();
    for row in rows {
        milestones.push(row?);
    }

    // Option orders None below Some, so a descending sort puts undefined last.
    milestones.sort_by(|a, b| {
        b.progress_percentage
            .partial_cmp(&a.progress_percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(milestones)
}

/// Sighting counts per species. Species never sighted are included.
pub fn species_sightings(conn: &Connection) -> Result<Vec<SpeciesSightings>> {
    let mut stmt = conn.prepare(
        "SELECT s.id, s.common_name, s.scientific_name, s.conservation_status,
                COUNT(ws.id) AS sighting_count
         FROM species s
         LEFT JOIN wildlife_sightings ws ON ws.species_id = s.id
         GROUP BY s.id
         ORDER BY sighting_count DESC, s.common_name",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(SpeciesSightings {
            id: row.get(0)?,
            common_name: row.get(1)?,
            scientific_name: row.get(2)?,
            conservation_status: row.get(3)?,
            sighting_count: row.get(4)?,
        })
    })?;

    let mut species = Vec::new();
    for row in rows {
        species.push(row?);
    }
    Ok(species)
}

// --- Reports ---

/// The `limit` most recently created reports, newest first.
pub fn recent_reports(conn: &Connection, limit: u32) -> Result<Vec<ReportSummary>> {
    let sql = format!("{REPORT_SUMMARY_SELECT} ORDER BY r.created_at DESC, r.id DESC LIMIT ?1");
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt.query_map(params![limit], summary_from_row)?;

    let mut reports = Vec::new();
    for row in rows {
        reports.push(row?);
    }
    Ok(reports)
}

/// Look up a single report by id.
pub fn get_report(conn: &Connection, id: i64) -> Result<Option<ReportSummary>> {
    let sql = format!("{REPORT_SUMMARY_SELECT} WHERE r.id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let result = stmt.query_row(params![id], summary_from_row).optional()?;
    Ok(result)
}

/// Insert a report stamped with the current time and return its id.
pub fn create_report(conn: &Connection, report: &NewReport) -> Result<i64> {
    conn.execute(
        "INSERT INTO reports (category_id, location_id, title, description, severity, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            report.category_id,
            report.location_id,
            report.title,
            report.description,
            report.severity.as_str(),
            report.status,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a report with an explicit creation time (used for seeding history).
/// `created_at` must be in the `YYYY-MM-DD HH:MM:SS.SSS` format.
pub fn insert_report_at(conn: &Connection, report: &NewReport, created_at: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO reports
            (category_id, location_id, title, description, severity, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        params![
            report.category_id,
            report.location_id,
            report.title,
            report.description,
            report.severity.as_str(),
            report.status,
            created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Set a report's status and refresh `updated_at`.
///
/// `updated_at` always lands at least one millisecond after `created_at`,
/// even when the update arrives within the same clock tick as the insert.
/// Returns `false` when no report has the given id.
pub fn update_report_status(conn: &Connection, id: i64, status: &str) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE reports
         SET status = ?1,
             updated_at = MAX(
                 strftime('%Y-%m-%d %H:%M:%f', 'now'),
                 strftime('%Y-%m-%d %H:%M:%f', created_at, '+0.001 seconds')
             )
         WHERE id = ?2",
        params![status, id],
    )?;
    Ok(changed > 0)
}

// --- Reference data ---

/// Whether any categories exist yet (i.e. the database has been seeded).
pub fn has_reference_data(conn: &Connection) -> Result<bool> {
    let present: bool =
        conn.query_row("SELECT COUNT(*) > 0 FROM categories", [], |row| row.get(0))?;
    Ok(present)
}

pub fn insert_category(conn: &Connection, name: &str, icon: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO categories (name, icon) VALUES (?1, ?2)",
        params![name, icon],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_location(
    conn: &Connection,
    name: &str,
    city: Option<&str>,
    region: Option<&str>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO locations (name, city, region) VALUES (?1, ?2, ?3)",
        params![name, city, region],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_species(
    conn: &Connection,
    common_name: &str,
    scientific_name: Option<&str>,
    conservation_status: Option<&str>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO species (common_name, scientific_name, conservation_status)
         VALUES (?1, ?2, ?3)",
        params![common_name, scientific_name, conservation_status],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_sighting(
    conn: &Connection,
    species_id: i64,
    location_id: Option<i64>,
    sighted_at: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO wildlife_sightings (species_id, location_id, sighted_at)
         VALUES (?1, ?2, ?3)",
        params![species_id, location_id, sighted_at],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_milestone(
    conn: &Connection,
    title: &str,
    description: &str,
    milestone_type: Option<&str>,
    target_count: i64,
    current_count: i64,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO milestones
            (title, description, milestone_type, target_count, current_count, achieved)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            title,
            description,
            milestone_type,
            target_count,
            current_count,
            target_count > 0 && current_count >= target_count,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// --- Row helpers ---

fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<ReportSummary> {
    Ok(ReportSummary {
        id: row.get(0)?,
        category_id: row.get(1)?,
        location_id: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        severity: severity_at(row, 5)?,
        status: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
        category_name: row.get(9)?,
        category_icon: row.get(10)?,
        location_name: row.get(11)?,
        location_city: row.get(12)?,
    })
}

fn severity_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Severity> {
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, e.into())
    })
}

/// Months since year 0, so month arithmetic is plain integer math.
fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

/// "YYYY-MM" for a `month_index` value.
fn month_key(index: i32) -> String {
    format!("{:04}-{:02}", index.div_euclid(12), index.rem_euclid(12) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", "ON").unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    /// Two categories, two locations, no reports.
    fn with_reference_data(conn: &Connection) -> (i64, i64, i64, i64) {
        let air = insert_category(conn, "Air Pollution", "🏭").unwrap();
        let water = insert_category(conn, "Water Contamination", "💧").unwrap();
        let harbor = insert_location(conn, "Harbor Point", Some("Portside"), Some("Coast")).unwrap();
        let ridge = insert_location(conn, "Pine Ridge", Some("Highfield"), Some("North")).unwrap();
        (air, water, harbor, ridge)
    }

    fn report(category_id: i64, title: &str, severity: Severity, status: &str) -> NewReport {
        NewReport {
            severity,
            status: status.to_string(),
            ..NewReport::new(category_id, title)
        }
    }

    #[test]
    fn test_overview_empty_database() {
        let conn = test_db();
        let overview = overview(&conn).unwrap();
        assert_eq!(overview.total_reports, 0);
        assert!(overview.by_status.is_empty());
        assert!(overview.by_severity.is_empty());
        assert_eq!(overview.pending, 0);
        assert_eq!(overview.resolved, 0);
        assert_eq!(overview.critical, 0);
    }

    #[test]
    fn test_overview_counts() {
        let conn = test_db();
        let (air, water, _, _) = with_reference_data(&conn);
        create_report(&conn, &report(air, "Smog", Severity::Critical, "pending")).unwrap();
        create_report(&conn, &report(air, "Soot", Severity::Low, "resolved")).unwrap();
        create_report(&conn, &report(water, "Algae", Severity::Critical, "pending")).unwrap();
        create_report(&conn, &report(water, "Runoff", Severity::High, "in_progress")).unwrap();

        let overview = overview(&conn).unwrap();
        assert_eq!(overview.total_reports, 4);
        assert_eq!(overview.pending, 2);
        assert_eq!(overview.resolved, 1);
        assert_eq!(overview.critical, 2);
        let status_sum: i64 = overview.by_status.iter().map(|s| s.count).sum();
        assert_eq!(status_sum, overview.total_reports);
    }

    #[test]
    fn test_severity_breakdown_order_and_omission() {
        let conn = test_db();
        let (air, _, _, _) = with_reference_data(&conn);
        create_report(&conn, &report(air, "a", Severity::Low, "pending")).unwrap();
        create_report(&conn, &report(air, "b", Severity::Critical, "pending")).unwrap();
        create_report(&conn, &report(air, "c", Severity::Low, "pending")).unwrap();
        create_report(&conn, &report(air, "d", Severity::Medium, "pending")).unwrap();

        let breakdown = severity_breakdown(&conn).unwrap();
        assert_eq!(
            breakdown,
            vec![
                SeverityCount { severity: Severity::Critical, count: 1 },
                SeverityCount { severity: Severity::Medium, count: 1 },
                SeverityCount { severity: Severity::Low, count: 2 },
            ]
        );
    }

    #[test]
    fn test_category_breakdown_includes_empty_categories() {
        let conn = test_db();
        let (air, _, _, _) = with_reference_data(&conn);
        create_report(&conn, &report(air, "Smog", Severity::High, "pending")).unwrap();

        let categories = category_breakdown(&conn).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Air Pollution");
        assert_eq!(categories[0].count, 1);
        assert_eq!(categories[1].name, "Water Contamination");
        assert_eq!(categories[1].count, 0);
    }

    #[test]
    fn test_monthly_trend_fills_twelve_months() {
        let conn = test_db();
        let (air, _, _, _) = with_reference_data(&conn);
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();

        let r = report(air, "x", Severity::Low, "pending");
        insert_report_at(&conn, &r, "2026-03-01 08:00:00.000").unwrap();
        insert_report_at(&conn, &r, "2026-03-14 09:30:00.000").unwrap();
        insert_report_at(&conn, &r, "2025-04-30 23:59:59.999").unwrap();
        // Outside the window on both sides
        insert_report_at(&conn, &r, "2025-03-31 12:00:00.000").unwrap();
        insert_report_at(&conn, &r, "2026-04-01 00:00:00.000").unwrap();

        let trend = monthly_trend(&conn, today).unwrap();
        assert_eq!(trend.len(), 12);
        assert_eq!(trend.first().unwrap().month, "2025-04");
        assert_eq!(trend.last().unwrap().month, "2026-03");
        assert_eq!(trend.first().unwrap().count, 1);
        assert_eq!(trend.last().unwrap().count, 2);
        let total: i64 = trend.iter().map(|m| m.count).sum();
        assert_eq!(total, 3);

        let months: Vec<&str> = trend.iter().map(|m| m.month.as_str()).collect();
        let mut sorted = months.clone();
        sorted.sort();
        assert_eq!(months, sorted);
    }

    #[test]
    fn test_monthly_trend_crosses_year_boundary() {
        let conn = test_db();
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let trend = monthly_trend(&conn, today).unwrap();
        assert_eq!(trend[0].month, "2025-02");
        assert_eq!(trend[10].month, "2025-12");
        assert_eq!(trend[11].month, "2026-01");
        assert!(trend.iter().all(|m| m.count == 0));
    }

    #[test]
    fn test_top_locations_excludes_unreported() {
        let conn = test_db();
        let (air, _, harbor, _ridge) = with_reference_data(&conn);
        let mut r = report(air, "Smog", Severity::High, "pending");
        r.location_id = Some(harbor);
        create_report(&conn, &r).unwrap();
        create_report(&conn, &r).unwrap();
        // No location at all
        create_report(&conn, &report(air, "Haze", Severity::Low, "pending")).unwrap();

        let locations = top_locations(&conn, TOP_LOCATIONS).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "Harbor Point");
        assert_eq!(locations[0].city.as_deref(), Some("Portside"));
        assert_eq!(locations[0].count, 2);
    }

    #[test]
    fn test_top_locations_respects_limit() {
        let conn = test_db();
        let air = insert_category(&conn, "Air", "a").unwrap();
        for i in 0..15 {
            let loc = insert_location(&conn, &format!("Site {i:02}"), None, None).unwrap();
            let mut r = report(air, "x", Severity::Low, "pending");
            r.location_id = Some(loc);
            for _ in 0..=i {
                create_report(&conn, &r).unwrap();
            }
        }

        let locations = top_locations(&conn, TOP_LOCATIONS).unwrap();
        assert_eq!(locations.len(), 10);
        assert_eq!(locations[0].name, "Site 14");
        assert_eq!(locations[0].count, 15);
        assert!(locations.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_milestone_progress_sorted_with_undefined_last() {
        let conn = test_db();
        insert_milestone(&conn, "Third", "", Some("reports"), 3, 1).unwrap();
        insert_milestone(&conn, "Untargeted", "", None, 0, 5).unwrap();
        insert_milestone(&conn, "Done", "", Some("cleanups"), 10, 10).unwrap();

        let milestones = milestone_progress(&conn).unwrap();
        let titles: Vec<&str> = milestones.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Done", "Third", "Untargeted"]);
        assert_eq!(milestones[0].progress_percentage, Some(100.0));
        assert!(milestones[0].achieved);
        assert_eq!(milestones[1].progress_percentage, Some(33.33));
        assert!(!milestones[1].achieved);
        assert_eq!(milestones[2].progress_percentage, None);
    }

    #[test]
    fn test_species_sightings_include_unsighted() {
        let conn = test_db();
        let otter = insert_species(&conn, "Sea Otter", Some("Enhydra lutris"), Some("Endangered"))
            .unwrap();
        insert_species(&conn, "Snowy Owl", Some("Bubo scandiacus"), Some("Vulnerable")).unwrap();
        insert_sighting(&conn, otter, None, "2026-01-02 10:00:00.000").unwrap();
        insert_sighting(&conn, otter, None, "2026-01-03 10:00:00.000").unwrap();

        let species = species_sightings(&conn).unwrap();
        assert_eq!(species.len(), 2);
        assert_eq!(species[0].common_name, "Sea Otter");
        assert_eq!(species[0].sighting_count, 2);
        assert_eq!(species[1].common_name, "Snowy Owl");
        assert_eq!(species[1].sighting_count, 0);
    }

    #[test]
    fn test_recent_reports_newest_first_with_joins() {
        let conn = test_db();
        let (air, water, harbor, _) = with_reference_data(&conn);
        let mut located = report(water, "Oil sheen", Severity::High, "pending");
        located.location_id = Some(harbor);
        insert_report_at(&conn, &report(air, "Old", Severity::Low, "resolved"), "2025-01-01 00:00:00.000")
            .unwrap();
        insert_report_at(&conn, &located, "2026-02-01 00:00:00.000").unwrap();
        insert_report_at(&conn, &report(air, "Middle", Severity::Medium, "pending"), "2025-06-01 00:00:00.000")
            .unwrap();

        let recent = recent_reports(&conn, 2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].title, "Oil sheen");
        assert_eq!(recent[0].category_name, "Water Contamination");
        assert_eq!(recent[0].category_icon, "💧");
        assert_eq!(recent[0].location_name.as_deref(), Some("Harbor Point"));
        assert_eq!(recent[0].location_city.as_deref(), Some("Portside"));
        assert_eq!(recent[1].title, "Middle");
        assert!(recent[1].location_name.is_none());
    }

    #[test]
    fn test_create_and_get_report() {
        let conn = test_db();
        let (air, _, _, _) = with_reference_data(&conn);
        let id = create_report(&conn, &NewReport::new(air, "Oil spill")).unwrap();
        assert!(id > 0);

        let stored = get_report(&conn, id).unwrap().unwrap();
        assert_eq!(stored.title, "Oil spill");
        assert_eq!(stored.description, "");
        assert_eq!(stored.severity, Severity::Medium);
        assert_eq!(stored.status, "pending");
        assert_eq!(stored.created_at, stored.updated_at);

        assert!(get_report(&conn, id + 100).unwrap().is_none());
    }

    #[test]
    fn test_create_report_rejects_unknown_category() {
        let conn = test_db();
        let result = create_report(&conn, &NewReport::new(42, "Orphan"));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_report_status() {
        let conn = test_db();
        let (air, _, _, _) = with_reference_data(&conn);
        let id = insert_report_at(
            &conn,
            &NewReport::new(air, "Smog"),
            "2025-01-01 00:00:00.000",
        )
        .unwrap();

        assert!(update_report_status(&conn, id, "resolved").unwrap());

        let stored = get_report(&conn, id).unwrap().unwrap();
        assert_eq!(stored.status, "resolved");
        assert!(stored.updated_at > stored.created_at);
    }

    #[test]
    fn test_update_right_after_create_moves_updated_at() {
        let conn = test_db();
        let (air, _, _, _) = with_reference_data(&conn);

        for i in 0..200 {
            let id = create_report(&conn, &NewReport::new(air, format!("Smog {i}"))).unwrap();
            assert!(update_report_status(&conn, id, "resolved").unwrap());

            let stored = get_report(&conn, id).unwrap().unwrap();
            assert!(
                stored.updated_at > stored.created_at,
                "report {id}: updated_at {} not after created_at {}",
                stored.updated_at,
                stored.created_at
            );
        }
    }

    #[test]
    fn test_update_keeps_later_clock_time() {
        let conn = test_db();
        let (air, _, _, _) = with_reference_data(&conn);
        let id = insert_report_at(&conn, &NewReport::new(air, "Smog"), "2025-01-01 00:00:00.000")
            .unwrap();

        update_report_status(&conn, id, "resolved").unwrap();
        let stored = get_report(&conn, id).unwrap().unwrap();
        // Wall clock wins when it is already past created_at
        assert!(stored.updated_at.as_str() > "2025-01-01 00:00:00.001");
    }

    #[test]
    fn test_update_missing_report_reports_not_found() {
        let conn = test_db();
        assert!(!update_report_status(&conn, 999, "resolved").unwrap());
    }

    #[test]
    fn test_update_accepts_any_status() {
        let conn = test_db();
        let (air, _, _, _) = with_reference_data(&conn);
        let id = create_report(&conn, &NewReport::new(air, "Smog")).unwrap();
        assert!(update_report_status(&conn, id, "escalated to council").unwrap());
        let stored = get_report(&conn, id).unwrap().unwrap();
        assert_eq!(stored.status, "escalated to council");
    }

    #[test]
    fn test_has_reference_data() {
        let conn = test_db();
        assert!(!has_reference_data(&conn).unwrap());
        insert_category(&conn, "Air", "a").unwrap();
        assert!(has_reference_data(&conn).unwrap());
    }
}
