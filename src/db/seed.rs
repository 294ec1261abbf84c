// Sample data — reference tables plus a year of generated reports.
//
// Run explicitly via `ecotrack init --seed`. Reports are spread over the last
// 365 days so every dashboard panel has something to show; older reports are
// more likely to be resolved.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rusqlite::Connection;
use tracing::info;

use super::models::{NewReport, Severity, STATUS_IN_PROGRESS, STATUS_PENDING, STATUS_RESOLVED};
use super::queries;

/// Timestamp format shared with the schema's `strftime('%Y-%m-%d %H:%M:%f')`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

const CATEGORIES: &[(&str, &str, &[&str])] = &[
    (
        "Air Pollution",
        "🏭",
        &["Factory smoke plume", "Burning waste", "Vehicle exhaust hotspot", "Chemical odor"],
    ),
    (
        "Water Contamination",
        "💧",
        &["Oil sheen on river", "Sewage overflow", "Discolored stream", "Dead fish at shoreline"],
    ),
    (
        "Illegal Dumping",
        "🗑️",
        &["Tires dumped in field", "Construction debris", "Abandoned appliances", "Trash bags in ditch"],
    ),
    (
        "Deforestation",
        "🌳",
        &["Unpermitted tree clearing", "Logging near creek", "Mangrove cutting"],
    ),
    (
        "Wildlife Harm",
        "🦌",
        &["Injured bird", "Poaching traps", "Nesting site disturbed"],
    ),
    (
        "Noise Pollution",
        "🔊",
        &["Night construction noise", "Industrial hum", "Amplified music"],
    ),
];

const LOCATIONS: &[(&str, &str, &str)] = &[
    ("Riverside Park", "Millbrook", "Central Valley"),
    ("Harbor Point", "Portside", "Coastal"),
    ("Pine Ridge Trail", "Highfield", "Northern Hills"),
    ("Industrial Estate 4", "Millbrook", "Central Valley"),
    ("Willow Creek", "Ashford", "Eastern Plains"),
    ("Sunset Beach", "Portside", "Coastal"),
    ("Old Quarry", "Stonebridge", "Northern Hills"),
    ("Marsh Reserve", "Ashford", "Eastern Plains"),
    ("Town Square", "Stonebridge", "Northern Hills"),
    ("Lakeside Drive", "Highfield", "Northern Hills"),
    ("Cedar Wetlands", "Ashford", "Eastern Plains"),
    ("North Landfill", "Millbrook", "Central Valley"),
];

const SPECIES: &[(&str, &str, &str)] = &[
    ("Sea Otter", "Enhydra lutris", "Endangered"),
    ("Bald Eagle", "Haliaeetus leucocephalus", "Least Concern"),
    ("Monarch Butterfly", "Danaus plexippus", "Vulnerable"),
    ("Red Fox", "Vulpes vulpes", "Least Concern"),
    ("Snowy Owl", "Bubo scandiacus", "Vulnerable"),
    ("Eastern Box Turtle", "Terrapene carolina", "Vulnerable"),
    ("Grey Wolf", "Canis lupus", "Least Concern"),
];

/// What a seeding run inserted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub locations: usize,
    pub species: usize,
    pub reports: usize,
    pub sightings: usize,
    pub milestones: usize,
}

/// Populate an empty database with reference data and `report_count`
/// generated reports ending at `now`.
///
/// Returns `None` without touching anything if reference data already exists.
/// Everything is inserted in one transaction.
pub fn seed(
    conn: &Connection,
    report_count: usize,
    now: NaiveDateTime,
    rng_seed: u64,
) -> Result<Option<SeedSummary>> {
    if queries::has_reference_data(conn)? {
        info!("Reference data already present, skipping seed");
        return Ok(None);
    }

    let mut rng = StdRng::seed_from_u64(rng_seed);
    let tx = conn
        .unchecked_transaction()
        .context("Failed to start seed transaction")?;
    let mut summary = SeedSummary::default();

    let mut categories = Vec::new();
    for (name, icon, titles) in CATEGORIES {
        let id = queries::insert_category(&tx, name, icon)?;
        categories.push((id, *titles));
    }
    summary.categories = categories.len();

    let mut locations = Vec::new();
    for (name, city, region) in LOCATIONS {
        locations.push(queries::insert_location(&tx, name, Some(*city), Some(*region))?);
    }
    summary.locations = locations.len();

    let mut resolved = 0i64;
    for _ in 0..report_count {
        let (category_id, titles) = categories
            .choose(&mut rng)
            .context("No categories to seed reports with")?;
        let title = titles.choose(&mut rng).copied().unwrap_or("Incident");
        let age_days = rng.random_range(0..365);
        let created_at = now - Duration::days(age_days) - Duration::seconds(rng.random_range(0..86_400));

        let status = pick_status(&mut rng, age_days);
        if status == STATUS_RESOLVED {
            resolved += 1;
        }

        let report = NewReport {
            category_id: *category_id,
            // Roughly one report in ten has no location
            location_id: if rng.random_bool(0.9) {
                locations.choose(&mut rng).copied()
            } else {
                None
            },
            title: title.to_string(),
            description: format!("{title} reported by a community member."),
            severity: pick_severity(&mut rng),
            status: status.to_string(),
        };
        queries::insert_report_at(&tx, &report, &created_at.format(TIMESTAMP_FORMAT).to_string())?;
        summary.reports += 1;
    }

    let mut species_ids = Vec::new();
    for (common, scientific, conservation) in SPECIES {
        species_ids.push(queries::insert_species(
            &tx,
            common,
            Some(*scientific),
            Some(*conservation),
        )?);
    }
    summary.species = species_ids.len();

    // The last species is left unsighted so the zero-count row shows up.
    let sighted = &species_ids[..species_ids.len().saturating_sub(1)];
    let sighting_count = report_count / 2;
    for _ in 0..sighting_count {
        let Some(species_id) = sighted.choose(&mut rng) else {
            break;
        };
        let sighted_at = now - Duration::days(rng.random_range(0..365));
        queries::insert_sighting(
            &tx,
            *species_id,
            locations.choose(&mut rng).copied(),
            &sighted_at.format(TIMESTAMP_FORMAT).to_string(),
        )?;
        summary.sightings += 1;
    }

    let milestones: [(&str, &str, &str, i64, i64); 5] = [
        (
            "First 100 Reports",
            "Community members file 100 incident reports",
            "reports",
            100,
            summary.reports as i64,
        ),
        (
            "50 Issues Resolved",
            "Follow 50 reports through to resolution",
            "resolutions",
            50,
            resolved,
        ),
        (
            "Wildlife Watch",
            "Log 200 wildlife sightings",
            "sightings",
            200,
            summary.sightings as i64,
        ),
        (
            "Community Cleanups",
            "Organize 25 neighborhood cleanup events",
            "events",
            25,
            18,
        ),
        (
            "Tree Planting Drive",
            "Plant 1,000 native trees",
            "trees",
            1000,
            640,
        ),
    ];
    for (title, description, kind, target, current) in milestones {
        queries::insert_milestone(&tx, title, description, Some(kind), target, current)?;
        summary.milestones += 1;
    }

    tx.commit().context("Failed to commit seed data")?;

    info!(
        reports = summary.reports,
        sightings = summary.sightings,
        "Seeded sample data"
    );
    Ok(Some(summary))
}

/// Critical is rare, medium is the common case.
fn pick_severity(rng: &mut StdRng) -> Severity {
    match rng.random_range(0..100) {
        0..=9 => Severity::Critical,
        10..=34 => Severity::High,
        35..=74 => Severity::Medium,
        _ => Severity::Low,
    }
}

/// Older reports have had more time to be worked on.
fn pick_status(rng: &mut StdRng, age_days: i64) -> &'static str {
    let resolved_chance = (age_days as f64 / 365.0).clamp(0.05, 0.85);
    if rng.random_bool(resolved_chance) {
        STATUS_RESOLVED
    } else if rng.random_bool(0.4) {
        STATUS_IN_PROGRESS
    } else {
        STATUS_PENDING
    }
}
