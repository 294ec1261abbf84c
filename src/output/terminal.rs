// Colored terminal output for `ecotrack status`.
//
// This module handles all terminal-specific formatting: colors and tables.
// status.rs gathers the data and delegates display here.

use colored::Colorize;

use crate::db::models::{Overview, ReportSummary, Severity};

/// Display headline counts plus the status and severity groupings.
pub fn display_overview(overview: &Overview) {
    println!("\n{}", "=== Report Overview ===".bold());
    println!();
    println!("  Total reports: {}", overview.total_reports.to_string().bold());
    println!(
        "  Pending: {}  Resolved: {}  Critical: {}",
        overview.pending.to_string().yellow(),
        overview.resolved.to_string().green(),
        overview.critical.to_string().red().bold(),
    );

    if overview.total_reports == 0 {
        println!("\n  No reports yet. Run `ecotrack init --seed` for sample data.");
        return;
    }

    println!("\n  {}", "By status".dimmed());
    for entry in &overview.by_status {
        println!("    {:<16} {:>6}", entry.status, entry.count);
    }

    println!("\n  {}", "By severity".dimmed());
    for entry in &overview.by_severity {
        // Pad before coloring; ANSI codes would throw off the width.
        let label = format!("{:<16}", entry.severity);
        println!("    {} {:>6}", colorize_severity(entry.severity, &label), entry.count);
    }
}

/// Display the most recent reports as a compact table.
pub fn display_recent_reports(reports: &[ReportSummary]) {
    if reports.is_empty() {
        return;
    }

    println!(
        "\n{}",
        format!("=== Recent Reports ({}) ===", reports.len()).bold()
    );
    println!();
    println!(
        "  {:>5}  {:<40} {:<9} {:<12} {}",
        "ID".dimmed(),
        "Title".dimmed(),
        "Severity".dimmed(),
        "Status".dimmed(),
        "Created".dimmed(),
    );
    println!("  {}", "-".repeat(90).dimmed());

    for report in reports {
        let title = super::truncate_chars(&report.title, 37);
        let severity = format!("{:<9}", report.severity);
        println!(
            "  {:>5}  {:<40} {} {:<12} {}",
            report.id,
            title,
            colorize_severity(report.severity, &severity),
            report.status,
            report.created_at.dimmed(),
        );
    }
    println!();
}

/// Colorize text according to a severity.
fn colorize_severity(severity: Severity, text: &str) -> colored::ColoredString {
    match severity {
        Severity::Critical => text.red().bold(),
        Severity::High => text.bright_red(),
        Severity::Medium => text.yellow(),
        Severity::Low => text.green(),
    }
}
