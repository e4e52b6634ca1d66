//! CLI output formatting and display helpers.
//!
//! Renderers return lines so they can be tested without capturing stdout.

use anyhow::Result;
use bookshelf_core::changes::NewItemsReport;
use bookshelf_core::metadata::{CanonicalRecord, CatalogResolution};
use bookshelf_core::series::{SeriesAnalysis, SeriesGap};
use bookshelf_core::stats::{CatalogStats, CountEntry};
use bookshelf_core::title::TitleVerdict;
use serde::Serialize;

/// Message when the binary is run without a subcommand.
pub const NO_COMMAND_GUIDANCE: &str = "No command given. Run `bookshelf --help` for usage.";

/// Example invocation shown with the guidance.
pub const COMMAND_EXAMPLE: &str = "Example: bookshelf resolve snapshot.json --format json";

/// Wider gaps are summarized by count instead of listed.
const MAX_LISTED_MISSING: u64 = 20;

/// Returns terminal width from COLUMNS, or 80 if unset/invalid.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 20)
        .unwrap_or(80)
}

/// Truncates text to at most `width` chars, appending ellipsis if truncated.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let text_len = text.chars().count();
    if text_len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    if width == 1 {
        return "…".to_string();
    }

    let mut output: String = text.chars().take(width - 1).collect();
    output.push('…');
    output
}

/// Prints quick-start guidance to stdout.
pub fn print_quick_start_guidance() {
    let width = terminal_width().min(80);
    println!("{}", truncate_to_width(NO_COMMAND_GUIDANCE, width));
    println!("{}", truncate_to_width(COMMAND_EXAMPLE, width));
}

/// Prints any serializable report as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints lines, each truncated to the terminal width.
pub fn print_lines(lines: &[String]) {
    let width = terminal_width();
    for line in lines {
        println!("{}", truncate_to_width(line, width));
    }
}

/// `Series #index` label, or empty for standalone records.
fn series_label(record: &CanonicalRecord) -> String {
    match (record.series_name(), record.series_index_display.as_deref()) {
        (Some(series), Some(index)) => format!("{series} #{index}"),
        (Some(series), None) => series.to_string(),
        (None, _) => String::new(),
    }
}

/// One summary line per record.
pub(crate) fn render_record_line(record: &CanonicalRecord) -> String {
    let mut parts = vec![record.title.clone()];
    let series = series_label(record);
    if !series.is_empty() {
        parts.push(series);
    }
    if let Some(author) = record.author.as_deref() {
        parts.push(author.to_string());
    }
    if !record.duration.is_empty() {
        parts.push(record.duration.clone());
    }
    parts.join(" | ")
}

pub(crate) fn render_resolution_lines(resolution: &CatalogResolution) -> Vec<String> {
    let mut lines: Vec<String> = resolution.records.iter().map(render_record_line).collect();
    lines.push(format!(
        "Resolved {} item(s), {} unreadable",
        resolution.records.len(),
        resolution.failures.len()
    ));
    lines
}

fn render_missing(gap: &SeriesGap) -> String {
    let count = gap.missing_count();
    if count > MAX_LISTED_MISSING {
        return format!("missing {count} positions");
    }
    let missing: Vec<String> = gap
        .missing_positions()
        .map(|n| n.to_string())
        .collect();
    format!("missing {}", missing.join(", "))
}

pub(crate) fn render_series_lines(analysis: &SeriesAnalysis) -> Vec<String> {
    let mut lines = Vec::new();
    for group in &analysis.groups {
        let author = group
            .author
            .as_deref()
            .map(|author| format!(" by {author}"))
            .unwrap_or_default();
        lines.push(format!(
            "{}{author}: {} book(s), {:.1}% ({})",
            group.name, group.book_count, group.completion_pct, group.status
        ));
        for gap in &group.gaps {
            lines.push(format!(
                "  gap {} -> {}: {}",
                gap.low,
                gap.high,
                render_missing(gap)
            ));
        }
    }
    for similar in &analysis.similar_series {
        lines.push(format!(
            "Possible duplicate series: '{}' / '{}' ({:.2})",
            similar.first, similar.second, similar.similarity
        ));
    }
    lines.push(format!(
        "{} series ({} complete, {} incomplete), {} standalone, {} total",
        analysis.total_series(),
        analysis.complete_series,
        analysis.incomplete_series,
        analysis.standalone_count,
        analysis.total_records
    ));
    lines
}

fn render_top_list(label: &str, entries: &[CountEntry], lines: &mut Vec<String>) {
    if entries.is_empty() {
        return;
    }
    lines.push(format!("{label}:"));
    for entry in entries {
        lines.push(format!("  {} ({})", entry.name, entry.count));
    }
}

pub(crate) fn render_stats_lines(stats: &CatalogStats) -> Vec<String> {
    let year_range = stats.year_range.as_ref().map_or_else(
        || "N/A".to_string(),
        |range| format!("{} - {}", range.first, range.last),
    );
    let buckets = &stats.duration_buckets;

    let mut lines = vec![
        format!("Records: {}", stats.total_records),
        format!(
            "Listening time: {}h ({} days, {} weeks, {} months, {} years)",
            stats.total_hours,
            stats.listening.days,
            stats.listening.weeks,
            stats.listening.months,
            stats.listening.years
        ),
        format!("Average length: {} min", stats.average_minutes),
        format!(
            "Unique: {} authors, {} narrators, {} series, {} genres",
            stats.unique_authors, stats.unique_narrators, stats.unique_series, stats.unique_genres
        ),
        format!("Years: {year_range}"),
        format!(
            "Lengths: <5h {} | 5-10h {} | 11-15h {} | 16-24h {} | 25h+ {}",
            buckets.under_5h,
            buckets.from_5h_to_10h,
            buckets.from_11h_to_15h,
            buckets.from_16h_to_24h,
            buckets.over_24h
        ),
        format!(
            "Insights: {} books/author, {} books/narrator, {}% in series, {} books/series",
            stats.insights.books_per_author,
            stats.insights.books_per_narrator,
            stats.insights.series_percentage,
            stats.insights.avg_books_per_series
        ),
    ];
    render_top_list("Top authors", &stats.top_authors, &mut lines);
    render_top_list("Top narrators", &stats.top_narrators, &mut lines);
    render_top_list("Top series", &stats.top_series, &mut lines);
    render_top_list("Top genres", &stats.top_genres, &mut lines);
    render_top_list("Top years", &stats.top_years, &mut lines);
    lines
}

pub(crate) fn render_new_items_lines(report: &NewItemsReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Found {} new record(s) in {} total",
        report.new_count, report.total_count
    )];
    for record in &report.records {
        let author = record.author.as_deref().unwrap_or("unknown author");
        lines.push(format!("  - {} by {author}", record.title));
    }
    if report.new_count > report.records.len() {
        lines.push(format!(
            "  ... and {} more",
            report.new_count - report.records.len()
        ));
    }
    lines
}

pub(crate) fn render_verdict_lines(verdict: &TitleVerdict) -> Vec<String> {
    match verdict {
        TitleVerdict::Excluded { rule } => vec![format!("excluded (rule: {rule})")],
        TitleVerdict::NoMatch => vec!["no match (standalone title)".to_string()],
        TitleVerdict::Matched(found) => vec![
            format!("series = {}", found.series),
            format!("index = {}", found.index),
            format!("pattern = {}", found.pattern),
        ],
    }
}

/// JSON shape of a title verdict.
pub(crate) fn verdict_json(verdict: &TitleVerdict) -> serde_json::Value {
    match verdict {
        TitleVerdict::Excluded { rule } => {
            serde_json::json!({ "outcome": "excluded", "rule": rule })
        }
        TitleVerdict::NoMatch => serde_json::json!({ "outcome": "no_match" }),
        TitleVerdict::Matched(found) => serde_json::json!({
            "outcome": "matched",
            "series": found.series,
            "index": found.index,
            "pattern": found.pattern,
        }),
    }
}
