//! Console output formatter for batch reports

use crate::output::table::AsciiTable;
use askbatch_domain::{BatchReport, BatchStats, ReportFormat, ReportRow};
use colored::Colorize;
use serde::Serialize;

/// Column of the validation verdict in the results table.
const VERDICT_COLUMN: usize = 7;

const RESULT_HEADERS: [&str; 9] = [
    "Sentence",
    "Datasource ID",
    "Model ID",
    "Expected Result",
    "Has checked function",
    "Result",
    "Error",
    "Validation",
    "Processing Time (ms)",
];

const STATS_HEADERS: [&str; 6] = [
    "Tests Count",
    "Passed",
    "Failed",
    "Min Processing Time (ms)",
    "Max Processing Time (ms)",
    "Avg Processing Time (ms)",
];

#[derive(Serialize)]
struct JsonReport<'a> {
    results: &'a [ReportRow],
    stats: &'a BatchStats,
}

/// Formats batch reports for console display
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format(report: &BatchReport, format: ReportFormat) -> String {
        match format {
            ReportFormat::Table => Self::format_tables(report),
            ReportFormat::Json => Self::format_json(report),
        }
    }

    /// Results table, statistics table and a one-line summary
    pub fn format_tables(report: &BatchReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", "Test result:".cyan().bold()));
        output.push_str(&Self::results_table(report));
        output.push('\n');

        output.push_str(&format!("{}\n", "Tests statistic:".cyan().bold()));
        output.push_str(&Self::stats_table(&report.stats).render());
        output.push('\n');

        output.push_str(&Self::summary(report));
        output.push('\n');

        output
    }

    /// Format as JSON: `{ "results": [...], "stats": {...} }`
    pub fn format_json(report: &BatchReport) -> String {
        let json = JsonReport {
            results: &report.rows,
            stats: &report.stats,
        };
        serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
    }

    fn results_table(report: &BatchReport) -> String {
        let mut table = AsciiTable::new(RESULT_HEADERS);

        for row in &report.rows {
            table.add_row([
                row.text.clone(),
                row.datasource_id.to_string(),
                optional(&row.model_id),
                row.expected_success.to_string(),
                row.has_check.to_string(),
                optional(&row.result),
                optional(&row.error),
                row.verdict().to_string(),
                row.processing_time_ms.to_string(),
            ]);
        }

        table.render_styled(|row, column, cell| {
            if column != VERDICT_COLUMN {
                return cell.to_string();
            }
            if report.rows[row].validation_error.is_some() {
                cell.red().to_string()
            } else {
                cell.green().to_string()
            }
        })
    }

    fn stats_table(stats: &BatchStats) -> AsciiTable {
        let mut table = AsciiTable::new(STATS_HEADERS);
        table.add_row([
            stats.count.to_string(),
            stats.passed.to_string(),
            stats.failed.to_string(),
            stats.min_processing_ms.to_string(),
            stats.max_processing_ms.to_string(),
            format!("{:.2}", stats.avg_processing_ms),
        ]);
        table
    }

    fn summary(report: &BatchReport) -> String {
        let unexpected = report.unexpected_outcomes();
        let line = format!(
            "{}/{} passed validation, {} unexpected outcome(s)",
            report.stats.passed, report.stats.count, unexpected
        );

        if report.is_clean() {
            line.green().bold().to_string()
        } else {
            line.red().bold().to_string()
        }
    }
}

fn optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
