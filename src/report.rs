/*!
 * Reporting functionality for singlefile
 *
 * Renders a console summary of a run using the tabled library.
 */

use std::path::PathBuf;
use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::generator::GenerationSummary;
use crate::types::CodebaseSnapshot;
use crate::utils::format_file_size;

/// Statistics for one run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Time taken to scan and write
    pub duration: Duration,
    /// Number of files in the snapshot
    pub files_processed: usize,
    /// Number of binary files
    pub binary_files: usize,
    /// Total number of lines of loaded text
    pub total_lines: usize,
    /// Total size of accepted files
    pub total_bytes: u64,
    /// Entries skipped during the scan, with reasons
    pub skipped: Vec<(String, String)>,
    /// Output files written
    pub outputs: Vec<PathBuf>,
    /// Formats that failed, with reasons
    pub failed_formats: Vec<(String, String)>,
}

impl RunReport {
    /// Collect statistics from a snapshot and a generation summary
    pub fn new(
        snapshot: &CodebaseSnapshot,
        summary: &GenerationSummary,
        duration: Duration,
    ) -> Self {
        Self {
            duration,
            files_processed: snapshot.files.len(),
            binary_files: snapshot.binary_count(),
            total_lines: snapshot.total_lines(),
            total_bytes: snapshot.total_size(),
            skipped: snapshot
                .skipped
                .iter()
                .map(|s| (s.path.display().to_string(), s.reason.clone()))
                .collect(),
            outputs: summary.written.clone(),
            failed_formats: summary
                .failures
                .iter()
                .map(|f| (f.plugin.clone(), f.reason.clone()))
                .collect(),
        }
    }
}

/// Report generator for run results
#[derive(Debug, Default)]
pub struct Reporter;

impl Reporter {
    /// Create a new reporter
    pub fn new() -> Self {
        Self
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    fn style(table: &mut Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table.to_string()
    }

    // Create a summary table using the tabled crate
    fn create_summary_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "Files Processed".to_string(),
                value: self.format_number(report.files_processed),
            },
            SummaryRow {
                key: "Binary Files".to_string(),
                value: self.format_number(report.binary_files),
            },
            SummaryRow {
                key: "Total Lines".to_string(),
                value: self.format_number(report.total_lines),
            },
            SummaryRow {
                key: "Total Size".to_string(),
                value: format_file_size(report.total_bytes),
            },
            SummaryRow {
                key: "Skipped".to_string(),
                value: self.format_number(report.skipped.len()),
            },
        ];

        for output in &report.outputs {
            rows.push(SummaryRow {
                key: "Output File".to_string(),
                value: output.display().to_string(),
            });
        }

        Self::style(&mut Table::new(rows))
    }

    // Errors skipped under --ignore-errors
    fn create_problems_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct ProblemRow {
            #[tabled(rename = "Item")]
            item: String,

            #[tabled(rename = "Reason")]
            reason: String,
        }

        let rows: Vec<ProblemRow> = report
            .skipped
            .iter()
            .chain(report.failed_formats.iter())
            .map(|(item, reason)| ProblemRow {
                item: item.clone(),
                reason: reason.clone(),
            })
            .collect();

        Self::style(&mut Table::new(rows))
    }

    /// Generate the report string
    pub fn generate_report(&self, report: &RunReport) -> String {
        let summary = format!("SNAPSHOT COMPLETE\n{}", self.create_summary_table(report));
        if report.skipped.is_empty() && report.failed_formats.is_empty() {
            return summary;
        }
        format!(
            "SKIPPED ITEMS\n{}\n\n{}",
            self.create_problems_table(report),
            summary
        )
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &RunReport) {
        println!("\n{}", self.generate_report(report));
    }
}
