//! High-level analysis run: fetch, analyze, report.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_integrity::{run_analysis, AnalysisOptions, SnapshotSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = SnapshotSource::from_location("catalog.json");
//!     let report = run_analysis(&source, &AnalysisOptions::default()).await?;
//!     println!("{} duplicate records", report.totals().total_duplicates);
//!     Ok(())
//! }
//! ```

use tokio_util::sync::CancellationToken;

use super::analyze_stages;
use crate::api::logs::{log_error, log_info, log_info_indent, log_success, log_warning_indent};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::EntityKind;
use crate::report::{AggregateReport, Totals};
use crate::snapshot::SnapshotProvider;

/// Options for one analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub config: AnalysisConfig,
    /// Checked before the fetch and before each analyzer
    pub cancel: CancellationToken,
}

impl AnalysisOptions {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Fetch a snapshot from `provider` and analyze it.
///
/// This is the main entry point. It:
/// 1. Fetches the five entity kinds (concurrently)
/// 2. Runs the asset, work, artist, category and label analyzers
/// 3. Logs per-kind totals
///
/// A fetch failure or a cancellation fails the whole run; no partial
/// report is ever returned.
pub async fn run_analysis<P: SnapshotProvider>(
    provider: &P,
    options: &AnalysisOptions,
) -> AnalysisResult<AggregateReport> {
    let cancel = &options.cancel;

    log_info("📥 Fetching catalog snapshot...");
    let snapshot = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            log_error("Analysis cancelled during snapshot fetch");
            return Err(AnalysisError::Cancelled("snapshot fetch".to_string()));
        }
        result = provider.fetch_snapshot() => result.map_err(|e| {
            log_error(format!("Snapshot fetch failed: {}", e));
            AnalysisError::from(e)
        })?,
    };
    log_success(format!(
        "Snapshot: {} assets, {} works, {} artists, {} categories, {} labels",
        snapshot.assets.len(),
        snapshot.works.len(),
        snapshot.artists.len(),
        snapshot.categories.len(),
        snapshot.labels.len()
    ));

    log_info("🔍 Analyzing duplicates and integrity...");
    let report = analyze_stages(&snapshot, &options.config, |kind| {
        if cancel.is_cancelled() {
            log_error(format!("Analysis cancelled before {} stage", kind));
            return Err(AnalysisError::Cancelled(kind.plural().to_string()));
        }
        Ok(())
    })?;

    log_report(&report);
    Ok(report)
}

/// Log per-kind totals of a finished report.
pub fn log_report(report: &AggregateReport) {
    for (kind, totals) in report.totals_by_kind() {
        log_kind(kind, &totals);
    }
    if report.assets.total_unused > 0 {
        log_warning_indent(format!("{} unused assets", report.assets.total_unused), 1);
    }
    if report.artists.total_integrity_issues > 0 {
        log_warning_indent(
            format!("{} artist integrity issues", report.artists.total_integrity_issues),
            1,
        );
    }

    let totals = report.totals();
    if report.is_clean() {
        log_success("No duplicate or integrity issue found");
    } else {
        log_success(format!(
            "Done: {} duplicate records, {} errors, {} warnings, {} info",
            totals.total_duplicates, totals.total_errors, totals.total_warnings, totals.total_info
        ));
    }
}

fn log_kind(kind: EntityKind, totals: &Totals) {
    if totals.findings() == 0 {
        log_info_indent(format!("{}: no duplicates", kind.plural()), 1);
    } else {
        log_warning_indent(
            format!(
                "{}: {} duplicate records ({} errors, {} warnings, {} info)",
                kind.plural(),
                totals.total_duplicates,
                totals.total_errors,
                totals.total_warnings,
                totals.total_info
            ),
            1,
        );
    }
}
