//! REST API types for frontend integration.
//!
//! The report itself is returned untouched; the envelope adds what changes
//! between runs (run id, timestamp, source) so the report stays
//! byte-identical for an unchanged snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::report::{AggregateReport, ReportSummary};

/// Outcome of a successful run.
///
/// A failed run never produces one of these: the UI shows "retry" for
/// errors and a success state only for `Clean`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    /// Nothing found
    Clean,
    /// At least one duplicate, integrity issue or unused asset
    Issues,
}

/// Response sent to the frontend after an analysis run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    /// Unique run identifier
    pub run_id: String,
    pub status: AnalysisStatus,
    pub generated_at: DateTime<Utc>,
    /// Where the snapshot came from
    pub source: String,
    pub summary: ReportSummary,
    pub report: AggregateReport,
}

impl AnalysisResponse {
    pub fn new(report: AggregateReport, source: impl Into<String>) -> Self {
        let status = if report.is_clean() {
            AnalysisStatus::Clean
        } else {
            AnalysisStatus::Issues
        };

        Self {
            run_id: Uuid::new_v4().to_string(),
            status,
            generated_at: Utc::now(),
            source: source.into(),
            summary: ReportSummary::from(&report),
            report,
        }
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "runId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
        "report": null
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_snapshot;
    use crate::config::AnalysisConfig;
    use crate::snapshot::CatalogSnapshot;

    #[test]
    fn test_clean_response() {
        let report = analyze_snapshot(&CatalogSnapshot::default(), &AnalysisConfig::default());
        let response = AnalysisResponse::new(report, "test");

        assert_eq!(response.status, AnalysisStatus::Clean);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "clean");
        assert_eq!(value["summary"]["totalDuplicates"], 0);
        assert_eq!(value["summary"]["byKind"]["labels"]["totalErrors"], 0);
        assert!(value["report"]["assets"]["duplicatesByPath"].is_array());
    }

    #[test]
    fn test_error_response_has_no_report() {
        let value = error_response("catalog store unavailable");
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "catalog store unavailable");
        assert!(value["report"].is_null());
    }
}
