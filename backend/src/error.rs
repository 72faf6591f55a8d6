//! Error types for the integrity analysis.
//!
//! - [`SnapshotError`] - Failures while obtaining a catalog snapshot
//! - [`AnalysisError`] - Run-level errors returned by [`crate::analysis::run_analysis`]
//! - [`ServerError`] - HTTP layer errors
//!
//! Only snapshot failures abort a run. Malformed records and classifier gaps
//! are absorbed by the analyzers and never surface here.

use thiserror::Error;

use crate::models::EntityKind;

// =============================================================================
// Snapshot Errors
// =============================================================================

/// Errors while fetching or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Failed to read the snapshot file.
    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot is not valid JSON or does not match the record shape.
    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot document failed schema validation.
    #[error("Snapshot failed schema validation: {errors:?}")]
    Schema { errors: Vec<String> },

    /// Request to the catalog store failed.
    #[error("Catalog store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog store answered with a non-success status.
    #[error("Catalog store returned {status} for {kind}")]
    Status { kind: EntityKind, status: u16 },

    /// Fetch of one entity kind failed.
    #[error("Failed to fetch {kind} snapshot: {message}")]
    Fetch { kind: EntityKind, message: String },
}

// =============================================================================
// Analysis Errors
// =============================================================================

/// Run-level analysis errors.
///
/// A failed run never yields a partial report: a report missing an entity
/// kind would read as "zero duplicates".
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A snapshot could not be obtained.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// The run was cancelled before completion.
    #[error("Analysis cancelled before {0} analysis")]
    Cancelled(String),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Analysis failed.
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// No snapshot source configured for server-side runs.
    #[error("Not configured: {0}")]
    NotConfigured(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Result type for analysis runs.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
