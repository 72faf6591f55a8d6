//! # Catalog Integrity - duplicate and integrity detection for the portfolio catalog
//!
//! Scans a full snapshot of the catalog (assets, works, artists, categories,
//! labels) and reports duplicate records, unused media assets and incomplete
//! artist profiles, each finding with a severity and a reason.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Snapshot   │────▶│  Analyzers  │────▶│  Aggregate  │────▶│  JSON / UI  │
//! │ (file/HTTP) │     │ (per kind)  │     │   report    │     │  (CLI/API)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog_integrity::{run_analysis, AnalysisOptions, FileSnapshotProvider};
//!
//! #[tokio::main]
//! async fn main() {
//!     let provider = FileSnapshotProvider::new("snapshot.json");
//!     let report = run_analysis(&provider, &AnalysisOptions::default()).await.unwrap();
//!     println!("{} findings", report.totals().findings());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Catalog records (Work, Artist, Asset)
//! - [`config`] - Locales, port and snapshot source
//! - [`snapshot`] - Snapshot providers (file, HTTP, in-memory)
//! - [`validation`] - Snapshot schema validation
//! - [`analysis`] - Normalizer, grouper, classifier and analyzers
//! - [`report`] - Report structures and totals
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Input
pub mod snapshot;
pub mod validation;

// Analysis
pub mod analysis;
pub mod report;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    AnalysisError, AnalysisResult, ServerError, ServerResult, SnapshotError, SnapshotResult,
};

// =============================================================================
// Re-exports - Models & config
// =============================================================================

pub use config::{AnalysisConfig, ServerConfig};
pub use models::{Artist, Asset, CatalogRecord, EntityKind, LocalizedText, RelationKind, Work};

// =============================================================================
// Re-exports - Snapshot
// =============================================================================

pub use snapshot::file::{parse_snapshot, parse_snapshot_value};
pub use snapshot::{
    CatalogSnapshot, FileSnapshotProvider, HttpSnapshotProvider, InMemorySnapshot,
    SnapshotProvider, SnapshotSource,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid, is_valid_snapshot, validate, validate_snapshot};

// =============================================================================
// Re-exports - Analysis
// =============================================================================

pub use analysis::{
    analyze_artists, analyze_assets, analyze_slugs, analyze_snapshot, analyze_works, classify,
    exact_name_key, normalize, normalized_key, run_analysis, AnalysisOptions, Classification,
    MatchType, Severity,
};

// =============================================================================
// Re-exports - Report
// =============================================================================

pub use report::{
    AggregateReport, ArtistReport, AssetReport, AssetUsage, DuplicateGroup, IntegrityIssue,
    IssueKind, ReportSummary, SlugReport, Totals, WorkReport,
};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, AnalysisResponse, AnalysisStatus};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
