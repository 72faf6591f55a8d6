//! Snapshot files: a JSON catalog export on disk.
//!
//! ```json
//! {
//!   "assets": [...], "works": [...], "artists": [...],
//!   "categories": [...], "labels": [...]
//! }
//! ```
//!
//! The document is validated against the embedded schema before being
//! deserialized.

use serde_json::Value;
use std::path::{Path, PathBuf};

use super::{CatalogSnapshot, SnapshotProvider};
use crate::error::{SnapshotError, SnapshotResult};
use crate::models::{Artist, Asset, CatalogRecord, Work};
use crate::validation::validate_snapshot;

/// Parse and validate a snapshot document from raw bytes.
pub fn parse_snapshot(bytes: &[u8]) -> SnapshotResult<CatalogSnapshot> {
    let document: Value = serde_json::from_slice(bytes)?;
    parse_snapshot_value(document)
}

/// Validate an already-parsed snapshot document and deserialize it.
pub fn parse_snapshot_value(document: Value) -> SnapshotResult<CatalogSnapshot> {
    validate_snapshot(&document).map_err(|errors| SnapshotError::Schema { errors })?;
    Ok(serde_json::from_value(document)?)
}

/// Reads the snapshot from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSnapshotProvider {
    path: PathBuf,
}

impl FileSnapshotProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> SnapshotResult<CatalogSnapshot> {
        let bytes = tokio::fs::read(&self.path).await?;
        parse_snapshot(&bytes)
    }
}

impl SnapshotProvider for FileSnapshotProvider {
    async fn fetch_assets(&self) -> SnapshotResult<Vec<Asset>> {
        Ok(self.load().await?.assets)
    }

    async fn fetch_works(&self) -> SnapshotResult<Vec<Work>> {
        Ok(self.load().await?.works)
    }

    async fn fetch_artists(&self) -> SnapshotResult<Vec<Artist>> {
        Ok(self.load().await?.artists)
    }

    async fn fetch_categories(&self) -> SnapshotResult<Vec<CatalogRecord>> {
        Ok(self.load().await?.categories)
    }

    async fn fetch_labels(&self) -> SnapshotResult<Vec<CatalogRecord>> {
        Ok(self.load().await?.labels)
    }

    /// One read for the whole snapshot.
    async fn fetch_snapshot(&self) -> SnapshotResult<CatalogSnapshot> {
        self.load().await
    }
}
