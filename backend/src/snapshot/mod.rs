//! Snapshot providers.
//!
//! The engine reads the catalog through [`SnapshotProvider`], one fetch per
//! entity kind. Implementations:
//!
//! | Provider | Source |
//! |----------|--------|
//! | [`InMemorySnapshot`] | A [`CatalogSnapshot`] already in memory (tests, uploads) |
//! | [`FileSnapshotProvider`] | A JSON catalog export on disk |
//! | [`HttpSnapshotProvider`] | The catalog store's export endpoints |
//! | [`SnapshotSource`] | Any of the above, chosen at runtime |
//!
//! The five fetches need not be transactionally consistent with each other;
//! minor skew is tolerated since the report is advisory.

pub mod file;
pub mod http;

use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::error::SnapshotResult;
use crate::models::{Artist, Asset, CatalogRecord, Work};

pub use file::FileSnapshotProvider;
pub use http::HttpSnapshotProvider;

/// Every record the engine looks at, for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogSnapshot {
    pub assets: Vec<Asset>,
    pub works: Vec<Work>,
    pub artists: Vec<Artist>,
    pub categories: Vec<CatalogRecord>,
    pub labels: Vec<CatalogRecord>,
}

impl CatalogSnapshot {
    /// Total number of records across the five kinds.
    pub fn record_count(&self) -> usize {
        self.assets.len()
            + self.works.len()
            + self.artists.len()
            + self.categories.len()
            + self.labels.len()
    }
}

/// Read access to the catalog store.
pub trait SnapshotProvider: Sync {
    fn fetch_assets(&self) -> impl Future<Output = SnapshotResult<Vec<Asset>>> + Send;

    fn fetch_works(&self) -> impl Future<Output = SnapshotResult<Vec<Work>>> + Send;

    fn fetch_artists(&self) -> impl Future<Output = SnapshotResult<Vec<Artist>>> + Send;

    fn fetch_categories(&self) -> impl Future<Output = SnapshotResult<Vec<CatalogRecord>>> + Send;

    fn fetch_labels(&self) -> impl Future<Output = SnapshotResult<Vec<CatalogRecord>>> + Send;

    /// Fetch all five kinds concurrently. Fails as soon as one fetch fails.
    fn fetch_snapshot(&self) -> impl Future<Output = SnapshotResult<CatalogSnapshot>> + Send {
        async move {
            let (assets, works, artists, categories, labels) = tokio::try_join!(
                self.fetch_assets(),
                self.fetch_works(),
                self.fetch_artists(),
                self.fetch_categories(),
                self.fetch_labels(),
            )?;

            Ok(CatalogSnapshot {
                assets,
                works,
                artists,
                categories,
                labels,
            })
        }
    }
}

// =============================================================================
// In-memory provider
// =============================================================================

/// Serves a snapshot that is already loaded.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshot {
    snapshot: CatalogSnapshot,
}

impl InMemorySnapshot {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }
}

impl From<CatalogSnapshot> for InMemorySnapshot {
    fn from(snapshot: CatalogSnapshot) -> Self {
        Self::new(snapshot)
    }
}

impl SnapshotProvider for InMemorySnapshot {
    async fn fetch_assets(&self) -> SnapshotResult<Vec<Asset>> {
        Ok(self.snapshot.assets.clone())
    }

    async fn fetch_works(&self) -> SnapshotResult<Vec<Work>> {
        Ok(self.snapshot.works.clone())
    }

    async fn fetch_artists(&self) -> SnapshotResult<Vec<Artist>> {
        Ok(self.snapshot.artists.clone())
    }

    async fn fetch_categories(&self) -> SnapshotResult<Vec<CatalogRecord>> {
        Ok(self.snapshot.categories.clone())
    }

    async fn fetch_labels(&self) -> SnapshotResult<Vec<CatalogRecord>> {
        Ok(self.snapshot.labels.clone())
    }

    async fn fetch_snapshot(&self) -> SnapshotResult<CatalogSnapshot> {
        Ok(self.snapshot.clone())
    }
}

// =============================================================================
// Runtime-selected provider
// =============================================================================

/// A provider picked from configuration.
#[derive(Debug, Clone)]
pub enum SnapshotSource {
    File(FileSnapshotProvider),
    Http(HttpSnapshotProvider),
    Memory(InMemorySnapshot),
}

impl SnapshotSource {
    /// `http://` and `https://` locations use the catalog store API,
    /// anything else is read as a snapshot file.
    pub fn from_location(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Http(HttpSnapshotProvider::new(location))
        } else {
            Self::File(FileSnapshotProvider::new(location))
        }
    }

    /// Human-readable description for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::File(p) => format!("file {}", p.path().display()),
            Self::Http(p) => format!("catalog store {}", p.base_url()),
            Self::Memory(p) => format!("in-memory snapshot ({} records)", p.snapshot().record_count()),
        }
    }
}

impl SnapshotProvider for SnapshotSource {
    async fn fetch_assets(&self) -> SnapshotResult<Vec<Asset>> {
        match self {
            Self::File(p) => p.fetch_assets().await,
            Self::Http(p) => p.fetch_assets().await,
            Self::Memory(p) => p.fetch_assets().await,
        }
    }

    async fn fetch_works(&self) -> SnapshotResult<Vec<Work>> {
        match self {
            Self::File(p) => p.fetch_works().await,
            Self::Http(p) => p.fetch_works().await,
            Self::Memory(p) => p.fetch_works().await,
        }
    }

    async fn fetch_artists(&self) -> SnapshotResult<Vec<Artist>> {
        match self {
            Self::File(p) => p.fetch_artists().await,
            Self::Http(p) => p.fetch_artists().await,
            Self::Memory(p) => p.fetch_artists().await,
        }
    }

    async fn fetch_categories(&self) -> SnapshotResult<Vec<CatalogRecord>> {
        match self {
            Self::File(p) => p.fetch_categories().await,
            Self::Http(p) => p.fetch_categories().await,
            Self::Memory(p) => p.fetch_categories().await,
        }
    }

    async fn fetch_labels(&self) -> SnapshotResult<Vec<CatalogRecord>> {
        match self {
            Self::File(p) => p.fetch_labels().await,
            Self::Http(p) => p.fetch_labels().await,
            Self::Memory(p) => p.fetch_labels().await,
        }
    }

    async fn fetch_snapshot(&self) -> SnapshotResult<CatalogSnapshot> {
        match self {
            Self::File(p) => p.fetch_snapshot().await,
            Self::Http(p) => p.fetch_snapshot().await,
            Self::Memory(p) => p.fetch_snapshot().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocalizedText;
    use chrono::Utc;

    #[tokio::test]
    async fn test_in_memory_round_trip() {
        let snapshot = CatalogSnapshot {
            categories: vec![CatalogRecord {
                id: "c1".into(),
                slug: "piano".into(),
                created_at: Utc::now(),
                names: vec![LocalizedText::new("fr", "Piano")],
            }],
            ..Default::default()
        };
        let provider = InMemorySnapshot::new(snapshot.clone());

        assert_eq!(provider.fetch_categories().await.unwrap().len(), 1);
        assert!(provider.fetch_labels().await.unwrap().is_empty());
        assert_eq!(provider.fetch_snapshot().await.unwrap(), snapshot);
        assert_eq!(snapshot.record_count(), 1);
    }

    #[test]
    fn test_source_from_location() {
        assert!(matches!(
            SnapshotSource::from_location("https://cms.example.org/api/export"),
            SnapshotSource::Http(_)
        ));
        assert!(matches!(
            SnapshotSource::from_location("./catalog.json"),
            SnapshotSource::File(_)
        ));
    }
}
