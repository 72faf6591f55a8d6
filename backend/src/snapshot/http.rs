//! Snapshot fetched from the catalog store's export API.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | GET | `{base}/assets` | `Asset[]` |
//! | GET | `{base}/works` | `Work[]` |
//! | GET | `{base}/artists` | `Artist[]` |
//! | GET | `{base}/categories` | `CatalogRecord[]` |
//! | GET | `{base}/labels` | `CatalogRecord[]` |

use serde::de::DeserializeOwned;
use std::time::Duration;

use super::SnapshotProvider;
use crate::error::{SnapshotError, SnapshotResult};
use crate::models::{Artist, Asset, CatalogRecord, EntityKind, Work};

/// Request timeout for one export endpoint.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Catalog store export client.
#[derive(Debug, Clone)]
pub struct HttpSnapshotProvider {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSnapshotProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint serving records of `kind`.
    pub fn endpoint(&self, kind: EntityKind) -> String {
        format!("{}/{}", self.base_url, kind.plural())
    }

    async fn fetch<T: DeserializeOwned>(&self, kind: EntityKind) -> SnapshotResult<Vec<T>> {
        let response = self
            .client
            .get(self.endpoint(kind))
            .header("Accept", "application/json")
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SnapshotError::Status {
                kind,
                status: status.as_u16(),
            });
        }

        response.json::<Vec<T>>().await.map_err(|e| SnapshotError::Fetch {
            kind,
            message: format!("invalid response body: {}", e),
        })
    }
}

impl SnapshotProvider for HttpSnapshotProvider {
    async fn fetch_assets(&self) -> SnapshotResult<Vec<Asset>> {
        self.fetch(EntityKind::Asset).await
    }

    async fn fetch_works(&self) -> SnapshotResult<Vec<Work>> {
        self.fetch(EntityKind::Work).await
    }

    async fn fetch_artists(&self) -> SnapshotResult<Vec<Artist>> {
        self.fetch(EntityKind::Artist).await
    }

    async fn fetch_categories(&self) -> SnapshotResult<Vec<CatalogRecord>> {
        self.fetch(EntityKind::Category).await
    }

    async fn fetch_labels(&self) -> SnapshotResult<Vec<CatalogRecord>> {
        self.fetch(EntityKind::Label).await
    }
}
