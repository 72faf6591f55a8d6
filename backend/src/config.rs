//! Runtime configuration.
//!
//! Values come from the process environment and fall back to the defaults
//! below. The binary loads `.env` once at startup; CLI flags override.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `CATALOG_PRIMARY_LOCALE` | `fr` | Locale used for name/title grouping |
//! | `CATALOG_SECONDARY_LOCALE` | `en` | Second locale checked for bios |
//! | `CATALOG_SNAPSHOT` | - | Snapshot file path or catalog export URL |
//! | `PORT` | `3000` | HTTP server port |

use serde::{Deserialize, Serialize};
use std::env;

/// Default primary locale.
pub const DEFAULT_PRIMARY_LOCALE: &str = "fr";

/// Default secondary locale.
pub const DEFAULT_SECONDARY_LOCALE: &str = "en";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Maximum upload size for snapshot files (in bytes).
///
/// 50 MB limit.
pub const MAX_SNAPSHOT_SIZE: usize = 50 * 1024 * 1024;

/// Settings that affect analysis results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Locale of the names and titles compared for duplicates
    pub primary_locale: String,
    pub secondary_locale: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            primary_locale: DEFAULT_PRIMARY_LOCALE.to_string(),
            secondary_locale: DEFAULT_SECONDARY_LOCALE.to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Load from `CATALOG_PRIMARY_LOCALE` / `CATALOG_SECONDARY_LOCALE`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            primary_locale: env_or("CATALOG_PRIMARY_LOCALE", defaults.primary_locale),
            secondary_locale: env_or("CATALOG_SECONDARY_LOCALE", defaults.secondary_locale),
        }
    }
}

/// Settings of the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Snapshot file path or `http(s)://` export base URL
    pub snapshot_source: Option<String>,
    pub analysis: AnalysisConfig,
}

impl ServerConfig {
    /// Load from `PORT` and `CATALOG_SNAPSHOT`.
    pub fn from_env() -> Self {
        let analysis = AnalysisConfig::from_env();
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let snapshot_source = env::var("CATALOG_SNAPSHOT")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Self {
            port,
            snapshot_source,
            analysis,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_snapshot_source(mut self, source: impl Into<String>) -> Self {
        self.snapshot_source = Some(source.into());
        self
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}
