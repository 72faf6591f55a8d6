//! Domain models for catalog snapshots.
//!
//! These are the read-only records the analyzers consume:
//!
//! - [`CatalogRecord`] - Shared shape of categories and labels
//! - [`Work`] - Creative work with a category
//! - [`Artist`] - Composer/artist with bios, photo flag and links
//! - [`Asset`] - Media asset with its incoming references
//! - [`RelationKind`] - Every place in the catalog that can point at an asset
//! - [`EntityKind`] - The five kinds of records the engine reports on

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Localized text
// =============================================================================

/// A text value for one locale (`"fr"`, `"en"`, ...).
///
/// The text is optional: the store emits one entry per supported locale,
/// even when nothing was written for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalizedText {
    pub locale: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl LocalizedText {
    pub fn new(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            text: Some(text.into()),
        }
    }

    pub fn empty(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            text: None,
        }
    }
}

/// Text for `locale`, or `None` when absent or whitespace-only.
pub fn text_for<'a>(texts: &'a [LocalizedText], locale: &str) -> Option<&'a str> {
    texts
        .iter()
        .find(|t| t.locale == locale)
        .and_then(|t| t.text.as_deref())
        .filter(|t| !t.trim().is_empty())
}

// =============================================================================
// Catalog records
// =============================================================================

/// Fields shared by every slugged catalog record.
///
/// Categories and labels are nothing more than this.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub id: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub names: Vec<LocalizedText>,
}

impl CatalogRecord {
    /// Name in `locale`, if one was written.
    pub fn name(&self, locale: &str) -> Option<&str> {
        text_for(&self.names, locale)
    }
}

/// A creative work. `names` holds its localized titles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    #[serde(flatten)]
    pub record: CatalogRecord,
    pub category_id: String,
    #[serde(default)]
    pub year: Option<i32>,
}

impl Work {
    pub fn title(&self, locale: &str) -> Option<&str> {
        self.record.name(locale)
    }
}

/// A composer or artist profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    #[serde(flatten)]
    pub record: CatalogRecord,
    #[serde(default)]
    pub has_photo: bool,
    #[serde(default)]
    pub bios: Vec<LocalizedText>,
    #[serde(default)]
    pub external_link_count: u32,
}

impl Artist {
    pub fn bio(&self, locale: &str) -> Option<&str> {
        text_for(&self.bios, locale)
    }
}

// =============================================================================
// Assets
// =============================================================================

/// Every relation that can use an asset as an image.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    /// Cover image of a work
    WorkCover,
    /// Image in a work gallery
    WorkGallery,
    /// Profile photo of an artist
    ArtistPhoto,
    /// Illustration of a category
    CategoryImage,
    /// Logo of a label
    LabelLogo,
}

/// A stored media asset with one `usage_refs` entry per referencing place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub path: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub usage_refs: Vec<RelationKind>,
}

// =============================================================================
// Entity kinds
// =============================================================================

/// The five kinds of records covered by a report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Asset,
    Work,
    Artist,
    Category,
    Label,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Asset,
        EntityKind::Work,
        EntityKind::Artist,
        EntityKind::Category,
        EntityKind::Label,
    ];

    /// Plural label used in logs and endpoint paths.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Asset => "assets",
            Self::Work => "works",
            Self::Artist => "artists",
            Self::Category => "categories",
            Self::Label => "labels",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Asset => "asset",
            Self::Work => "work",
            Self::Artist => "artist",
            Self::Category => "category",
            Self::Label => "label",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_for_skips_blank() {
        let texts = vec![
            LocalizedText::new("fr", "   "),
            LocalizedText::new("en", "Hello"),
        ];
        assert_eq!(text_for(&texts, "fr"), None);
        assert_eq!(text_for(&texts, "en"), Some("Hello"));
        assert_eq!(text_for(&texts, "de"), None);
    }

    #[test]
    fn test_work_deserializes_flattened_record() {
        let work: Work = serde_json::from_value(json!({
            "id": "w1",
            "slug": "album-x",
            "createdAt": "2024-01-01T00:00:00Z",
            "names": [{ "locale": "fr", "text": "Album X" }, { "locale": "en" }],
            "categoryId": "c1"
        }))
        .unwrap();

        assert_eq!(work.record.slug, "album-x");
        assert_eq!(work.title("fr"), Some("Album X"));
        assert_eq!(work.title("en"), None);
        assert_eq!(work.year, None);
    }

    #[test]
    fn test_relation_kind_format() {
        assert_eq!(json!(RelationKind::WorkCover), json!("work-cover"));
        let kind: RelationKind = serde_json::from_value(json!("label-logo")).unwrap();
        assert_eq!(kind, RelationKind::LabelLogo);
    }
}
