//! Report types produced by an analysis run.
//!
//! Reports are built fresh for every run and never persisted. Every count
//! in a report is derived from the groups and issues it carries:
//!
//! - `totalDuplicates` sums group **members** (records, not clusters)
//! - `totalErrors` / `totalWarnings` / `totalInfo` count **groups and issues**
//!
//! Field order is fixed by the struct definitions, so serializing the same
//! report twice yields identical JSON.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use crate::analysis::severity::{classify, MatchType, Severity};
use crate::models::{Artist, CatalogRecord, EntityKind, RelationKind, Work};

// =============================================================================
// Duplicate groups
// =============================================================================

/// Two or more records sharing a key under one matching strategy.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup<T> {
    /// The shared key (slug, path or name key)
    pub identifier: String,
    pub match_type: MatchType,
    pub severity: Severity,
    pub reason: String,
    /// Members in snapshot order
    pub members: Vec<T>,
}

impl<T> DuplicateGroup<T> {
    /// Build a group and classify it.
    pub fn classified(
        kind: EntityKind,
        match_type: MatchType,
        identifier: String,
        members: Vec<T>,
        same_context: bool,
    ) -> Self {
        debug_assert!(members.len() > 1, "duplicate groups need at least two members");
        let classification = classify(kind, match_type, same_context);
        Self {
            identifier,
            match_type,
            severity: classification.severity,
            reason: classification.reason.to_string(),
            members,
        }
    }
}

// =============================================================================
// Integrity issues
// =============================================================================

/// Kind of single-record completeness violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Bio missing for one locale
    MissingBio(String),
    /// Bio missing for both locales
    MissingBioBoth,
    MissingPhoto,
    MissingLinks,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBio(locale) => write!(f, "missing-bio-{}", locale),
            Self::MissingBioBoth => f.write_str("missing-bio-both"),
            Self::MissingPhoto => f.write_str("missing-photo"),
            Self::MissingLinks => f.write_str("missing-links"),
        }
    }
}

impl Serialize for IssueKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A data-completeness violation on one record.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityIssue {
    pub record_id: String,
    pub slug: String,
    pub kind: IssueKind,
    pub severity: Severity,
    pub reason: String,
}

// =============================================================================
// Totals
// =============================================================================

/// Severity totals of one report (or of the whole run when summed).
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_duplicates: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_info: usize,
}

impl Totals {
    /// Count one group: all its members, one severity.
    pub fn add_group<T>(&mut self, group: &DuplicateGroup<T>) {
        self.total_duplicates += group.members.len();
        self.add_severity(group.severity);
    }

    /// Count one issue.
    pub fn add_issue(&mut self, issue: &IntegrityIssue) {
        self.add_severity(issue.severity);
    }

    fn add_severity(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.total_errors += 1,
            Severity::Warning => self.total_warnings += 1,
            Severity::Info => self.total_info += 1,
        }
    }

    /// Tally every group of every bucket plus `issues`.
    pub fn tally<'a, T: 'a>(
        buckets: &[&'a [DuplicateGroup<T>]],
        issues: &[IntegrityIssue],
    ) -> Self {
        let mut totals = Totals::default();
        for group in buckets.iter().flat_map(|bucket| bucket.iter()) {
            totals.add_group(group);
        }
        for issue in issues {
            totals.add_issue(issue);
        }
        totals
    }

    /// Number of findings, whatever their severity.
    pub fn findings(&self) -> usize {
        self.total_errors + self.total_warnings + self.total_info
    }
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, rhs: Totals) -> Totals {
        Totals {
            total_duplicates: self.total_duplicates + rhs.total_duplicates,
            total_errors: self.total_errors + rhs.total_errors,
            total_warnings: self.total_warnings + rhs.total_warnings,
            total_info: self.total_info + rhs.total_info,
        }
    }
}

impl Sum for Totals {
    fn sum<I: Iterator<Item = Totals>>(iter: I) -> Totals {
        iter.fold(Totals::default(), Add::add)
    }
}

// =============================================================================
// Per-entity reports
// =============================================================================

/// An asset as it appears in a report, with its usage attached.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetUsage {
    pub id: String,
    pub path: String,
    pub alt: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub usage_count: usize,
    /// References per relation kind, only kinds with at least one reference
    pub usage: BTreeMap<RelationKind, usize>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetReport {
    pub duplicates_by_path: Vec<DuplicateGroup<AssetUsage>>,
    /// Zero-usage assets, oldest first
    pub unused: Vec<AssetUsage>,
    #[serde(flatten)]
    pub totals: Totals,
    pub total_unused: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkReport {
    pub duplicates_by_slug: Vec<DuplicateGroup<Work>>,
    pub duplicates_by_title: Vec<DuplicateGroup<Work>>,
    #[serde(flatten)]
    pub totals: Totals,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtistReport {
    pub duplicates_by_slug: Vec<DuplicateGroup<Artist>>,
    pub duplicates_by_name: Vec<DuplicateGroup<Artist>>,
    /// Names equal once accents and punctuation are ignored
    pub similar_names: Vec<DuplicateGroup<Artist>>,
    pub integrity_issues: Vec<IntegrityIssue>,
    #[serde(flatten)]
    pub totals: Totals,
    pub total_integrity_issues: usize,
}

/// Report for the slug-only kinds (categories and labels).
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlugReport {
    pub duplicates_by_slug: Vec<DuplicateGroup<CatalogRecord>>,
    #[serde(flatten)]
    pub totals: Totals,
}

// =============================================================================
// Aggregate
// =============================================================================

/// The five entity reports of one run.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub assets: AssetReport,
    pub works: WorkReport,
    pub artists: ArtistReport,
    pub categories: SlugReport,
    pub labels: SlugReport,
}

impl AggregateReport {
    /// Totals of each entity kind, in a fixed order.
    pub fn totals_by_kind(&self) -> [(EntityKind, Totals); 5] {
        [
            (EntityKind::Asset, self.assets.totals),
            (EntityKind::Work, self.works.totals),
            (EntityKind::Artist, self.artists.totals),
            (EntityKind::Category, self.categories.totals),
            (EntityKind::Label, self.labels.totals),
        ]
    }

    /// Grand totals, summed on demand.
    pub fn totals(&self) -> Totals {
        self.totals_by_kind().into_iter().map(|(_, t)| t).sum()
    }

    /// True when the run found no duplicate, integrity issue or orphan.
    pub fn is_clean(&self) -> bool {
        self.totals().findings() == 0 && self.assets.total_unused == 0
    }
}

/// Compact view of a report for logs and HTTP envelopes.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    #[serde(flatten)]
    pub totals: Totals,
    pub total_unused: usize,
    pub total_integrity_issues: usize,
    pub by_kind: BTreeMap<String, Totals>,
}

impl From<&AggregateReport> for ReportSummary {
    fn from(report: &AggregateReport) -> Self {
        ReportSummary {
            totals: report.totals(),
            total_unused: report.assets.total_unused,
            total_integrity_issues: report.artists.total_integrity_issues,
            by_kind: report
                .totals_by_kind()
                .into_iter()
                .map(|(kind, totals)| (kind.plural().to_string(), totals))
                .collect(),
        }
    }
}
