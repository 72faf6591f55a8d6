//! Severity classification of duplicate groups.
//!
//! Severity depends on the entity kind, the match type that produced the
//! group and, for works, whether every member shares the same category:
//!
//! | Entity | Match | Same context | Severity |
//! |--------|-------|--------------|----------|
//! | Asset | exact-path | - | error |
//! | Work | exact-slug | yes / no | error / warning |
//! | Work | exact-name | yes / no | warning / info |
//! | Artist | exact-slug | - | error |
//! | Artist | exact-name | - | warning |
//! | Artist | normalized-name | - | info |
//! | Category, Label | exact-slug | - | error |

use serde::{Deserialize, Serialize};

use crate::api::logs::log_warning;
use crate::models::EntityKind;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Certain, critical duplicate or defect
    Error,
    /// Likely issue, needs review
    Warning,
    /// Advisory, possibly benign
    Info,
}

/// Strategy that produced a duplicate group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MatchType {
    ExactSlug,
    ExactName,
    NormalizedName,
    ExactPath,
}

/// Severity and human-readable reason for one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub severity: Severity,
    pub reason: &'static str,
}

impl Classification {
    const fn new(severity: Severity, reason: &'static str) -> Self {
        Self { severity, reason }
    }
}

/// Reason used when a combination has no entry in the table.
pub const UNCLASSIFIED_REASON: &str = "unclassified duplicate — review manually";

/// Classify a duplicate group.
///
/// `same_context` is only meaningful for works, where it means all members
/// share a category. Other kinds ignore it.
pub fn classify(kind: EntityKind, match_type: MatchType, same_context: bool) -> Classification {
    use EntityKind as K;
    use MatchType as M;
    use Severity as S;

    match (kind, match_type, same_context) {
        (K::Asset, M::ExactPath, _) => {
            Classification::new(S::Error, "same storage path — duplicate to remove")
        }

        (K::Work, M::ExactSlug, true) => Classification::new(
            S::Error,
            "same slug within the same category — critical duplicate",
        ),
        (K::Work, M::ExactSlug, false) => {
            Classification::new(S::Warning, "same slug across different categories — verify")
        }
        (K::Work, M::ExactName, true) => Classification::new(
            S::Warning,
            "same title within the same category — possible duplicate",
        ),
        // Usually benign: the same title in two categories is common.
        (K::Work, M::ExactName, false) => Classification::new(
            S::Info,
            "same title across different categories — likely coincidental",
        ),

        (K::Artist, M::ExactSlug, _) => {
            Classification::new(S::Error, "same slug — critical duplicate to fix")
        }
        (K::Artist, M::ExactName, _) => Classification::new(
            S::Warning,
            "same name with a different slug — possible duplicate",
        ),
        (K::Artist, M::NormalizedName, _) => Classification::new(
            S::Info,
            "similar names differing only by accents/punctuation — verify manually",
        ),

        (K::Category | K::Label, M::ExactSlug, _) => {
            Classification::new(S::Error, "same slug — critical duplicate to fix")
        }

        (kind, match_type, _) => {
            log_warning(format!(
                "No severity rule for {} groups matched by {:?}, defaulting to info",
                kind, match_type
            ));
            Classification::new(S::Info, UNCLASSIFIED_REASON)
        }
    }
}
