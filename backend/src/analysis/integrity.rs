//! Completeness checks on artist profiles.
//!
//! Three independent checks; a profile can fail all of them:
//!
//! | Check | Condition | Issue | Severity |
//! |-------|-----------|-------|----------|
//! | Bio | both locales empty | `missing-bio-both` | error |
//! | Bio | primary locale empty | `missing-bio-<primary>` | warning |
//! | Bio | secondary locale empty | `missing-bio-<secondary>` | info |
//! | Photo | no photo | `missing-photo` | warning |
//! | Links | no external link | `missing-links` | info |

use crate::analysis::severity::Severity;
use crate::config::AnalysisConfig;
use crate::models::Artist;
use crate::report::{IntegrityIssue, IssueKind};

/// Run every check on one artist.
pub fn check_artist(artist: &Artist, config: &AnalysisConfig) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    if let Some((kind, severity, reason)) = check_bio(artist, config) {
        issues.push(issue(artist, kind, severity, reason));
    }

    if !artist.has_photo {
        issues.push(issue(
            artist,
            IssueKind::MissingPhoto,
            Severity::Warning,
            "no profile photo".to_string(),
        ));
    }

    if artist.external_link_count == 0 {
        issues.push(issue(
            artist,
            IssueKind::MissingLinks,
            Severity::Info,
            "no external link".to_string(),
        ));
    }

    issues
}

/// Run every check on every artist, in snapshot order.
pub fn check_artists(artists: &[Artist], config: &AnalysisConfig) -> Vec<IntegrityIssue> {
    artists
        .iter()
        .flat_map(|artist| check_artist(artist, config))
        .collect()
}

/// At most one bio issue per artist.
fn check_bio(artist: &Artist, config: &AnalysisConfig) -> Option<(IssueKind, Severity, String)> {
    let primary = &config.primary_locale;
    let secondary = &config.secondary_locale;

    match (artist.bio(primary).is_some(), artist.bio(secondary).is_some()) {
        (false, false) => Some((
            IssueKind::MissingBioBoth,
            Severity::Error,
            format!("no biography in {} nor {}", primary, secondary),
        )),
        (false, true) => Some((
            IssueKind::MissingBio(primary.clone()),
            Severity::Warning,
            format!("no biography in {}", primary),
        )),
        (true, false) => Some((
            IssueKind::MissingBio(secondary.clone()),
            Severity::Info,
            format!("no biography in {}", secondary),
        )),
        (true, true) => None,
    }
}

fn issue(artist: &Artist, kind: IssueKind, severity: Severity, reason: String) -> IntegrityIssue {
    IntegrityIssue {
        record_id: artist.record.id.clone(),
        slug: artist.record.slug.clone(),
        kind,
        severity,
        reason,
    }
}
