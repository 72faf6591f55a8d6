//! Artist analysis: duplicate slugs, names, similar names and integrity.
//!
//! Slug and exact-name groups are always reported. A normalized-name group
//! is dropped when its key is the normalized form of an exact-name group's
//! key, or when its members are exactly those of an exact-name group, so
//! the same names are never reported twice.

use std::collections::HashSet;

use super::grouper::find_duplicates;
use super::integrity::check_artists;
use super::key_of;
use super::normalize::{exact_name_key, normalize, normalized_key};
use super::severity::MatchType;
use crate::config::AnalysisConfig;
use crate::models::{Artist, EntityKind};
use crate::report::{ArtistReport, DuplicateGroup, Totals};

pub fn analyze_artists(artists: &[Artist], config: &AnalysisConfig) -> ArtistReport {
    let locale = config.primary_locale.as_str();

    let duplicates_by_slug = to_groups(
        find_duplicates(artists.iter(), |a| key_of(&a.record.slug)),
        MatchType::ExactSlug,
    );

    let exact_names = find_duplicates(artists.iter(), |a| {
        a.record.name(locale).and_then(exact_name_key)
    });
    let covered = ExactNameCover::new(&exact_names);
    let duplicates_by_name = to_groups(exact_names, MatchType::ExactName);

    let similar: Vec<_> = find_duplicates(artists.iter(), |a| {
        a.record.name(locale).and_then(normalized_key)
    })
    .into_iter()
    .filter(|(key, members)| !covered.covers(key, members))
    .collect();
    let similar_names = to_groups(similar, MatchType::NormalizedName);

    let integrity_issues = check_artists(artists, config);

    let totals = Totals::tally(
        &[&duplicates_by_slug[..], &duplicates_by_name[..], &similar_names[..]],
        &integrity_issues,
    );

    ArtistReport {
        total_integrity_issues: integrity_issues.len(),
        duplicates_by_slug,
        duplicates_by_name,
        similar_names,
        integrity_issues,
        totals,
    }
}

/// What the exact-name groups already report.
struct ExactNameCover {
    /// Normalized form of every exact-name key
    keys: HashSet<String>,
    /// Sorted member ids of every exact-name group
    members: HashSet<Vec<String>>,
}

impl ExactNameCover {
    fn new(groups: &[(String, Vec<&Artist>)]) -> Self {
        Self {
            keys: groups.iter().map(|(key, _)| normalize(key)).collect(),
            members: groups.iter().map(|(_, members)| member_ids(members)).collect(),
        }
    }

    fn covers(&self, normalized_key: &str, members: &[&Artist]) -> bool {
        self.keys.contains(normalized_key) || self.members.contains(&member_ids(members))
    }
}

fn member_ids(members: &[&Artist]) -> Vec<String> {
    let mut ids: Vec<String> = members.iter().map(|a| a.record.id.clone()).collect();
    ids.sort();
    ids
}

fn to_groups(groups: Vec<(String, Vec<&Artist>)>, match_type: MatchType) -> Vec<DuplicateGroup<Artist>> {
    groups
        .into_iter()
        .map(|(key, members)| {
            DuplicateGroup::classified(
                EntityKind::Artist,
                match_type,
                key,
                members.into_iter().cloned().collect(),
                true,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::severity::Severity;
    use crate::models::{CatalogRecord, LocalizedText};
    use chrono::Utc;

    fn artist(id: &str, slug: &str, name: &str) -> Artist {
        Artist {
            record: CatalogRecord {
                id: id.into(),
                slug: slug.into(),
                created_at: Utc::now(),
                names: vec![LocalizedText::new("fr", name)],
            },
            has_photo: true,
            bios: vec![LocalizedText::new("fr", "Bio"), LocalizedText::new("en", "Bio")],
            external_link_count: 1,
        }
    }

    #[test]
    fn test_accent_variants_are_similar_not_exact() {
        let artists = vec![
            artist("1", "cafe-noir", "Café Noir"),
            artist("2", "cafe-noir-2", "Cafe Noir"),
        ];
        let report = analyze_artists(&artists, &AnalysisConfig::default());

        assert!(report.duplicates_by_slug.is_empty());
        assert!(report.duplicates_by_name.is_empty());
        assert_eq!(report.similar_names.len(), 1);

        let group = &report.similar_names[0];
        assert_eq!(group.match_type, MatchType::NormalizedName);
        assert_eq!(group.severity, Severity::Info);
        assert_eq!(group.identifier, "cafe noir");
    }

    #[test]
    fn test_exact_name_suppresses_identical_similar_group() {
        let artists = vec![
            artist("1", "cafe-noir", "Café Noir"),
            artist("2", "cafe-noir-bis", "café noir"),
        ];
        let report = analyze_artists(&artists, &AnalysisConfig::default());

        assert_eq!(report.duplicates_by_name.len(), 1);
        assert_eq!(report.duplicates_by_name[0].severity, Severity::Warning);
        assert!(report.similar_names.is_empty());
        assert_eq!(report.totals.total_duplicates, 2);
    }

    #[test]
    fn test_similar_group_dropped_when_key_has_exact_group() {
        let artists = vec![
            artist("1", "a", "Noir"),
            artist("2", "b", "noir"),
            artist("3", "c", "Noir!"),
        ];
        let report = analyze_artists(&artists, &AnalysisConfig::default());

        assert_eq!(report.duplicates_by_name.len(), 1);
        assert_eq!(report.duplicates_by_name[0].identifier, "noir");
        assert_eq!(report.duplicates_by_name[0].members.len(), 2);
        assert!(report.similar_names.is_empty());
        assert_eq!(report.totals.total_duplicates, 2);
        assert_eq!(report.totals.total_warnings, 1);
        assert_eq!(report.totals.total_info, 0);
    }

    #[test]
    fn test_similar_group_kept_for_other_keys() {
        let artists = vec![
            artist("1", "a", "Noir"),
            artist("2", "b", "noir"),
            artist("3", "c", "Élan"),
            artist("4", "d", "Elan"),
        ];
        let report = analyze_artists(&artists, &AnalysisConfig::default());

        assert_eq!(report.duplicates_by_name.len(), 1);
        assert_eq!(report.similar_names.len(), 1);
        assert_eq!(report.similar_names[0].identifier, "elan");
    }

    #[test]
    fn test_same_slug_and_name_reported_by_both() {
        let artists = vec![artist("1", "noir", "Noir"), artist("2", "noir", "Noir")];
        let report = analyze_artists(&artists, &AnalysisConfig::default());

        assert_eq!(report.duplicates_by_slug.len(), 1);
        assert_eq!(report.duplicates_by_slug[0].severity, Severity::Error);
        assert_eq!(report.duplicates_by_name.len(), 1);
        assert_eq!(report.duplicates_by_name[0].severity, Severity::Warning);
        assert!(report.similar_names.is_empty());
        assert_eq!(report.totals.total_errors, 1);
        assert_eq!(report.totals.total_warnings, 1);
        assert_eq!(report.totals.total_duplicates, 4);
    }

    #[test]
    fn test_nameless_artists_are_skipped() {
        let mut a = artist("1", "x", "");
        let mut b = artist("2", "y", "");
        a.record.names = vec![LocalizedText::empty("fr")];
        b.record.names.clear();
        let report = analyze_artists(&[a, b], &AnalysisConfig::default());

        assert!(report.duplicates_by_name.is_empty());
        assert!(report.similar_names.is_empty());
    }

    #[test]
    fn test_integrity_issues_counted() {
        let mut a = artist("1", "x", "X");
        a.bios = vec![LocalizedText::new("fr", ""), LocalizedText::new("en", "hello")];
        a.has_photo = false;
        a.external_link_count = 0;
        let report = analyze_artists(&[a], &AnalysisConfig::default());

        assert_eq!(report.total_integrity_issues, 3);
        assert_eq!(report.totals.total_warnings, 2);
        assert_eq!(report.totals.total_info, 1);
        assert_eq!(report.totals.total_duplicates, 0);
    }
}
