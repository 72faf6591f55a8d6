//! End-to-end analysis over JSON snapshot documents.

use catalog_integrity::{
    analyze_snapshot, parse_snapshot_value, run_analysis, AggregateReport, AnalysisConfig,
    AnalysisOptions, CatalogSnapshot, DuplicateGroup, FileSnapshotProvider, IssueKind, MatchType,
    Severity,
};
use serde_json::{json, Value};
use std::io::Write;

const T0: &str = "2024-01-01T00:00:00Z";
const T1: &str = "2024-02-01T00:00:00Z";

fn snapshot(doc: Value) -> CatalogSnapshot {
    let mut full = json!({ "assets": [], "works": [], "artists": [], "categories": [], "labels": [] });
    for (key, value) in doc.as_object().unwrap() {
        full[key] = value.clone();
    }
    parse_snapshot_value(full).unwrap()
}

fn analyze(doc: Value) -> AggregateReport {
    analyze_snapshot(&snapshot(doc), &AnalysisConfig::default())
}

fn work(id: &str, slug: &str, title: &str, category: &str) -> Value {
    json!({
        "id": id,
        "slug": slug,
        "createdAt": T0,
        "names": [{ "locale": "fr", "text": title }],
        "categoryId": category
    })
}

/// An artist with a complete profile, so only duplicates show up.
fn artist(id: &str, slug: &str, name: &str) -> Value {
    json!({
        "id": id,
        "slug": slug,
        "createdAt": T0,
        "names": [{ "locale": "fr", "text": name }],
        "hasPhoto": true,
        "bios": [{ "locale": "fr", "text": "bio" }, { "locale": "en", "text": "bio" }],
        "externalLinkCount": 2
    })
}

fn busy_catalog() -> Value {
    json!({
        "assets": [
            { "id": "a1", "path": "/img/a.jpg", "createdAt": T1, "usageRefs": ["work-cover", "work-gallery"] },
            { "id": "a2", "path": "/img/a.jpg", "createdAt": T0, "usageRefs": [] },
            { "id": "a3", "path": "/img/a.jpg", "createdAt": T0, "usageRefs": ["label-logo"] },
            { "id": "a4", "path": "/img/b.jpg", "createdAt": T0, "usageRefs": [] }
        ],
        "works": [
            work("w1", "album-x", "Album X", "c1"),
            work("w2", "album-x", "Album X", "c1"),
            work("w3", "nocturne", "Nocturne", "c1"),
            work("w4", "nocturne-2", "Nocturne", "c2")
        ],
        "artists": [
            artist("ar1", "cafe-noir", "Café Noir"),
            artist("ar2", "cafe-noir-2", "Cafe Noir"),
            artist("ar3", "duo", "Duo"),
            artist("ar4", "duo", "Duo"),
            { "id": "ar5", "slug": "solo", "createdAt": T0, "hasPhoto": false, "bios": [], "externalLinkCount": 0 }
        ],
        "categories": [
            { "id": "c1", "slug": "piano", "createdAt": T0 },
            { "id": "c2", "slug": "piano", "createdAt": T0 }
        ],
        "labels": [
            { "id": "l1", "slug": "ondine", "createdAt": T0 }
        ]
    })
}

fn all_group_sizes(report: &AggregateReport) -> Vec<usize> {
    fn sizes<T>(groups: &[DuplicateGroup<T>]) -> impl Iterator<Item = usize> + '_ {
        groups.iter().map(|g| g.members.len())
    }
    sizes(&report.assets.duplicates_by_path)
        .chain(sizes(&report.works.duplicates_by_slug))
        .chain(sizes(&report.works.duplicates_by_title))
        .chain(sizes(&report.artists.duplicates_by_slug))
        .chain(sizes(&report.artists.duplicates_by_name))
        .chain(sizes(&report.artists.similar_names))
        .chain(sizes(&report.categories.duplicates_by_slug))
        .chain(sizes(&report.labels.duplicates_by_slug))
        .collect()
}

#[test]
fn test_duplicate_path_and_orphans_are_independent() {
    let report = analyze(json!({
        "assets": [
            { "id": "a1", "path": "/img/a.jpg", "createdAt": T0, "usageRefs": [] },
            { "id": "a2", "path": "/img/a.jpg", "createdAt": T1, "usageRefs": [] }
        ]
    }));

    let groups = &report.assets.duplicates_by_path;
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].severity, Severity::Error);
    assert_eq!(groups[0].match_type, MatchType::ExactPath);
    assert_eq!(groups[0].members.len(), 2);

    let unused: Vec<&str> = report.assets.unused.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(unused, vec!["a1", "a2"]);
    assert_eq!(report.assets.total_unused, 2);
    assert_eq!(report.assets.totals.total_errors, 1);
}

#[test]
fn test_work_slug_same_category() {
    let report = analyze(json!({
        "works": [work("w1", "album-x", "Un", "c1"), work("w2", "album-x", "Deux", "c1")]
    }));

    let groups = &report.works.duplicates_by_slug;
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].severity, Severity::Error);
    assert!(groups[0].reason.contains("same category"));
    assert!(report.works.duplicates_by_title.is_empty());
}

#[test]
fn test_work_slug_different_category() {
    let report = analyze(json!({
        "works": [work("w1", "album-x", "Un", "c1"), work("w2", "album-x", "Deux", "c2")]
    }));

    let groups = &report.works.duplicates_by_slug;
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].severity, Severity::Warning);
}

#[test]
fn test_accented_names_are_similar_not_exact() {
    let report = analyze(json!({
        "artists": [artist("ar1", "cafe-noir", "Café Noir"), artist("ar2", "cafe-noir-2", "Cafe Noir")]
    }));

    assert!(report.artists.duplicates_by_slug.is_empty());
    assert!(report.artists.duplicates_by_name.is_empty());

    let similar = &report.artists.similar_names;
    assert_eq!(similar.len(), 1);
    assert_eq!(similar[0].identifier, "cafe noir");
    assert_eq!(similar[0].match_type, MatchType::NormalizedName);
    assert_eq!(similar[0].severity, Severity::Info);
}

#[test]
fn test_incomplete_artist_profile() {
    let report = analyze(json!({
        "artists": [{
            "id": "ar1",
            "slug": "someone",
            "createdAt": T0,
            "hasPhoto": false,
            "bios": [{ "locale": "fr", "text": "" }, { "locale": "en", "text": "hello" }],
            "externalLinkCount": 0
        }]
    }));

    let issues: Vec<(IssueKind, Severity)> = report
        .artists
        .integrity_issues
        .iter()
        .map(|i| (i.kind.clone(), i.severity))
        .collect();
    assert_eq!(
        issues,
        vec![
            (IssueKind::MissingBio("fr".into()), Severity::Warning),
            (IssueKind::MissingPhoto, Severity::Warning),
            (IssueKind::MissingLinks, Severity::Info),
        ]
    );
    assert_eq!(report.artists.total_integrity_issues, 3);
}

#[test]
fn test_no_singleton_groups() {
    let report = analyze(busy_catalog());
    let sizes = all_group_sizes(&report);
    assert!(!sizes.is_empty());
    assert!(sizes.iter().all(|&n| n >= 2));
}

#[test]
fn test_total_duplicates_is_member_sum() {
    let report = analyze(busy_catalog());
    let member_sum: usize = all_group_sizes(&report).into_iter().sum();
    assert_eq!(report.totals().total_duplicates, member_sum);
}

#[test]
fn test_severity_totals_count_groups_and_issues() {
    let report = analyze(busy_catalog());

    // Three assets share one path: one error, three duplicates
    assert_eq!(report.assets.totals.total_errors, 1);
    assert_eq!(report.assets.totals.total_duplicates, 3);

    // ar5 misses both bios, its photo and its links
    assert_eq!(report.artists.total_integrity_issues, 3);
    let artist_groups = report.artists.duplicates_by_slug.len()
        + report.artists.duplicates_by_name.len()
        + report.artists.similar_names.len();
    let t = report.artists.totals;
    assert_eq!(
        t.total_errors + t.total_warnings + t.total_info,
        artist_groups + report.artists.total_integrity_issues
    );
}

#[test]
fn test_shared_slug_and_name_report_both_groups() {
    let report = analyze(busy_catalog());

    // "duo" shares slug and name: an error by slug and a warning by name
    let slug_groups = &report.artists.duplicates_by_slug;
    assert_eq!(slug_groups.len(), 1);
    assert_eq!(slug_groups[0].identifier, "duo");
    assert_eq!(slug_groups[0].severity, Severity::Error);

    let name_groups = &report.artists.duplicates_by_name;
    assert_eq!(name_groups.len(), 1);
    assert_eq!(name_groups[0].identifier, "duo");
    assert_eq!(name_groups[0].severity, Severity::Warning);

    assert!(report
        .artists
        .similar_names
        .iter()
        .all(|g| g.identifier != "duo"));
}

#[test]
fn test_similar_names_skip_keys_with_exact_group() {
    let report = analyze(json!({
        "artists": [
            artist("ar1", "noir-1", "Noir"),
            artist("ar2", "noir-2", "noir"),
            artist("ar3", "noir-3", "Noir!")
        ]
    }));

    let exact = &report.artists.duplicates_by_name;
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].identifier, "noir");
    assert_eq!(exact[0].members.len(), 2);
    assert!(report.artists.similar_names.is_empty());
    assert_eq!(report.artists.totals.total_duplicates, 2);
}

#[test]
fn test_title_across_categories_is_info() {
    let report = analyze(busy_catalog());

    let nocturne = report
        .works
        .duplicates_by_title
        .iter()
        .find(|g| g.identifier == "nocturne")
        .unwrap();
    assert_eq!(nocturne.severity, Severity::Info);
    assert_eq!(nocturne.members.len(), 2);
}

#[test]
fn test_report_is_deterministic() {
    let doc = busy_catalog();
    let first = serde_json::to_string(&analyze(doc.clone())).unwrap();
    let second = serde_json::to_string(&analyze(doc)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_catalog_is_clean() {
    let report = analyze(json!({}));
    assert!(report.is_clean());
    assert_eq!(report.totals().findings(), 0);
}

#[tokio::test]
async fn test_file_provider_end_to_end() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(busy_catalog().to_string().as_bytes()).unwrap();

    let provider = FileSnapshotProvider::new(file.path());
    let report = run_analysis(&provider, &AnalysisOptions::default())
        .await
        .unwrap();

    assert_eq!(report, analyze(busy_catalog()));
    assert_eq!(report.categories.duplicates_by_slug.len(), 1);
    assert!(report.labels.duplicates_by_slug.is_empty());
}

#[tokio::test]
async fn test_invalid_file_fails_the_run() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{ "assets": [], "works": [] }"#).unwrap();

    let provider = FileSnapshotProvider::new(file.path());
    let result = run_analysis(&provider, &AnalysisOptions::default()).await;
    assert!(result.is_err());
}
