//! Work analysis: duplicate slugs and titles.
//!
//! Severity of both strategies depends on whether the members share a
//! category (see [`super::severity`]).

use super::grouper::find_duplicates;
use super::key_of;
use super::normalize::exact_name_key;
use super::severity::MatchType;
use crate::config::AnalysisConfig;
use crate::models::{EntityKind, Work};
use crate::report::{DuplicateGroup, Totals, WorkReport};

pub fn analyze_works(works: &[Work], config: &AnalysisConfig) -> WorkReport {
    let duplicates_by_slug: Vec<DuplicateGroup<Work>> =
        find_duplicates(works.iter(), |work| key_of(&work.record.slug))
            .into_iter()
            .map(|(slug, members)| work_group(MatchType::ExactSlug, slug, members))
            .collect();

    // Works without a primary-locale title are skipped here.
    let duplicates_by_title: Vec<DuplicateGroup<Work>> = find_duplicates(works.iter(), |work| {
        work.title(&config.primary_locale).and_then(exact_name_key)
    })
    .into_iter()
    .map(|(title, members)| work_group(MatchType::ExactName, title, members))
    .collect();

    let totals = Totals::tally(&[&duplicates_by_slug[..], &duplicates_by_title[..]], &[]);

    WorkReport {
        duplicates_by_slug,
        duplicates_by_title,
        totals,
    }
}

fn work_group(match_type: MatchType, identifier: String, members: Vec<&Work>) -> DuplicateGroup<Work> {
    let same_category = share_category(&members);
    DuplicateGroup::classified(
        EntityKind::Work,
        match_type,
        identifier,
        members.into_iter().cloned().collect(),
        same_category,
    )
}

fn share_category(works: &[&Work]) -> bool {
    match works.split_first() {
        Some((first, rest)) => rest.iter().all(|w| w.category_id == first.category_id),
        None => true,
    }
}
