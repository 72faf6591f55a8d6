//! Category and label analysis: duplicate slugs only.

use super::grouper::find_duplicates;
use super::key_of;
use super::severity::MatchType;
use crate::models::{CatalogRecord, EntityKind};
use crate::report::{DuplicateGroup, SlugReport, Totals};

/// Analyze slugged records of `kind` (categories or labels).
pub fn analyze_slugs(kind: EntityKind, records: &[CatalogRecord]) -> SlugReport {
    let duplicates_by_slug: Vec<DuplicateGroup<CatalogRecord>> =
        find_duplicates(records.iter(), |r| key_of(&r.slug))
            .into_iter()
            .map(|(slug, members)| {
                DuplicateGroup::classified(
                    kind,
                    MatchType::ExactSlug,
                    slug,
                    members.into_iter().cloned().collect(),
                    true,
                )
            })
            .collect();

    let totals = Totals::tally(&[&duplicates_by_slug[..]], &[]);

    SlugReport {
        duplicates_by_slug,
        totals,
    }
}
