//! Asset analysis: duplicate storage paths and orphans.

use super::grouper::find_duplicates;
use super::key_of;
use super::severity::MatchType;
use super::usage::{orphans, with_usage};
use crate::models::{Asset, EntityKind};
use crate::report::{AssetReport, DuplicateGroup, Totals};

/// Analyze every asset of a snapshot.
///
/// Duplicate and orphan status are independent: a zero-usage copy inside a
/// duplicate group also shows up in `unused`.
pub fn analyze_assets(assets: &[Asset]) -> AssetReport {
    let duplicates_by_path: Vec<DuplicateGroup<_>> =
        find_duplicates(assets.iter(), |asset| key_of(&asset.path))
            .into_iter()
            .map(|(path, members)| {
                DuplicateGroup::classified(
                    EntityKind::Asset,
                    MatchType::ExactPath,
                    path,
                    members.into_iter().map(with_usage).collect(),
                    true,
                )
            })
            .collect();

    let unused = orphans(assets);
    let totals = Totals::tally(&[&duplicates_by_path[..]], &[]);

    AssetReport {
        total_unused: unused.len(),
        duplicates_by_path,
        unused,
        totals,
    }
}
