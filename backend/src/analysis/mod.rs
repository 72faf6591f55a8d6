//! Duplicate and integrity analysis.
//!
//! - Normalizer: name keys for similarity grouping
//! - Grouper: first-seen-order grouping by key
//! - Severity: classification table
//! - Usage / Integrity: asset orphans and artist completeness
//! - One analyzer per entity kind
//! - Pipeline: snapshot fetch, cancellation and logging around the analyzers

pub mod artists;
pub mod assets;
pub mod grouper;
pub mod integrity;
pub mod normalize;
pub mod pipeline;
pub mod severity;
pub mod taxonomy;
pub mod usage;
pub mod works;

use std::convert::Infallible;

use crate::config::AnalysisConfig;
use crate::models::EntityKind;
use crate::report::AggregateReport;
use crate::snapshot::CatalogSnapshot;

pub use artists::analyze_artists;
pub use assets::analyze_assets;
pub use normalize::{exact_name_key, normalize, normalized_key};
pub use pipeline::*;
pub use severity::{classify, Classification, MatchType, Severity};
pub use taxonomy::analyze_slugs;
pub use works::analyze_works;

/// Verbatim grouping key for slugs and paths; blank values are not grouped.
pub(crate) fn key_of(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Analyze a snapshot that is already in memory.
///
/// Pure and deterministic: the same snapshot always yields the same report.
pub fn analyze_snapshot(snapshot: &CatalogSnapshot, config: &AnalysisConfig) -> AggregateReport {
    match analyze_stages(snapshot, config, |_| Ok::<(), Infallible>(())) {
        Ok(report) => report,
        Err(never) => match never {},
    }
}

/// Run the five analyzers in a fixed order, calling `before_stage` ahead of
/// each one. An error from `before_stage` stops the run and drops whatever
/// was computed so far.
pub(crate) fn analyze_stages<E>(
    snapshot: &CatalogSnapshot,
    config: &AnalysisConfig,
    mut before_stage: impl FnMut(EntityKind) -> Result<(), E>,
) -> Result<AggregateReport, E> {
    before_stage(EntityKind::Asset)?;
    let assets = analyze_assets(&snapshot.assets);

    before_stage(EntityKind::Work)?;
    let works = analyze_works(&snapshot.works, config);

    before_stage(EntityKind::Artist)?;
    let artists = analyze_artists(&snapshot.artists, config);

    before_stage(EntityKind::Category)?;
    let categories = analyze_slugs(EntityKind::Category, &snapshot.categories);

    before_stage(EntityKind::Label)?;
    let labels = analyze_slugs(EntityKind::Label, &snapshot.labels);

    Ok(AggregateReport {
        assets,
        works,
        artists,
        categories,
        labels,
    })
}
