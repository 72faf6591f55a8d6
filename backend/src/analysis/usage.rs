//! Asset usage counting and orphan detection.

use std::collections::BTreeMap;

use crate::models::{Asset, RelationKind};
use crate::report::AssetUsage;

/// References to `asset`, per relation kind.
pub fn usage_breakdown(asset: &Asset) -> BTreeMap<RelationKind, usize> {
    let mut usage = BTreeMap::new();
    for kind in &asset.usage_refs {
        *usage.entry(*kind).or_insert(0) += 1;
    }
    usage
}

/// Total references to `asset` across every relation kind.
pub fn usage_count(asset: &Asset) -> usize {
    usage_breakdown(asset).values().sum()
}

/// An asset nothing in the catalog points at.
pub fn is_orphan(asset: &Asset) -> bool {
    usage_count(asset) == 0
}

/// Report view of an asset with its usage attached.
pub fn with_usage(asset: &Asset) -> AssetUsage {
    let usage = usage_breakdown(asset);
    AssetUsage {
        id: asset.id.clone(),
        path: asset.path.clone(),
        alt: asset.alt.clone(),
        width: asset.width,
        height: asset.height,
        created_at: asset.created_at,
        usage_count: usage.values().sum(),
        usage,
    }
}

/// Every orphan asset, oldest first. Ties keep snapshot order.
pub fn orphans(assets: &[Asset]) -> Vec<AssetUsage> {
    let mut unused: Vec<AssetUsage> = assets
        .iter()
        .filter(|asset| is_orphan(asset))
        .map(with_usage)
        .collect();
    unused.sort_by_key(|asset| asset.created_at);
    unused
}
