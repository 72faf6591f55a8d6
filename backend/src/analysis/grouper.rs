//! Group records by a derived key.
//!
//! # Architecture
//!
//! ```text
//! Snapshot (records)              →  Duplicate groups
//! ┌──────────────────────────┐       ┌──────────────────────────┐
//! │ id: 1, slug: album-x     │       │ album-x → [1, 3]         │
//! │ id: 2, slug: album-y     │  →    └──────────────────────────┘
//! │ id: 3, slug: album-x     │       (album-y is a singleton,
//! └──────────────────────────┘        dropped by duplicates_only)
//! ```
//!
//! Keys keep the order in which they were first seen, and members keep
//! snapshot order, so the output never depends on hash-map iteration.

use std::collections::HashMap;
use std::hash::Hash;

/// Records grouped by key, in first-seen key order.
#[derive(Debug, Clone)]
pub struct Groups<K, T> {
    entries: Vec<(K, Vec<T>)>,
}

impl<K, T> Groups<K, T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(K, Vec<T>)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<(K, Vec<T>)> {
        self.entries
    }
}

/// Group `items` by `key_fn`.
///
/// Items for which `key_fn` returns `None` are left out entirely rather
/// than grouped under an empty key.
pub fn group_by<K, T, I, F>(items: I, mut key_fn: F) -> Groups<K, T>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> Option<K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut entries: Vec<(K, Vec<T>)> = Vec::new();

    for item in items {
        let Some(key) = key_fn(&item) else {
            continue;
        };
        match index.get(&key) {
            Some(&slot) => entries[slot].1.push(item),
            None => {
                index.insert(key.clone(), entries.len());
                entries.push((key, vec![item]));
            }
        }
    }

    Groups { entries }
}

/// Keep only the groups with more than one member.
pub fn duplicates_only<K, T>(groups: Groups<K, T>) -> Vec<(K, Vec<T>)> {
    groups
        .into_entries()
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .collect()
}

/// [`group_by`] followed by [`duplicates_only`].
pub fn find_duplicates<K, T, I, F>(items: I, key_fn: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> Option<K>,
{
    duplicates_only(group_by(items, key_fn))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let items = vec![("b", 1), ("a", 2), ("b", 3), ("c", 4), ("a", 5)];
        let groups = group_by(items, |(k, _)| Some(*k));

        let keys: Vec<&str> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);

        let entries = groups.into_entries();
        assert_eq!(entries[0].1, vec![("b", 1), ("b", 3)]);
        assert_eq!(entries[1].1, vec![("a", 2), ("a", 5)]);
    }

    #[test]
    fn test_duplicates_only_drops_singletons() {
        let items = vec!["x", "y", "x", "z"];
        let dups = find_duplicates(items, |s| Some(s.to_string()));

        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].0, "x");
        assert_eq!(dups[0].1.len(), 2);
    }

    #[test]
    fn test_none_key_is_excluded() {
        let items = vec![Some("a"), None, None, Some("a")];
        let groups = group_by(items, |v| v.map(str::to_string));

        assert_eq!(groups.len(), 1);
        assert!(find_duplicates(vec![None::<&str>, None], |v| v.map(str::to_string)).is_empty());
    }

    #[test]
    fn test_borrowed_items() {
        let owned = vec![String::from("k"), String::from("k")];
        let dups = find_duplicates(owned.iter(), |s| Some(s.len()));
        assert_eq!(dups[0].1, vec![&owned[0], &owned[1]]);
    }
}
