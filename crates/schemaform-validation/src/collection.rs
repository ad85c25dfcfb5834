//! Collection validation functions

use std::collections::BTreeSet;

/// Validates minimum number of items in a collection
pub fn has_min_items<T>(items: &[T], min: usize) -> bool {
    items.len() >= min
}

/// Validates maximum number of items in a collection
pub fn has_max_items<T>(items: &[T], max: usize) -> bool {
    items.len() <= max
}

/// Validates all items in collection are unique
pub fn all_unique<T: Ord>(items: &[T]) -> bool {
    let mut seen = BTreeSet::new();
    items.iter().all(|item| seen.insert(item))
}
