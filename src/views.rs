// src/views.rs
//
// Read-only derivations over a built ViewModel. The model is never written
// back into; every function here borrows it and allocates fresh output.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use itertools::Itertools;

use crate::models::{Article, Collection, HierarchyNode, ViewModel};

/// Case-insensitive substring filter over title, authors and journal. An
/// empty query matches everything.
pub fn filter_articles<'a>(articles: &'a [Article], query: &str) -> Vec<&'a Article> {
    let q = query.to_lowercase();
    articles
        .iter()
        .filter(|a| {
            a.title.to_lowercase().contains(&q)
                || a.authors.to_lowercase().contains(&q)
                || a.journal.to_lowercase().contains(&q)
        })
        .collect()
}

/// Top-N collections by item count; ties break on path for stability.
pub fn top_collections<'a>(collections: &'a [Collection], n: usize) -> Vec<&'a Collection> {
    collections
        .iter()
        .sorted_by(|a, b| b.count.cmp(&a.count).then_with(|| a.path.cmp(&b.path)))
        .take(n)
        .collect()
}

/// Collections from both libraries with at least `min_items` items, ascending
/// by overlap percentage then path. Low percentages suggest coverage gaps.
pub fn collection_gaps<'a>(vm: &'a ViewModel, min_items: u64) -> Vec<&'a Collection> {
    vm.collections
        .portal
        .iter()
        .chain(vm.collections.search.iter())
        .filter(|c| c.count >= min_items)
        .sorted_by(|a, b| {
            a.percentage
                .partial_cmp(&b.percentage)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.path.cmp(&b.path))
        })
        .collect()
}

/// Nodes with no resolvable parent: either no parent_id at all, or one that
/// does not exist in the mapping.
pub fn roots(hierarchy: &BTreeMap<String, HierarchyNode>) -> Vec<&HierarchyNode> {
    hierarchy
        .values()
        .filter(|n| match n.parent_id.as_ref() {
            None => true,
            Some(p) => !hierarchy.contains_key(p),
        })
        .collect()
}

/// Parent-chain titles for a node, root first. Malformed input can contain
/// parent cycles; the walk stops on the first repeated id.
pub fn breadcrumb(hierarchy: &BTreeMap<String, HierarchyNode>, id: &str) -> Vec<String> {
    let mut trail = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor = hierarchy.get(id);
    while let Some(node) = cursor {
        if !seen.insert(node.id.clone()) {
            break;
        }
        trail.push(node.title.clone());
        cursor = node.parent_id.as_deref().and_then(|p| hierarchy.get(p));
    }
    trail.reverse();
    trail
}
