// src/builder.rs
//
// The view-model builder: one deterministic pass over the five input tables
// producing the structure the presentation layer consumes. No I/O, no
// mutation of inputs, and no failure mode; missing or malformed optional
// data degrades to empty lists and zero counts.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::models::{
    Article, ArticleBuckets, BibRecord, Collection, CollectionSets, HierarchyNode, RawTables,
    TitleMappingRow, ViewModel,
};
use crate::normalize::slugify;

/* -------------------------------------------------------------------------- */
/* Entry point                                                                */
/* -------------------------------------------------------------------------- */

/// Build the view model. Later steps reference earlier-built structures by
/// key, so the step order is fixed.
pub fn build(raw: &RawTables) -> ViewModel {
    let statistics = raw.summary.unwrap_or_default();
    let articles = build_articles(&raw.title_mappings, &raw.bib_records);
    let hierarchy = build_hierarchy(raw);
    let collections = build_collections(raw);

    ViewModel {
        statistics,
        articles,
        collections,
        hierarchy,
    }
}

/* -------------------------------------------------------------------------- */
/* Articles                                                                   */
/* -------------------------------------------------------------------------- */

enum Bucket {
    Overlap,
    PortalOnly,
    SearchOnly,
}

fn build_articles(mappings: &[TitleMappingRow], records: &[BibRecord]) -> ArticleBuckets {
    // First-wins indexes over the bib records. Equivalent to the front end's
    // linear "first match in input order" scan, and stable even when a
    // normalized title appears more than once.
    let mut by_norm: HashMap<&str, &BibRecord> = HashMap::new();
    let mut by_title: HashMap<&str, &BibRecord> = HashMap::new();
    for rec in records {
        by_norm.entry(rec.normalized_title.as_str()).or_insert(rec);
        by_title.entry(rec.title.as_str()).or_insert(rec);
    }

    let mut buckets = ArticleBuckets::default();
    for row in mappings {
        if row.title.is_empty() {
            continue;
        }

        let bib = by_norm
            .get(row.normalized_title.as_str())
            .or_else(|| by_title.get(row.title.as_str()));
        let article = make_article(row, bib.copied());

        match classify(row) {
            Some(Bucket::Overlap) => buckets.overlap.push(article),
            Some(Bucket::PortalOnly) => buckets.portal_only.push(article),
            Some(Bucket::SearchOnly) => buckets.search_only.push(article),
            None => {
                // Contradictory or empty-on-both-sides rows belong to no
                // bucket; dropping them silently is the documented behavior.
                debug!("Unbucketed title dropped - title={}", row.title);
            }
        }
    }
    buckets
}

/// Exactly one bucket per title, or none. is_overlap wins outright; the
/// *_only buckets additionally require the other side to be empty.
fn classify(row: &TitleMappingRow) -> Option<Bucket> {
    if row.is_overlap {
        Some(Bucket::Overlap)
    } else if !row.portal_collections.is_empty() && row.search_collections.is_empty() {
        Some(Bucket::PortalOnly)
    } else if !row.search_collections.is_empty() && row.portal_collections.is_empty() {
        Some(Bucket::SearchOnly)
    } else {
        None
    }
}

fn make_article(row: &TitleMappingRow, bib: Option<&BibRecord>) -> Article {
    let (authors, year, item_type, journal, library) = match bib {
        Some(b) => (
            b.authors.clone(),
            b.year.clone(),
            b.item_type.clone(),
            b.journal.clone(),
            b.library.clone(),
        ),
        None => (
            "Unknown".to_string(),
            "Unknown".to_string(),
            "Article".to_string(),
            String::new(),
            String::new(),
        ),
    };

    Article {
        title: row.title.clone(),
        normalized_title: row.normalized_title.clone(),
        portal_collections: row.portal_collections.clone(),
        search_collections: row.search_collections.clone(),
        is_overlap: row.is_overlap,
        authors,
        year,
        item_type,
        journal,
        library,
    }
}

/* -------------------------------------------------------------------------- */
/* Hierarchy                                                                  */
/* -------------------------------------------------------------------------- */

fn build_hierarchy(raw: &RawTables) -> BTreeMap<String, HierarchyNode> {
    let mut hierarchy: BTreeMap<String, HierarchyNode> = BTreeMap::new();

    for row in &raw.hierarchy {
        // Name-based association: a title hangs off every node whose title
        // occurs as a substring of the row's collection-list strings. This
        // mirrors the report exactly, short-title false positives included.
        let articles: Vec<String> = raw
            .title_mappings
            .iter()
            .filter(|m| {
                m.portal_collections.contains(&row.title)
                    || m.search_collections.contains(&row.title)
            })
            .map(|m| m.title.clone())
            .collect();

        // Later rows with a duplicate id overwrite earlier ones.
        hierarchy.insert(
            row.collection_id.clone(),
            HierarchyNode {
                id: row.collection_id.clone(),
                title: row.title.clone(),
                path: row.path.clone(),
                depth: row.depth,
                parent_id: row.parent_id.clone(),
                parent_path: row.parent_path.clone(),
                children: Vec::new(),
                articles,
            },
        );
    }

    // Second pass: child links. A parent_id that is not a key in the map
    // leaves the node as a root; it is never added to any children list.
    let links: Vec<(String, String)> = hierarchy
        .values()
        .filter_map(|n| n.parent_id.as_ref().map(|p| (n.id.clone(), p.clone())))
        .collect();
    for (child, parent) in links {
        if let Some(node) = hierarchy.get_mut(&parent) {
            node.children.push(child);
        }
    }

    hierarchy
}

/* -------------------------------------------------------------------------- */
/* Collections                                                                */
/* -------------------------------------------------------------------------- */

fn build_collections(raw: &RawTables) -> CollectionSets {
    let mut sets = CollectionSets::default();

    for row in &raw.collection_stats {
        let collection = Collection {
            id: slugify(&row.collection_path),
            name: row.collection_title.clone(),
            path: row.collection_path.clone(),
            count: row.total_items,
            overlap: row.overlap_items,
            percentage: row.overlap_percentage,
            depth: row.collection_depth,
            library: row.library.clone(),
        };

        match row.library.as_str() {
            "Portal" => sets.portal.push(collection),
            "Search" => sets.search.push(collection),
            other => {
                debug!("Collection row with unknown library dropped - library={other}");
            }
        }
    }

    sets
}
