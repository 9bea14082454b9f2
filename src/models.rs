use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::csv::Row;

/* -------------------------------------------------------------------------- */
/* Raw input rows (one struct per artifact)                                   */
/* -------------------------------------------------------------------------- */

/// Pre-aggregated counts from `analysis_results.json`, passed through to the
/// view model unchanged. The original export carries extra fields (e.g.
/// `common_total`); serde ignores them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    #[serde(default)]
    pub portal_total: u64,
    #[serde(default)]
    pub search_total: u64,
    #[serde(default)]
    pub overlap: u64,
    #[serde(default)]
    pub portal_only: u64,
    #[serde(default)]
    pub search_only: u64,
}

/// One collection node of the website hierarchy tree (root depth = 0).
#[derive(Debug, Clone)]
pub struct HierarchyRow {
    pub collection_id: String,
    pub title: String,
    pub path: String,
    pub depth: u32,
    pub parent_id: Option<String>,
    pub parent_path: String,
}

impl HierarchyRow {
    pub fn from_row(row: &Row) -> Self {
        let parent = row.field("parent_id");
        HierarchyRow {
            collection_id: row.field("collection_id").to_string(),
            title: row.field("title").to_string(),
            path: row.field("path").to_string(),
            depth: parse_u32(row.field("depth")),
            parent_id: if parent.is_empty() { None } else { Some(parent.to_string()) },
            parent_path: row.field("parent_path").to_string(),
        }
    }
}

/// Per-collection aggregates; the path/id space here is independent of the
/// hierarchy rows' id space.
#[derive(Debug, Clone)]
pub struct CollectionStatsRow {
    pub collection_path: String,
    pub collection_title: String,
    pub total_items: u64,
    pub overlap_items: u64,
    pub overlap_percentage: f64,
    pub collection_depth: u32,
    pub library: String, // "Portal" | "Search"
}

impl CollectionStatsRow {
    pub fn from_row(row: &Row) -> Self {
        CollectionStatsRow {
            collection_path: row.field("collection_path").to_string(),
            collection_title: row.field("collection_title").to_string(),
            total_items: parse_u64(row.field("total_items")),
            overlap_items: parse_u64(row.field("overlap_items")),
            overlap_percentage: parse_f64(row.field("overlap_percentage")),
            collection_depth: parse_u32(row.field("collection_depth")),
            library: row.field("library").to_string(),
        }
    }
}

/// Central join table: one row per title, with the collection names it
/// belongs to in each library as delimited list strings.
#[derive(Debug, Clone)]
pub struct TitleMappingRow {
    pub title: String,
    pub normalized_title: String,
    pub portal_collections: String,
    pub search_collections: String,
    pub is_overlap: bool,
}

impl TitleMappingRow {
    pub fn from_row(row: &Row) -> Self {
        TitleMappingRow {
            title: row.field("title").to_string(),
            normalized_title: row.field("normalized_title").to_string(),
            portal_collections: row.field("portal_collections").to_string(),
            search_collections: row.field("search_collections").to_string(),
            is_overlap: parse_bool(row.field("is_overlap")),
        }
    }
}

/// Optional bibliographic enrichment; joined by normalized title, falling
/// back to the exact title.
#[derive(Debug, Clone)]
pub struct BibRecord {
    pub title: String,
    pub normalized_title: String,
    pub authors: String,
    pub year: String,
    pub item_type: String,
    pub journal: String,
    pub library: String,
}

impl BibRecord {
    pub fn from_row(row: &Row) -> Self {
        BibRecord {
            title: row.field("title").to_string(),
            normalized_title: row.field("normalized_title").to_string(),
            authors: row.field("authors").to_string(),
            year: row.field("year").to_string(),
            item_type: row.field("type").to_string(),
            journal: row.field("journal").to_string(),
            library: row.field("library").to_string(),
        }
    }
}

/// Everything the builder consumes, fully retrieved before `build` runs.
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub summary: Option<SummaryStats>,
    pub hierarchy: Vec<HierarchyRow>,
    pub collection_stats: Vec<CollectionStatsRow>,
    pub title_mappings: Vec<TitleMappingRow>,
    pub bib_records: Vec<BibRecord>,
}

/* -------------------------------------------------------------------------- */
/* Derived view-model types                                                   */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub title: String,
    pub normalized_title: String,
    pub portal_collections: String,
    pub search_collections: String,
    pub is_overlap: bool,
    pub authors: String,
    pub year: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub journal: String,
    pub library: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HierarchyNode {
    pub id: String,
    pub title: String,
    pub path: String,
    pub depth: u32,
    pub parent_id: Option<String>,
    pub parent_path: String,
    pub children: Vec<String>, // child ids, filled in a second pass
    pub articles: Vec<String>, // titles associated by collection-name substring
}

#[derive(Debug, Clone, Serialize)]
pub struct Collection {
    pub id: String, // slugified collection_path
    pub name: String,
    pub path: String,
    pub count: u64,
    pub overlap: u64,
    pub percentage: f64,
    pub depth: u32,
    pub library: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ArticleBuckets {
    pub portal_only: Vec<Article>,
    pub search_only: Vec<Article>,
    pub overlap: Vec<Article>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectionSets {
    pub portal: Vec<Collection>,
    pub search: Vec<Collection>,
}

/// The single structure the presentation layer consumes. Built once per
/// successful load and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub statistics: SummaryStats,
    pub articles: ArticleBuckets,
    pub collections: CollectionSets,
    pub hierarchy: BTreeMap<String, HierarchyNode>,
}

/* -------------------------------------------------------------------------- */
/* Field conversion helpers                                                   */
/* -------------------------------------------------------------------------- */

// Malformed fields never propagate as errors; they fall back to zero/false.

fn parse_u64(s: &str) -> u64 {
    s.trim().parse().unwrap_or(0)
}

fn parse_u32(s: &str) -> u32 {
    s.trim().parse().unwrap_or(0)
}

fn parse_f64(s: &str) -> f64 {
    s.trim().parse().unwrap_or(0.0)
}

fn parse_bool(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv;

    #[test]
    fn test_summary_stats_ignores_extra_fields() {
        let json = r#"{"portal_total":412,"search_total":468,"overlap":137,
                       "portal_only":275,"search_only":331,"common_total":137}"#;
        let stats: SummaryStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.portal_total, 412);
        assert_eq!(stats.overlap, 137);
    }

    #[test]
    fn test_summary_stats_missing_fields_default_zero() {
        let stats: SummaryStats = serde_json::from_str(r#"{"portal_total":10}"#).unwrap();
        assert_eq!(stats.portal_total, 10);
        assert_eq!(stats.search_only, 0);
    }

    #[test]
    fn test_hierarchy_row_empty_parent_is_none() {
        let rows = csv::parse(
            "collection_id,title,path,depth,parent_id,parent_path\nC01,Roots,Roots,0,,",
        );
        let h = HierarchyRow::from_row(&rows[0]);
        assert_eq!(h.collection_id, "C01");
        assert_eq!(h.depth, 0);
        assert!(h.parent_id.is_none());
    }

    #[test]
    fn test_collection_stats_malformed_numbers_default() {
        let rows = csv::parse(
            "collection_path,collection_title,total_items,overlap_items,overlap_percentage,collection_depth,library\n\
             Archives,Archives,twelve,,abc,1,Portal",
        );
        let s = CollectionStatsRow::from_row(&rows[0]);
        assert_eq!(s.total_items, 0);
        assert_eq!(s.overlap_items, 0);
        assert_eq!(s.overlap_percentage, 0.0);
        assert_eq!(s.collection_depth, 1);
    }

    #[test]
    fn test_title_mapping_bool_text() {
        let rows = csv::parse(
            "title,normalized_title,portal_collections,search_collections,is_overlap\n\
             A,a,X,Y,True\nB,b,X,,False\nC,c,,Y,yes",
        );
        assert!(TitleMappingRow::from_row(&rows[0]).is_overlap);
        assert!(!TitleMappingRow::from_row(&rows[1]).is_overlap);
        // anything that is not "true" (case-insensitive) is false
        assert!(!TitleMappingRow::from_row(&rows[2]).is_overlap);
    }

    #[test]
    fn test_bib_record_type_column() {
        let rows = csv::parse(
            "title,normalized_title,type,authors,journal,year,library\n\
             A Study,a study,Journal Article,\"Smith, J.\",Hydrology,2020,Portal",
        );
        let b = BibRecord::from_row(&rows[0]);
        assert_eq!(b.item_type, "Journal Article");
        assert_eq!(b.authors, "Smith, J.");
    }
}
