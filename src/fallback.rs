// Demo dataset shown when the live artifacts cannot be loaded. The report is
// either fully live or fully on this data, never a mix.

use crate::builder;
use crate::models::{
    BibRecord, CollectionStatsRow, HierarchyRow, RawTables, SummaryStats, TitleMappingRow,
    ViewModel,
};

/// A fresh demo view model. This is a pure factory (no shared global), and it
/// runs through the real builder so the demo can never drift from the live
/// shape.
pub fn demo_view_model() -> ViewModel {
    builder::build(&demo_tables())
}

fn demo_tables() -> RawTables {
    RawTables {
        summary: Some(SummaryStats {
            portal_total: 412,
            search_total: 468,
            overlap: 137,
            portal_only: 275,
            search_only: 331,
        }),
        hierarchy: vec![
            hier("DEMO01", "Nechako Watershed", "Nechako Watershed", 0, None, ""),
            hier(
                "DEMO02",
                "Hydrology",
                "Nechako Watershed/Hydrology",
                1,
                Some("DEMO01"),
                "Nechako Watershed",
            ),
            hier(
                "DEMO03",
                "Fisheries",
                "Nechako Watershed/Fisheries",
                1,
                Some("DEMO01"),
                "Nechako Watershed",
            ),
        ],
        collection_stats: vec![
            stat("Nechako Watershed", "Nechako Watershed", 180, 52, 28.89, 0, "Portal"),
            stat(
                "Nechako Watershed/Hydrology",
                "Hydrology",
                64,
                21,
                32.81,
                1,
                "Portal",
            ),
            stat(
                "Saturation Search/Fisheries",
                "Fisheries",
                97,
                30,
                30.93,
                1,
                "Search",
            ),
        ],
        title_mappings: vec![
            mapping(
                "Sediment transport in the Nechako River",
                "sediment transport in the nechako river",
                "Hydrology",
                "Fisheries",
                true,
            ),
            mapping(
                "White sturgeon recruitment failure",
                "white sturgeon recruitment failure",
                "",
                "Fisheries",
                false,
            ),
            mapping(
                "Historical flows at Cheslatta Falls",
                "historical flows at cheslatta falls",
                "Hydrology",
                "",
                false,
            ),
        ],
        bib_records: vec![BibRecord {
            title: "White sturgeon recruitment failure".to_string(),
            normalized_title: "white sturgeon recruitment failure".to_string(),
            authors: "McAdam, S. O.".to_string(),
            year: "2011".to_string(),
            item_type: "Journal Article".to_string(),
            journal: "Transactions of the American Fisheries Society".to_string(),
            library: "Search".to_string(),
        }],
    }
}

fn hier(
    id: &str,
    title: &str,
    path: &str,
    depth: u32,
    parent: Option<&str>,
    parent_path: &str,
) -> HierarchyRow {
    HierarchyRow {
        collection_id: id.to_string(),
        title: title.to_string(),
        path: path.to_string(),
        depth,
        parent_id: parent.map(str::to_string),
        parent_path: parent_path.to_string(),
    }
}

fn stat(
    path: &str,
    title: &str,
    total: u64,
    overlap: u64,
    pct: f64,
    depth: u32,
    library: &str,
) -> CollectionStatsRow {
    CollectionStatsRow {
        collection_path: path.to_string(),
        collection_title: title.to_string(),
        total_items: total,
        overlap_items: overlap,
        overlap_percentage: pct,
        collection_depth: depth,
        library: library.to_string(),
    }
}

fn mapping(
    title: &str,
    norm: &str,
    portal: &str,
    search: &str,
    is_overlap: bool,
) -> TitleMappingRow {
    TitleMappingRow {
        title: title.to_string(),
        normalized_title: norm.to_string(),
        portal_collections: portal.to_string(),
        search_collections: search.to_string(),
        is_overlap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_is_fully_populated() {
        let vm = demo_view_model();
        assert_eq!(vm.statistics.portal_total, 412);
        assert_eq!(vm.articles.overlap.len(), 1);
        assert_eq!(vm.articles.portal_only.len(), 1);
        assert_eq!(vm.articles.search_only.len(), 1);
        assert_eq!(vm.collections.portal.len(), 2);
        assert_eq!(vm.collections.search.len(), 1);
        assert_eq!(vm.hierarchy.len(), 3);
        assert_eq!(vm.hierarchy["DEMO01"].children, vec!["DEMO02", "DEMO03"]);
    }

    #[test]
    fn test_demo_factory_returns_fresh_values() {
        let mut first = demo_view_model();
        first.articles.overlap.clear();
        // a second call is unaffected by mutations of the first
        assert_eq!(demo_view_model().articles.overlap.len(), 1);
    }

    #[test]
    fn test_demo_bib_enrichment_applies() {
        let vm = demo_view_model();
        assert_eq!(vm.articles.search_only[0].authors, "McAdam, S. O.");
        // no bib record for this one, so defaults apply
        assert_eq!(vm.articles.portal_only[0].authors, "Unknown");
    }
}
