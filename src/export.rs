// src/export.rs
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::{fs, path::Path};

use crate::models::ViewModel;
use crate::venn::two_circle_layout;
use crate::views::collection_gaps;

const VENN_WIDTH: f64 = 640.0;
const VENN_HEIGHT: f64 = 400.0;

/// Public entry point: write the report JSON bundle into `out_dir`.
pub fn write_all_report(
    out_dir: &Path,
    generated: &str,
    vm: &ViewModel,
    min_gap_items: u64,
) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {:?}", out_dir))?;

    // 1) Headline statistics
    write_json(out_dir.join("report.statistics.json"), &vm.statistics)?;

    // 2) Article buckets for the browser
    write_json(out_dir.join("report.articles.json"), &vm.articles)?;

    // 3) Per-library collection lists (bubble chart)
    write_json(out_dir.join("report.collections.json"), &vm.collections)?;

    // 4) Collection hierarchy tree
    write_json(out_dir.join("report.hierarchy.json"), &vm.hierarchy)?;

    // 5) Venn layout (geometry precomputed so the page stays dumb)
    let venn = two_circle_layout(&vm.statistics, VENN_WIDTH, VENN_HEIGHT);
    write_json(out_dir.join("report.venn.json"), &venn)?;

    // 6) Gap table
    let gaps = collection_gaps(vm, min_gap_items);
    write_json(out_dir.join("report.gaps.json"), &gaps)?;

    // 7) Bundle index
    let counts = json!({
        "portal_only": vm.articles.portal_only.len(),
        "search_only": vm.articles.search_only.len(),
        "overlap": vm.articles.overlap.len(),
        "portal_collections": vm.collections.portal.len(),
        "search_collections": vm.collections.search.len(),
        "hierarchy_nodes": vm.hierarchy.len(),
    });
    let idx = json!({
        "generated": generated,
        "version": 1,
        "counts": counts,
        "files": [
            "report.statistics.json",
            "report.articles.json",
            "report.collections.json",
            "report.hierarchy.json",
            "report.venn.json",
            "report.gaps.json"
        ]
    });
    write_json(out_dir.join("report.index.json"), &idx)?;

    Ok(())
}

fn write_json<P: AsRef<Path>, T: ?Sized + Serialize>(path: P, value: &T) -> Result<()> {
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .map(|_| ())
        .map_err(|e| e.into())
}
