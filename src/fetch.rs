use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::csv;
use crate::models::{
    BibRecord, CollectionStatsRow, HierarchyRow, RawTables, SummaryStats, TitleMappingRow,
};

// Artifact filenames as written by the analysis pipeline's export step.
pub const SUMMARY_FILE: &str = "analysis_results.json";
pub const HIERARCHY_FILE: &str = "website_hierarchy.csv";
pub const COLLECTION_STATS_FILE: &str = "collection_analysis.csv";
pub const TITLE_MAPPINGS_FILE: &str = "title_collections.csv";
pub const BIB_RECORDS_FILE: &str = "matched_records.csv";

/// Where the analysis artifacts live: a local directory, or the static host
/// the report is served from.
#[derive(Debug, Clone)]
pub enum DataSource {
    Dir(PathBuf),
    Remote(Url),
}

impl DataSource {
    pub fn parse(location: &str) -> Result<DataSource> {
        if location.starts_with("http://") || location.starts_with("https://") {
            let mut url =
                Url::parse(location).with_context(|| format!("Invalid base URL: {location}"))?;
            // a trailing slash keeps the last path segment through join()
            if !url.path().ends_with('/') {
                url.set_path(&format!("{}/", url.path()));
            }
            Ok(DataSource::Remote(url))
        } else {
            Ok(DataSource::Dir(PathBuf::from(location)))
        }
    }
}

/// Try to retrieve one artifact; return Ok(None) when it does not exist
/// (missing file or 404). Transport errors propagate.
pub async fn fetch_artifact_opt(
    client: &Client,
    source: &DataSource,
    name: &str,
) -> Result<Option<String>> {
    match source {
        DataSource::Dir(dir) => {
            let path = dir.join(name);
            debug!("Reading artifact - path={}", path.display());
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => Ok(Some(text)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    warn!("Artifact not found - {}", path.display());
                    Ok(None)
                }
                Err(e) => Err(e).with_context(|| format!("Reading {}", path.display())),
            }
        }
        DataSource::Remote(base) => {
            let url = base
                .join(name)
                .with_context(|| format!("Joining {name} onto {base}"))?;
            debug!("Fetching artifact - url={}", url);
            let resp = client
                .get(url.clone())
                .send()
                .await
                .with_context(|| format!("Request failed for {url}"))?;
            if resp.status() == reqwest::StatusCode::NOT_FOUND {
                warn!("Artifact not found (404) - {}", url);
                return Ok(None);
            }
            let resp = resp
                .error_for_status()
                .with_context(|| format!("HTTP error for {url}"))?;
            let text = resp
                .text()
                .await
                .with_context(|| format!("Reading body for {url}"))?;
            Ok(Some(text))
        }
    }
}

/// Retrieve and decode all five artifacts. Missing artifacts degrade to an
/// absent summary / empty tables; transport and decode failures abort the
/// load so the caller can swap in the demo dataset wholesale.
pub async fn load_raw_tables(client: &Client, source: &DataSource) -> Result<RawTables> {
    let start = Instant::now();

    let summary = match fetch_artifact_opt(client, source, SUMMARY_FILE).await? {
        Some(text) => Some(
            serde_json::from_str::<SummaryStats>(&text)
                .with_context(|| format!("Decoding {SUMMARY_FILE}"))?,
        ),
        None => None,
    };

    let hierarchy = load_rows(client, source, HIERARCHY_FILE, HierarchyRow::from_row).await?;
    let collection_stats = load_rows(
        client,
        source,
        COLLECTION_STATS_FILE,
        CollectionStatsRow::from_row,
    )
    .await?;
    let title_mappings = load_rows(
        client,
        source,
        TITLE_MAPPINGS_FILE,
        TitleMappingRow::from_row,
    )
    .await?;
    let bib_records = load_rows(client, source, BIB_RECORDS_FILE, BibRecord::from_row).await?;

    info!(
        "Artifact load completed - duration={:.2}s, summary={}, hierarchy={}, collections={}, titles={}, records={}",
        start.elapsed().as_secs_f32(),
        summary.is_some(),
        hierarchy.len(),
        collection_stats.len(),
        title_mappings.len(),
        bib_records.len()
    );

    Ok(RawTables {
        summary,
        hierarchy,
        collection_stats,
        title_mappings,
        bib_records,
    })
}

async fn load_rows<T>(
    client: &Client,
    source: &DataSource,
    name: &str,
    decode: fn(&csv::Row) -> T,
) -> Result<Vec<T>> {
    Ok(match fetch_artifact_opt(client, source, name).await? {
        Some(text) => csv::parse(&text).iter().map(decode).collect(),
        None => Vec::new(),
    })
}
