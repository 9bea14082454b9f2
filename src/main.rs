mod builder;
mod csv;
mod export;
mod fallback;
mod fetch;
mod models;
mod normalize;
mod venn;
mod views;

use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use reqwest::Client;
use tracing::{error, info};

use fetch::DataSource;

/// Zotero library comparison - report view-model builder
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory or base URL holding the analysis artifacts (default: "data")
    #[arg(short, long, default_value = "data")]
    data: String,

    /// Output directory for the report bundle (default: "out")
    #[arg(short, long, default_value = "out")]
    output_dir: String,

    /// Minimum item count for a collection to appear in the gap table
    #[arg(long, default_value_t = 5)]
    min_items: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    let args = Args::parse();
    info!(
        "Starting zotero_overlap - data={}, output_dir={}",
        args.data, args.output_dir
    );

    let source = DataSource::parse(&args.data)?;
    let client = Client::builder().build()?;

    let start = std::time::Instant::now();

    // One failure mode only: if any required artifact cannot be retrieved or
    // decoded, the whole report runs on the demo dataset.
    let vm = match fetch::load_raw_tables(&client, &source).await {
        Ok(raw) => builder::build(&raw),
        Err(e) => {
            error!("Could not load analysis artifacts, using demo dataset - {e:#}");
            fallback::demo_view_model()
        }
    };

    info!(
        "View model built - portal_only={}, search_only={}, overlap={}, collections={}+{}, nodes={}, duration={:.2}s",
        vm.articles.portal_only.len(),
        vm.articles.search_only.len(),
        vm.articles.overlap.len(),
        vm.collections.portal.len(),
        vm.collections.search.len(),
        vm.hierarchy.len(),
        start.elapsed().as_secs_f32()
    );

    for gap in views::collection_gaps(&vm, args.min_items).iter().take(5) {
        info!(
            "Low-overlap collection - library={}, path={}, items={}, overlap={:.1}%",
            gap.library, gap.path, gap.count, gap.percentage
        );
    }

    let generated = Utc::now().format("%Y-%m-%d").to_string();
    export::write_all_report(Path::new(&args.output_dir), &generated, &vm, args.min_items)?;

    info!("Report bundle written to {}", args.output_dir);
    Ok(())
}
