//! CLI entry-point for the nearby-place review scorer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::{ScorerParams, Settings},
    pacing::FixedDelay,
    places::{self, client::GoogleMapsClient, dataset},
};

const DEFAULT_INPUT: &str = "Seating_Locations_20251017.csv";
const DEFAULT_OUTPUT: &str = "bench_scores.csv";

/// Args for the `score-places` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Seating locations CSV (defaults to the file of that name in DATA_DIR).
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Destination CSV (defaults to OUTPUTS_DIR/bench_scores.csv).
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let api_key = settings.maps_key()?;
    let params = ScorerParams::default();
    let input = args.input.unwrap_or_else(|| settings.join_data(DEFAULT_INPUT));
    let output = args
        .output
        .unwrap_or_else(|| settings.join_output(DEFAULT_OUTPUT));

    let locations = dataset::load_locations(&input, &params.borough)?;
    let client = GoogleMapsClient::new(api_key).context("build places client")?;
    let pacer = FixedDelay(params.details_delay);

    let scores = places::score_locations(&client, &pacer, &locations, &params).await;
    dataset::write_scores(&output, &scores)?;

    info!(scored = scores.len(), total = locations.len(), "scoring finished");
    println!("Done: {} locations scored -> {}", scores.len(), output.display());
    Ok(())
}
