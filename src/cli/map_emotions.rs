//! CLI entry-point for the social-post emotion mapper.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args as ClapArgs;
use tracing::{info, instrument, warn};

use crate::{
    config::{MapperParams, Settings},
    emotions::{self, export, oracle::OpenAiOracle, reddit::RedditClient},
    pacing::FixedDelay,
};

/// Args for the `map-emotions` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Directory for the JSON and GeoJSON outputs (defaults to OUTPUTS_DIR).
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let (client_id, client_secret) = settings.reddit_credentials()?;
    let openai_key = settings.openai_key()?;
    let params = MapperParams::default();
    let output_dir = args.output_dir.unwrap_or_else(|| settings.outputs_dir.clone());

    let source = RedditClient::new(client_id, client_secret, &settings.reddit_user_agent)
        .context("build reddit client")?;
    let oracle =
        OpenAiOracle::new(openai_key, &settings.openai_model).context("build completion client")?;
    let pacer = FixedDelay(params.oracle_delay);

    let records = emotions::collect_emotions(&source, &oracle, &pacer, &params, Utc::now()).await;
    info!(count = records.len(), "collection finished");

    if records.is_empty() {
        warn!(
            lookback_days = params.lookback_days,
            per_channel_limit = params.per_channel_limit,
            "no data collected; widen the lookback window, raise the per-channel limit, or check that the subreddits have recent posts"
        );
        return Ok(());
    }

    let paths = export::write_outputs(&records, &output_dir)?;
    println!("{}", export::summarize(&records));
    println!(
        "Saved {}, {} and {}",
        paths.raw.display(),
        paths.geojson.display(),
        paths.by_date.display()
    );
    Ok(())
}
