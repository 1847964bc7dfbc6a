//! Entry point wiring CLI dispatch to the collectors.

use anyhow::Result;
use tracing::{info, instrument};
use urban_mood::{cli::Cli, config::Settings, logging};

#[tokio::main]
#[instrument]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing()?;
    let settings = Settings::load()?;

    info!(?cli, "starting command");
    cli.dispatch(settings).await
}
