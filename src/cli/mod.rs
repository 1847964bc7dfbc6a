//! Command-line interface wiring for urban-mood.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod map_emotions;
pub mod score_places;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "NYC place review scorer and social emotion mapper", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::ScorePlaces(args) => score_places::run(args, settings).await,
            Commands::MapEmotions(args) => map_emotions::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score seating locations by the reviews of nearby places.
    ScorePlaces(score_places::Args),
    /// Map recent NYC subreddit posts to locations and emotions.
    MapEmotions(map_emotions::Args),
}
