//! Runtime configuration for urban-mood.

use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;

use crate::error::ConfigError;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Google Places API key used by the review scorer.
    pub maps_api_key: Option<String>,
    /// Reddit application id for client-credentials OAuth.
    pub reddit_client_id: Option<String>,
    /// Reddit application secret.
    pub reddit_client_secret: Option<String>,
    /// User agent sent to Reddit.
    pub reddit_user_agent: String,
    /// Key for the chat completion API.
    pub openai_api_key: Option<String>,
    /// Completion model used for location/emotion extraction.
    pub openai_model: String,
    /// Root folder for input datasets.
    pub data_dir: PathBuf,
    /// Root folder for generated outputs.
    pub outputs_dir: PathBuf,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));

        std::fs::create_dir_all(&data_dir).context("creating data dir")?;
        std::fs::create_dir_all(&outputs_dir).context("creating outputs dir")?;

        Ok(Self {
            maps_api_key: non_empty_var("GOOGLE_MAPS_API_KEY"),
            reddit_client_id: non_empty_var("REDDIT_CLIENT_ID"),
            reddit_client_secret: non_empty_var("REDDIT_CLIENT_SECRET"),
            reddit_user_agent: env::var("REDDIT_USER_AGENT")
                .unwrap_or_else(|_| "NYC_Emotion_Mapper/1.0".to_string()),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            data_dir,
            outputs_dir,
        })
    }

    /// Places API key, or a startup error when it is absent.
    pub fn maps_key(&self) -> Result<&str, ConfigError> {
        required(&self.maps_api_key, "GOOGLE_MAPS_API_KEY")
    }

    /// Reddit client id and secret.
    pub fn reddit_credentials(&self) -> Result<(&str, &str), ConfigError> {
        Ok((
            required(&self.reddit_client_id, "REDDIT_CLIENT_ID")?,
            required(&self.reddit_client_secret, "REDDIT_CLIENT_SECRET")?,
        ))
    }

    /// Chat completion API key.
    pub fn openai_key(&self) -> Result<&str, ConfigError> {
        required(&self.openai_api_key, "OPENAI_API_KEY")
    }

    /// Convenience helper for derived path segments.
    pub fn join_data<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.data_dir.join(path)
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn required<'a>(value: &'a Option<String>, var: &'static str) -> Result<&'a str, ConfigError> {
    value
        .as_deref()
        .ok_or(ConfigError::MissingCredential(var))
}

/// Fixed parameters of the nearby-place review scorer.
#[derive(Debug, Clone)]
pub struct ScorerParams {
    /// Only input rows from this borough are scored.
    pub borough: String,
    /// Nearby search radius in metres.
    pub radius_m: u32,
    /// Place categories requested from the nearby search.
    pub categories: Vec<&'static str>,
    /// Upper bound on places inspected per location.
    pub max_places: usize,
    /// Courtesy throttle after every place-details call.
    pub details_delay: Duration,
}

impl Default for ScorerParams {
    fn default() -> Self {
        Self {
            borough: "Manhattan".to_string(),
            radius_m: 200,
            categories: vec!["library", "cafe", "community_center", "park"],
            max_places: 20,
            details_delay: Duration::from_millis(300),
        }
    }
}

/// Fixed parameters of the social-post emotion mapper.
#[derive(Debug, Clone)]
pub struct MapperParams {
    /// Subreddits polled, in order.
    pub channels: Vec<String>,
    /// Posts older than this many days are skipped.
    pub lookback_days: i64,
    /// Most recent posts requested per channel.
    pub per_channel_limit: usize,
    /// Combined title and body shorter than this (in chars) is skipped.
    pub min_text_len: usize,
    /// Courtesy throttle after every oracle call.
    pub oracle_delay: Duration,
}

impl Default for MapperParams {
    fn default() -> Self {
        Self {
            channels: ["nyc", "AskNYC", "newyorkcity", "Brooklyn", "Manhattan", "Queens"]
                .into_iter()
                .map(String::from)
                .collect(),
            lookback_days: 14,
            per_channel_limit: 50,
            min_text_len: 20,
            oracle_delay: Duration::from_secs(2),
        }
    }
}
