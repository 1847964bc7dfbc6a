//! Social-post emotion mapper.
//!
//! Polls each channel, asks the oracle where and how each post feels, pins the
//! answer to known coordinates and keeps the records that resolve.

pub mod export;
pub mod locations;
pub mod oracle;
pub mod record;
pub mod reddit;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument, warn};

use crate::{config::MapperParams, pacing::Pacer};

use self::{
    oracle::EmotionOracle,
    record::{EmotionRecord, SocialPost},
    reddit::PostSource,
};

/// Outcome of a single post.
#[derive(Debug, Clone, PartialEq)]
pub enum PostOutcome {
    Accepted(Box<EmotionRecord>),
    /// The oracle call failed or returned an unparseable answer.
    NoResult,
    /// The oracle found no location in the text.
    NoLocation,
    /// The named location is not in the known table.
    Unresolved(String),
}

/// Poll every configured channel and return accepted records in arrival order.
#[instrument(skip_all, fields(channels = params.channels.len()))]
pub async fn collect_emotions(
    source: &dyn PostSource,
    oracle: &dyn EmotionOracle,
    pacer: &dyn Pacer,
    params: &MapperParams,
    now: DateTime<Utc>,
) -> Vec<EmotionRecord> {
    let window = Duration::days(params.lookback_days);
    let mut collected = Vec::new();

    for channel in &params.channels {
        info!(%channel, "collecting channel");
        let posts = match source.recent_posts(channel, params.per_channel_limit).await {
            Ok(posts) => posts,
            Err(err) => {
                warn!(%channel, %err, "listing failed; skipping channel");
                continue;
            }
        };

        for post in &posts {
            if now - post.created > window {
                continue;
            }
            let text = post.text();
            if text.chars().count() < params.min_text_len {
                continue;
            }

            match analyse_post(oracle, pacer, post, &text).await {
                PostOutcome::Accepted(record) => {
                    info!(
                        post = %post.id,
                        location = %record.location_name,
                        emotion = %record.emotion,
                        intensity = record.intensity,
                        "accepted"
                    );
                    collected.push(*record);
                }
                PostOutcome::NoResult => info!(post = %post.id, "no extraction"),
                PostOutcome::NoLocation => info!(post = %post.id, "no location found"),
                PostOutcome::Unresolved(name) => {
                    info!(post = %post.id, location = %name, "could not map location to coordinates")
                }
            }
        }
    }

    collected
}

/// Run one post through the oracle and the resolver. The pacer pauses after
/// the oracle call whatever it returned.
pub async fn analyse_post(
    oracle: &dyn EmotionOracle,
    pacer: &dyn Pacer,
    post: &SocialPost,
    text: &str,
) -> PostOutcome {
    let extraction = oracle.extract(text).await;
    pacer.pause().await;

    let Some(mut extraction) = extraction else {
        return PostOutcome::NoResult;
    };
    let location = match extraction.location.take() {
        Some(name) if !name.is_empty() => name,
        _ => return PostOutcome::NoLocation,
    };
    match locations::resolve(&location) {
        Some(coords) => PostOutcome::Accepted(Box::new(EmotionRecord::accept(
            post, location, extraction, coords,
        ))),
        None => PostOutcome::Unresolved(location),
    }
}
