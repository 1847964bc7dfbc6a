//! Data carried through the emotion mapping pipeline.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::locations::Coordinates;

/// Characters of post text kept on an accepted record.
pub const TEXT_EXCERPT_CHARS: usize = 200;

/// A post pulled from a social channel.
#[derive(Debug, Clone, PartialEq)]
pub struct SocialPost {
    pub id: String,
    pub channel: String,
    pub created: DateTime<Utc>,
    pub title: String,
    pub body: String,
    /// Site-relative permalink, e.g. `/r/nyc/comments/abc/...`.
    pub permalink: String,
}

impl SocialPost {
    /// Title and body joined the way they are sent to the oracle.
    pub fn text(&self) -> String {
        format!("{}. {}", self.title, self.body)
    }

    pub fn url(&self) -> String {
        format!("https://reddit.com{}", self.permalink)
    }
}

/// Closed set of emotion labels the oracle may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Anxiety,
    Peace,
    Sadness,
    Neutral,
}

impl Emotion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Anxiety => "anxiety",
            Self::Peace => "peace",
            Self::Sadness => "sadness",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured answer from the oracle for one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub location: Option<String>,
    pub emotion: Emotion,
    pub intensity: f64,
    #[serde(default)]
    pub reasoning: String,
}

/// A post whose location resolved to known coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionRecord {
    pub location_name: String,
    pub lat: f64,
    pub lng: f64,
    pub emotion: Emotion,
    pub intensity: f64,
    pub text: String,
    pub reasoning: String,
    #[serde(with = "naive_seconds")]
    pub timestamp: NaiveDateTime,
    pub subreddit: String,
    pub post_id: String,
    pub url: String,
}

impl EmotionRecord {
    /// Join a post, its extraction and the resolved coordinates.
    pub fn accept(
        post: &SocialPost,
        location_name: String,
        extraction: Extraction,
        coords: Coordinates,
    ) -> Self {
        let text = post.text();
        Self {
            location_name,
            lat: coords.lat,
            lng: coords.lng,
            emotion: extraction.emotion,
            intensity: extraction.intensity,
            text: text.chars().take(TEXT_EXCERPT_CHARS).collect(),
            reasoning: extraction.reasoning,
            timestamp: post.created.naive_utc(),
            subreddit: post.channel.clone(),
            post_id: post.id.clone(),
            url: post.url(),
        }
    }

    /// Calendar date of the post, `YYYY-MM-DD`.
    pub fn date_key(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }
}

/// `YYYY-MM-DDTHH:MM:SS` with whole seconds.
mod naive_seconds {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
