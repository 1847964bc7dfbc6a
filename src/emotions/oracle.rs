//! Location/emotion extraction through a chat completion API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ApiError;

use super::record::Extraction;

const OPENAI_BASE: &str = "https://api.openai.com/v1";
const SERVICE: &str = "chat completion";
const TEMPERATURE: f32 = 0.3;

const SYSTEM_PROMPT: &str = r#"Extract NYC location and emotion from text.
Return JSON only:
{
    "location": "specific place name in NYC (or null if none)",
    "emotion": "joy|anxiety|peace|sadness|neutral",
    "intensity": 0.0-1.0,
    "reasoning": "brief why"
}

Common NYC locations: Central Park, Times Square, Brooklyn Bridge,
Union Square, East Village, Williamsburg, etc.

If no specific location mentioned, return location: null"#;

/// Text classifier returning a location and emotion, or nothing.
#[async_trait]
pub trait EmotionOracle: Send + Sync {
    /// `None` covers every failure; callers skip the post.
    async fn extract(&self, text: &str) -> Option<Extraction>;
}

/// OpenAI-compatible chat completion client.
pub struct OpenAiOracle {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiOracle {
    pub fn new(api_key: &str, model: &str) -> Result<Self, ApiError> {
        Self::with_base_url(api_key, model, OPENAI_BASE)
    }

    /// Target any OpenAI-compatible endpoint.
    pub fn with_base_url(api_key: &str, model: &str, base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    /// Single completion round trip, no retry.
    pub async fn complete(&self, text: &str) -> Result<Extraction, ApiError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            temperature: TEMPERATURE,
        };

        debug!(model = %self.model, "sending extraction request");
        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                service: SERVICE,
                status: resp.status(),
            });
        }

        let payload: ChatResponse = resp.json().await?;
        let content = payload
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| malformed("response has no message content"))?;
        parse_extraction(&content)
    }
}

#[async_trait]
impl EmotionOracle for OpenAiOracle {
    async fn extract(&self, text: &str) -> Option<Extraction> {
        match self.complete(text).await {
            Ok(extraction) => Some(extraction),
            Err(err) => {
                warn!(%err, "extraction failed");
                None
            }
        }
    }
}

/// Parse completion content against the extraction schema.
pub fn parse_extraction(content: &str) -> Result<Extraction, ApiError> {
    let extraction: Extraction =
        serde_json::from_str(content.trim()).map_err(|e| malformed(e.to_string()))?;
    if !(0.0..=1.0).contains(&extraction.intensity) {
        return Err(malformed(format!(
            "intensity {} outside [0, 1]",
            extraction.intensity
        )));
    }
    Ok(extraction)
}

fn malformed(reason: impl Into<String>) -> ApiError {
    ApiError::Malformed {
        service: SERVICE,
        reason: reason.into(),
    }
}
