//! Reddit listing adapter using application-only OAuth.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::error::ApiError;

use super::record::SocialPost;

const AUTH_BASE: &str = "https://www.reddit.com";
const OAUTH_BASE: &str = "https://oauth.reddit.com";
const SERVICE: &str = "reddit";

/// Source of recent posts per channel.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Up to `limit` most recent posts of `channel`, newest first.
    async fn recent_posts(&self, channel: &str, limit: usize) -> Result<Vec<SocialPost>, ApiError>;
}

/// Read-only Reddit client.
pub struct RedditClient {
    client: Client,
    auth_base: String,
    api_base: String,
    client_id: String,
    client_secret: String,
    token: OnceCell<String>,
}

impl RedditClient {
    pub fn new(client_id: &str, client_secret: &str, user_agent: &str) -> Result<Self, ApiError> {
        Self::with_base_urls(client_id, client_secret, user_agent, AUTH_BASE, OAUTH_BASE)
    }

    /// Override the token and listing hosts.
    pub fn with_base_urls(
        client_id: &str,
        client_secret: &str,
        user_agent: &str,
        auth_base: &str,
        api_base: &str,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            auth_base: auth_base.trim_end_matches('/').to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            token: OnceCell::new(),
        })
    }

    async fn access_token(&self) -> Result<&str, ApiError> {
        let token = self
            .token
            .get_or_try_init(|| async {
                let resp = self
                    .client
                    .post(format!("{}/api/v1/access_token", self.auth_base))
                    .basic_auth(&self.client_id, Some(&self.client_secret))
                    .form(&[("grant_type", "client_credentials")])
                    .send()
                    .await?;
                if !resp.status().is_success() {
                    return Err(ApiError::Status {
                        service: SERVICE,
                        status: resp.status(),
                    });
                }
                let payload: TokenResponse = resp.json().await?;
                match payload.access_token {
                    Some(token) => Ok(token),
                    None => Err(ApiError::Rejected {
                        service: SERVICE,
                        status: payload.error.unwrap_or_else(|| "no_token".to_string()),
                        message: "token endpoint returned no access_token".to_string(),
                    }),
                }
            })
            .await?;
        Ok(token.as_str())
    }
}

#[async_trait]
impl PostSource for RedditClient {
    async fn recent_posts(&self, channel: &str, limit: usize) -> Result<Vec<SocialPost>, ApiError> {
        let token = self.access_token().await?;
        let url = format!("{}/r/{}/new", self.api_base, encode(channel));
        let resp = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("limit", limit.to_string()), ("raw_json", "1".to_string())])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                service: SERVICE,
                status: resp.status(),
            });
        }

        let listing: Listing = resp.json().await?;
        let posts: Vec<SocialPost> = listing
            .data
            .children
            .into_iter()
            .filter_map(|child| child.data.into_post(channel))
            .collect();
        debug!(%channel, count = posts.len(), "fetched listing");
        Ok(posts)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    data: Submission,
}

#[derive(Debug, Deserialize)]
struct Submission {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
    created_utc: f64,
    #[serde(default)]
    permalink: String,
}

impl Submission {
    fn into_post(self, channel: &str) -> Option<SocialPost> {
        let Some(created) = DateTime::<Utc>::from_timestamp(self.created_utc as i64, 0) else {
            warn!(id = %self.id, created_utc = self.created_utc, "unrepresentable timestamp; skipping");
            return None;
        };
        Some(SocialPost {
            id: self.id,
            channel: channel.to_string(),
            created,
            title: self.title,
            body: self.selftext,
            permalink: self.permalink,
        })
    }
}
