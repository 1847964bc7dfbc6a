//! Google Places adapter: nearby search and review lookup.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;

const MAPS_BASE: &str = "https://maps.googleapis.com";
const SERVICE: &str = "google places";

/// Minimal view of a place returned by a nearby search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NearbyPlace {
    pub place_id: String,
}

/// Places capability consumed by the review scorer.
#[async_trait]
pub trait PlacesApi: Send + Sync {
    /// Places of the given categories within `radius_m` metres of a point.
    async fn nearby(
        &self,
        lat: f64,
        lon: f64,
        radius_m: u32,
        categories: &[&str],
    ) -> Result<Vec<NearbyPlace>, ApiError>;

    /// Review texts attached to a place; empty when it has none.
    async fn reviews(&self, place_id: &str) -> Result<Vec<String>, ApiError>;
}

/// HTTP client for the Places web service.
pub struct GoogleMapsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GoogleMapsClient {
    pub fn new(api_key: &str) -> Result<Self, ApiError> {
        Self::with_base_url(api_key, MAPS_BASE)
    }

    /// Point the client at another host, e.g. a local mock.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent("urban-mood/0.1")
            .timeout(Duration::from_secs(30))
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/maps/api/place/{endpoint}/json", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                service: SERVICE,
                status: resp.status(),
            });
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl PlacesApi for GoogleMapsClient {
    async fn nearby(
        &self,
        lat: f64,
        lon: f64,
        radius_m: u32,
        categories: &[&str],
    ) -> Result<Vec<NearbyPlace>, ApiError> {
        let mut query = vec![
            ("location", format!("{lat},{lon}")),
            ("radius", radius_m.to_string()),
        ];
        query.extend(categories.iter().map(|c| ("type", c.to_string())));

        let payload: NearbySearchResponse = self.get("nearbysearch", &query).await?;
        check_status(&payload.status, payload.error_message)?;
        debug!(lat, lon, count = payload.results.len(), "nearby search");
        Ok(payload.results)
    }

    async fn reviews(&self, place_id: &str) -> Result<Vec<String>, ApiError> {
        let query = [
            ("place_id", place_id.to_string()),
            ("fields", "reviews".to_string()),
        ];
        let payload: DetailsResponse = self.get("details", &query).await?;
        check_status(&payload.status, payload.error_message)?;
        Ok(payload
            .result
            .and_then(|r| r.reviews)
            .unwrap_or_default()
            .into_iter()
            .map(|r| r.text)
            .collect())
    }
}

fn check_status(status: &str, message: Option<String>) -> Result<(), ApiError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(ApiError::Rejected {
            service: SERVICE,
            status: other.to_string(),
            message: message.unwrap_or_default(),
        }),
    }
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<NearbyPlace>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    result: Option<PlaceDetails>,
}

#[derive(Debug, Deserialize)]
struct PlaceDetails {
    reviews: Option<Vec<Review>>,
}

#[derive(Debug, Deserialize)]
struct Review {
    #[serde(default)]
    text: String,
}
