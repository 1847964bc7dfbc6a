//! Nearby-place review scorer.
//!
//! For each seating location, look up nearby places, pull their reviews and
//! score the combined text with [`keywords::score_reviews`].

pub mod client;
pub mod dataset;
pub mod keywords;

use serde::Serialize;
use tracing::{error, info, instrument};

use crate::{config::ScorerParams, error::ApiError, pacing::Pacer};

use self::{client::PlacesApi, dataset::SeatingLocation};

/// One scored row of the output dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceScore {
    pub bench_id: usize,
    pub lat: f64,
    pub lon: f64,
    pub score: f64,
    pub reviews: usize,
    pub positive_count: usize,
    pub negative_count: usize,
}

/// Score every location in order. Rows whose lookups fail are logged and left out.
pub async fn score_locations(
    api: &dyn PlacesApi,
    pacer: &dyn Pacer,
    locations: &[SeatingLocation],
    params: &ScorerParams,
) -> Vec<PlaceScore> {
    let mut results = Vec::with_capacity(locations.len());
    for (idx, location) in locations.iter().enumerate() {
        info!(row = location.row_id, "processing location {}/{}", idx + 1, locations.len());
        match score_location(api, pacer, location, params).await {
            Ok(score) => results.push(score),
            Err(err) => error!(row = location.row_id, %err, "scoring failed; row omitted"),
        }
    }
    results
}

/// Gather reviews around one location and score them.
#[instrument(skip_all, fields(row = location.row_id))]
pub async fn score_location(
    api: &dyn PlacesApi,
    pacer: &dyn Pacer,
    location: &SeatingLocation,
    params: &ScorerParams,
) -> Result<PlaceScore, ApiError> {
    let reviews = collect_reviews(api, pacer, location, params).await?;
    let tally = keywords::score_reviews(&reviews);
    Ok(PlaceScore {
        bench_id: location.row_id,
        lat: location.latitude,
        lon: location.longitude,
        score: tally.score,
        reviews: tally.total,
        positive_count: tally.positive,
        negative_count: tally.negative,
    })
}

async fn collect_reviews(
    api: &dyn PlacesApi,
    pacer: &dyn Pacer,
    location: &SeatingLocation,
    params: &ScorerParams,
) -> Result<Vec<String>, ApiError> {
    let places = api
        .nearby(
            location.latitude,
            location.longitude,
            params.radius_m,
            &params.categories,
        )
        .await?;

    let mut texts = Vec::new();
    for place in places.iter().take(params.max_places) {
        let reviews = api.reviews(&place.place_id).await;
        pacer.pause().await;
        texts.extend(reviews?);
    }
    Ok(texts)
}
