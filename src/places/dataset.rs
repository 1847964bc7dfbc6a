//! CSV input and output for the review scorer.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use super::PlaceScore;

/// A seating location selected for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatingLocation {
    /// Zero-based index of the data row in the source file.
    pub row_id: usize,
    pub borough: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct SeatingRow {
    #[serde(rename = "BoroName", default)]
    boro_name: String,
    #[serde(rename = "Latitude", default, deserialize_with = "csv::invalid_option")]
    latitude: Option<f64>,
    #[serde(rename = "Longitude", default, deserialize_with = "csv::invalid_option")]
    longitude: Option<f64>,
}

/// Read the seating dataset, keeping rows from `borough` only.
pub fn load_locations(path: &Path, borough: &str) -> Result<Vec<SeatingLocation>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("open {}", path.display()))?;

    let mut out = Vec::new();
    for (row_id, row) in reader.deserialize::<SeatingRow>().enumerate() {
        let row = row.with_context(|| format!("parse row {row_id} of {}", path.display()))?;
        if row.boro_name != borough {
            continue;
        }
        match (row.latitude, row.longitude) {
            (Some(latitude), Some(longitude)) => out.push(SeatingLocation {
                row_id,
                borough: row.boro_name,
                latitude,
                longitude,
            }),
            _ => warn!(row_id, "seating row without coordinates; skipping"),
        }
    }
    info!(path = %path.display(), %borough, count = out.len(), "loaded seating locations");
    Ok(out)
}

/// Write scored locations as CSV, header included even when empty.
pub fn write_scores(path: &Path, scores: &[PlaceScore]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    writer.write_record([
        "bench_id",
        "lat",
        "lon",
        "score",
        "reviews",
        "positive_count",
        "negative_count",
    ])?;
    for score in scores {
        writer.serialize(score)?;
    }
    writer.flush()?;
    info!(rows = scores.len(), path = %path.display(), "wrote place scores");
    Ok(())
}
