//! Output views over accepted emotion records.

use std::{
    collections::BTreeMap,
    fmt,
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

use super::record::{Emotion, EmotionRecord};

pub const RAW_FILE: &str = "reddit_emotions_raw.json";
pub const GEOJSON_FILE: &str = "reddit_emotions.geojson";
pub const BY_DATE_FILE: &str = "reddit_emotions_by_date.json";

const TOP_LOCATIONS: usize = 10;

/// GeoJSON `FeatureCollection` of point features.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub geometry: Point,
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, Serialize)]
pub struct Point {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// `[longitude, latitude]`.
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureProperties {
    pub location: String,
    pub emotion: Emotion,
    pub intensity: f64,
    pub text: String,
    pub reasoning: String,
    pub timestamp: String,
    pub subreddit: String,
    pub url: String,
}

/// One point feature per record, longitude first.
pub fn to_geojson(records: &[EmotionRecord]) -> FeatureCollection {
    let features = records
        .iter()
        .map(|r| Feature {
            kind: "Feature",
            geometry: Point {
                kind: "Point",
                coordinates: [r.lng, r.lat],
            },
            properties: FeatureProperties {
                location: r.location_name.clone(),
                emotion: r.emotion,
                intensity: r.intensity,
                text: r.text.clone(),
                reasoning: r.reasoning.clone(),
                timestamp: r.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
                subreddit: r.subreddit.clone(),
                url: r.url.clone(),
            },
        })
        .collect();
    FeatureCollection {
        kind: "FeatureCollection",
        features,
    }
}

/// Bucket records by calendar date, keeping arrival order inside each bucket.
pub fn group_by_date(records: &[EmotionRecord]) -> IndexMap<String, Vec<EmotionRecord>> {
    let mut by_date: IndexMap<String, Vec<EmotionRecord>> = IndexMap::new();
    for record in records {
        by_date
            .entry(record.date_key())
            .or_default()
            .push(record.clone());
    }
    by_date
}

/// Paths written by [`write_outputs`].
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub raw: PathBuf,
    pub geojson: PathBuf,
    pub by_date: PathBuf,
}

/// Persist the three views as pretty-printed JSON under `dir`.
pub fn write_outputs(records: &[EmotionRecord], dir: &Path) -> Result<OutputPaths> {
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let paths = OutputPaths {
        raw: dir.join(RAW_FILE),
        geojson: dir.join(GEOJSON_FILE),
        by_date: dir.join(BY_DATE_FILE),
    };

    write_json(&paths.raw, records)?;
    info!(path = %paths.raw.display(), count = records.len(), "saved raw records");
    write_json(&paths.geojson, &to_geojson(records))?;
    info!(path = %paths.geojson.display(), "saved geojson");
    write_json(&paths.by_date, &group_by_date(records))?;
    info!(path = %paths.by_date.display(), "saved date-grouped records");

    Ok(paths)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("write {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

/// Frequency tables printed at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionSummary {
    pub total: usize,
    /// Most frequent first; ties keep first-seen order.
    pub emotions: Vec<(Emotion, usize)>,
    /// At most ten names, most frequent first; ties keep first-seen order.
    pub top_locations: Vec<(String, usize)>,
    /// Ascending by date.
    pub dates: Vec<(String, usize)>,
}

pub fn summarize(records: &[EmotionRecord]) -> EmotionSummary {
    let mut emotions: IndexMap<Emotion, usize> = IndexMap::new();
    let mut locations: IndexMap<&str, usize> = IndexMap::new();
    let mut dates: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        *emotions.entry(record.emotion).or_default() += 1;
        *locations.entry(record.location_name.as_str()).or_default() += 1;
        *dates.entry(record.date_key()).or_default() += 1;
    }

    let mut emotions: Vec<(Emotion, usize)> = emotions.into_iter().collect();
    emotions.sort_by(|a, b| b.1.cmp(&a.1));

    let mut top_locations: Vec<(String, usize)> = locations
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    top_locations.sort_by(|a, b| b.1.cmp(&a.1));
    top_locations.truncate(TOP_LOCATIONS);

    EmotionSummary {
        total: records.len(),
        emotions,
        top_locations,
        dates: dates.into_iter().collect(),
    }
}

/// Human-readable console report.
impl fmt::Display for EmotionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Collected {} posts with locations and emotions", self.total)?;
        writeln!(f, "\nEmotions:")?;
        for (emotion, count) in &self.emotions {
            writeln!(f, "  {emotion}: {count}")?;
        }
        writeln!(f, "\nTop Locations:")?;
        for (location, count) in &self.top_locations {
            writeln!(f, "  {location}: {count}")?;
        }
        writeln!(f, "\nDates covered:")?;
        for (date, count) in &self.dates {
            writeln!(f, "  {date}: {count} posts")?;
        }
        Ok(())
    }
}
