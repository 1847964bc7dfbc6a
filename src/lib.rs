//! Batch collectors for NYC place sentiment and social-post emotion maps.

pub mod cli;
pub mod config;
pub mod emotions;
pub mod error;
pub mod logging;
pub mod pacing;
pub mod places;
