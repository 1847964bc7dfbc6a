//! Error types shared by the HTTP adapters and configuration loading.

use thiserror::Error;

/// Startup configuration problems. These abort the run before any request.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing credential: set {0} in the environment or .env")]
    MissingCredential(&'static str),
}

/// Failures talking to an upstream API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{service} returned HTTP {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("{service} rejected the request: {status} {message}")]
    Rejected {
        service: &'static str,
        status: String,
        message: String,
    },

    #[error("malformed {service} payload: {reason}")]
    Malformed {
        service: &'static str,
        reason: String,
    },
}
