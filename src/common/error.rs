//! Error types for packcheck
//!
//! Only conditions that end a run live here. Problems found inside a pack
//! are collected as `ValidationError`s and reported together instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for packcheck
#[derive(Error, Debug)]
pub enum Error {
    // === Pack Discovery Errors ===
    #[error("Pack directory '{0}' does not exist")]
    PackRootMissing(PathBuf),

    #[error("No pack manifests found under {root} (expected <pack>/{manifest})")]
    NoManifests { root: PathBuf, manifest: String },

    #[error("{errors} validation error(s) across {manifests} pack(s)")]
    ValidationFailed { errors: usize, manifests: usize },

    // === Contract Errors ===
    #[error("POST {url} failed: {error}")]
    Http { url: String, error: String },

    #[error("{method} {url} failed with {status}: {body}")]
    HttpStatus {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {url}: {error}")]
    InvalidResponse { url: String, error: String },

    #[error("Contract assertion failed: {0}")]
    ContractAssertion(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an HTTP status error for a rejected request
    pub fn http_status(method: &str, url: &str, status: u16, body: &str) -> Self {
        Self::HttpStatus {
            method: method.to_string(),
            url: url.to_string(),
            status,
            body: body.to_string(),
        }
    }

    /// Create a transport error for a request that never got a response
    pub fn http(url: &str, error: impl std::fmt::Display) -> Self {
        Self::Http {
            url: url.to_string(),
            error: error.to_string(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(url: &str, error: impl std::fmt::Display) -> Self {
        Self::InvalidResponse {
            url: url.to_string(),
            error: error.to_string(),
        }
    }
}
