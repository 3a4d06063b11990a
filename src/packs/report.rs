//! Validation findings and the per-run report

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What is wrong at a given location
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    #[error("file not found")]
    MissingFile,

    #[error("failed to read: {0}")]
    Unreadable(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("expected a JSON object at the top level")]
    NotAnObject,

    #[error("missing fields {0:?}")]
    MissingFields(Vec<String>),

    #[error("'scenarios' must be a non-empty list")]
    ScenariosNotList,

    #[error("scenario entries must be objects (entry {index})")]
    ScenarioNotObject { index: usize },

    #[error(
        "scenario {} missing fields {:?}",
        .scenario.as_deref().unwrap_or("<unnamed>"),
        .fields
    )]
    ScenarioMissingFields {
        scenario: Option<String>,
        fields: Vec<String>,
    },

    #[error("scenario entry {index}: fields {fields:?} must be strings")]
    NonStringFields { index: usize, fields: Vec<String> },

    #[error("duplicate scenario id '{0}'")]
    DuplicateScenario(String),

    #[error("scenario {scenario}: '{field}' rejected: {reason}")]
    UnsafePath {
        scenario: String,
        field: String,
        reason: String,
    },

    #[error("{field} mismatch (expected {expected}, found {found})")]
    IdMismatch {
        field: String,
        expected: String,
        found: String,
    },

    #[error("{field} must be a non-empty list")]
    EmptyList { field: String },

    #[error("{0} is required for contributor context")]
    MissingReadme(String),
}

/// A problem found in a pack; collected, never raised
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub location: PathBuf,
    #[serde(rename = "message", serialize_with = "serialize_display")]
    pub issue: Issue,
}

impl ValidationError {
    pub fn new(location: &Path, issue: Issue) -> Self {
        Self {
            location: location.to_path_buf(),
            issue,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location.display(), self.issue)
    }
}

/// Advisory finding from an external tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub location: PathBuf,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(location: &Path, message: impl Into<String>) -> Self {
        Self {
            location: location.to_path_buf(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location.display(), self.message)
    }
}

/// Everything one validation run found
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    /// Manifests visited, in the order they were validated
    pub manifests: Vec<PathBuf>,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Warnings never fail a run
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

fn serialize_display<T: fmt::Display, S: Serializer>(value: &T, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(value)
}
