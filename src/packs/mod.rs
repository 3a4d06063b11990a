//! Pack fixture validation
//!
//! Walks `<root>/*/pack.json`, checks every manifest against the fixed
//! schema, follows its scenario and golden references, and collects all
//! problems into one report instead of stopping at the first.

mod external;
mod manifest;
mod report;

pub use external::run_external_checks;
pub use manifest::{
    validate_golden_file, validate_manifest, validate_scenario_file, REQUIRED_MANIFEST_FIELDS,
    REQUIRED_SCENARIO_FIELDS,
};
pub use report::{Issue, ValidationError, ValidationReport, ValidationWarning};

use std::path::{Path, PathBuf};

use crate::common::config::{ExternalTool, PacksConfig};
use crate::common::{Error, Result};

/// Options for a validation run
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Directory holding one subdirectory per pack
    pub root: PathBuf,
    /// Manifest file name inside each pack directory
    pub manifest: String,
    /// File required beside each manifest
    pub readme: String,
    /// External tools to run per manifest; `None` skips the cross-checks
    pub external: Option<Vec<ExternalTool>>,
}

impl ValidateOptions {
    /// Options for `root` with the default pack layout and no external tools
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let layout = PacksConfig::default();
        Self {
            root: root.into(),
            manifest: layout.manifest,
            readme: layout.readme,
            external: None,
        }
    }
}

/// Find one manifest per immediate subdirectory of `root`, sorted by path.
///
/// A missing root or a root with no manifests is fatal: there is nothing to
/// report on.
pub fn discover_manifests(root: &Path, manifest: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::PackRootMissing(root.to_path_buf()));
    }

    let mut manifests = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            let candidate = path.join(manifest);
            if candidate.is_file() {
                manifests.push(candidate);
            }
        }
    }
    manifests.sort();

    if manifests.is_empty() {
        return Err(Error::NoManifests {
            root: root.to_path_buf(),
            manifest: manifest.to_string(),
        });
    }
    Ok(manifests)
}

/// Validate every pack under `opts.root`
pub fn validate_packs(opts: &ValidateOptions) -> Result<ValidationReport> {
    let manifests = discover_manifests(&opts.root, &opts.manifest)?;
    let mut report = ValidationReport::default();

    for manifest in &manifests {
        tracing::debug!(manifest = %manifest.display(), "validating pack");
        let errors = validate_manifest(manifest, &opts.readme);
        if !errors.is_empty() {
            tracing::debug!(manifest = %manifest.display(), count = errors.len(), "pack has errors");
        }
        report.errors.extend(errors);

        if let Some(tools) = &opts.external {
            report.warnings.extend(run_external_checks(manifest, tools));
        }
    }

    report.manifests = manifests;
    Ok(report)
}
