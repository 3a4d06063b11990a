//! Schema checks for a pack manifest and the files it references

use serde_json::{Map, Value};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use super::report::{Issue, ValidationError};
use crate::common::paths::resolve_within;

/// Top-level keys every manifest must carry (sorted)
pub const REQUIRED_MANIFEST_FIELDS: [&str; 6] =
    ["description", "id", "name", "scenarios", "type", "version"];

/// Keys every scenario entry must carry (sorted)
pub const REQUIRED_SCENARIO_FIELDS: [&str; 3] = ["entry", "golden", "id"];

/// A file referenced from a scenario entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Referenced {
    Scenario,
    Golden,
}

impl Referenced {
    /// Manifest key holding the relative path
    fn manifest_key(self) -> &'static str {
        match self {
            Referenced::Scenario => "entry",
            Referenced::Golden => "golden",
        }
    }

    /// Key that must echo the owning scenario id
    fn id_field(self) -> &'static str {
        match self {
            Referenced::Scenario => "scenario",
            Referenced::Golden => "scenario_id",
        }
    }

    /// Key that must hold a non-empty array
    fn list_field(self) -> &'static str {
        match self {
            Referenced::Scenario => "steps",
            Referenced::Golden => "transcript",
        }
    }
}

/// Validate one manifest and everything it references.
///
/// Never stops at the first problem: each independent check contributes its
/// own error. Only an unreadable manifest short-circuits, since nothing else
/// can be checked without its fields.
pub fn validate_manifest(manifest_path: &Path, readme: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let manifest = match load_object(manifest_path) {
        Ok(manifest) => manifest,
        Err(issue) => return vec![ValidationError::new(manifest_path, issue)],
    };

    let missing = missing_fields(&manifest, &REQUIRED_MANIFEST_FIELDS);
    if !missing.is_empty() {
        errors.push(ValidationError::new(manifest_path, Issue::MissingFields(missing)));
    }

    let pack_dir = manifest_path.parent().unwrap_or(Path::new("."));

    match manifest.get("scenarios").and_then(Value::as_array) {
        Some(scenarios) if !scenarios.is_empty() => {
            validate_scenarios(manifest_path, pack_dir, scenarios, &mut errors);
        }
        _ => errors.push(ValidationError::new(manifest_path, Issue::ScenariosNotList)),
    }

    if !pack_dir.join(readme).is_file() {
        errors.push(ValidationError::new(pack_dir, Issue::MissingReadme(readme.to_string())));
    }

    errors
}

fn validate_scenarios(
    manifest_path: &Path,
    pack_dir: &Path,
    scenarios: &[Value],
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();

    for (index, scenario) in scenarios.iter().enumerate() {
        let Some(scenario) = scenario.as_object() else {
            errors.push(ValidationError::new(manifest_path, Issue::ScenarioNotObject { index }));
            continue;
        };

        let missing = missing_fields(scenario, &REQUIRED_SCENARIO_FIELDS);
        if !missing.is_empty() {
            errors.push(ValidationError::new(
                manifest_path,
                Issue::ScenarioMissingFields {
                    scenario: scenario.get("id").and_then(Value::as_str).map(String::from),
                    fields: missing,
                },
            ));
            continue;
        }

        let non_strings: Vec<String> = REQUIRED_SCENARIO_FIELDS
            .iter()
            .filter(|field| !scenario[**field].is_string())
            .map(|field| field.to_string())
            .collect();
        if !non_strings.is_empty() {
            errors.push(ValidationError::new(
                manifest_path,
                Issue::NonStringFields {
                    index,
                    fields: non_strings,
                },
            ));
            continue;
        }

        let id = scenario["id"].as_str().unwrap_or_default();
        if !seen.insert(id.to_string()) {
            errors.push(ValidationError::new(
                manifest_path,
                Issue::DuplicateScenario(id.to_string()),
            ));
        }

        for kind in [Referenced::Scenario, Referenced::Golden] {
            let relative = scenario[kind.manifest_key()].as_str().unwrap_or_default();
            match resolve_within(pack_dir, relative) {
                Ok(path) => errors.extend(validate_referenced(kind, id, &path)),
                Err(reason) => errors.push(ValidationError::new(
                    manifest_path,
                    Issue::UnsafePath {
                        scenario: id.to_string(),
                        field: kind.manifest_key().to_string(),
                        reason,
                    },
                )),
            }
        }
    }
}

/// Validate a scenario file against the id of the entry that references it
pub fn validate_scenario_file(expected_id: &str, path: &Path) -> Vec<ValidationError> {
    validate_referenced(Referenced::Scenario, expected_id, path)
}

/// Validate a golden transcript against the id of the entry that references it
pub fn validate_golden_file(expected_id: &str, path: &Path) -> Vec<ValidationError> {
    validate_referenced(Referenced::Golden, expected_id, path)
}

fn validate_referenced(kind: Referenced, expected_id: &str, path: &Path) -> Vec<ValidationError> {
    let data = match load_json(path) {
        Ok(data) => data,
        Err(issue) => return vec![ValidationError::new(path, issue)],
    };

    let mut errors = Vec::new();

    let found = data.get(kind.id_field());
    if found.and_then(Value::as_str) != Some(expected_id) {
        errors.push(ValidationError::new(
            path,
            Issue::IdMismatch {
                field: kind.id_field().to_string(),
                expected: expected_id.to_string(),
                found: found.map(Value::to_string).unwrap_or_else(|| "nothing".to_string()),
            },
        ));
    }

    let list_ok = data
        .get(kind.list_field())
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty());
    if !list_ok {
        errors.push(ValidationError::new(
            path,
            Issue::EmptyList {
                field: kind.list_field().to_string(),
            },
        ));
    }

    errors
}

fn load_json(path: &Path) -> Result<Value, Issue> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Issue::MissingFile,
        _ => Issue::Unreadable(e.to_string()),
    })?;
    serde_json::from_str(&content).map_err(|e| Issue::InvalidJson(e.to_string()))
}

fn load_object(path: &Path) -> Result<Map<String, Value>, Issue> {
    match load_json(path)? {
        Value::Object(map) => Ok(map),
        _ => Err(Issue::NotAnObject),
    }
}

fn missing_fields(object: &Map<String, Value>, required: &[&str]) -> Vec<String> {
    let mut missing: Vec<String> = required
        .iter()
        .filter(|field| !object.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    missing.sort();
    missing
}
