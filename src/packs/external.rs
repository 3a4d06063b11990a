//! Optional cross-checks with the external pack tooling
//!
//! These tools are advisory: a missing binary or a failing run becomes a
//! warning and never changes the outcome of the schema checks.

use std::path::Path;
use std::process::{Command, Stdio};

use super::report::ValidationWarning;
use crate::common::config::ExternalTool;

/// Lines of tool stderr carried into a failure warning
const STDERR_TAIL_LINES: usize = 3;

/// Run every configured tool against one manifest
pub fn run_external_checks(manifest: &Path, tools: &[ExternalTool]) -> Vec<ValidationWarning> {
    let manifest_arg = manifest.display().to_string();
    let mut warnings = Vec::new();

    for tool in tools {
        let args: Vec<String> = tool
            .args
            .iter()
            .map(|arg| arg.replace("{manifest}", &manifest_arg))
            .collect();
        let rendered = std::iter::once(tool.program.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");

        let Ok(program) = which::which(&tool.program) else {
            tracing::debug!(program = %tool.program, "external tool not on PATH");
            warnings.push(ValidationWarning::new(
                manifest,
                format!("Skipping {} (binary not found on PATH)", rendered),
            ));
            continue;
        };

        tracing::debug!(command = %rendered, "running external check");

        let output = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(output) if output.status.success() => {
                tracing::debug!(command = %rendered, "external check passed");
            }
            Ok(output) => {
                let code = output
                    .status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string());
                let stderr = String::from_utf8_lossy(&output.stderr);
                tracing::debug!(command = %rendered, %stderr, "external check failed");

                let mut message = format!("Command {} failed with exit {}", rendered, code);
                let tail = stderr_tail(&stderr);
                if !tail.is_empty() {
                    message.push_str(": ");
                    message.push_str(&tail);
                }
                warnings.push(ValidationWarning::new(manifest, message));
            }
            Err(e) => {
                warnings.push(ValidationWarning::new(
                    manifest,
                    format!("Command {} could not be started: {}", rendered, e),
                ));
            }
        }
    }

    warnings
}

/// Last few non-blank lines of a tool's stderr, joined onto one line
fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join(" | ")
}
