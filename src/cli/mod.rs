//! CLI command handling
//!
//! Resolves flags against the config file and environment, runs the
//! requested check, and formats its output.

use colored::Colorize;
use std::time::Duration;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::contract::{self, SuiteOptions};
use crate::packs::{self, ValidateOptions, ValidationReport};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Validate {
            root,
            external,
            json,
        } => {
            let external = external || Config::external_enabled_by_env();
            let opts = ValidateOptions {
                root: root.unwrap_or_else(|| config.packs.root.clone()),
                manifest: config.packs.manifest.clone(),
                readme: config.packs.readme.clone(),
                external: external.then(|| config.external.tools.clone()),
            };

            let report = packs::validate_packs(&opts)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }

            if report.is_success() {
                Ok(())
            } else {
                Err(Error::ValidationFailed {
                    errors: report.errors.len(),
                    manifests: report.manifests.len(),
                })
            }
        }

        Commands::Contract {
            base_url,
            offline,
            user,
            tenant,
            timeout,
        } => {
            let base_url = if offline {
                None
            } else {
                config.base_url(base_url)
            };
            let timeout = Duration::from_secs(timeout.unwrap_or(config.contract.timeout_secs));
            let client = contract::select_client(base_url.as_deref(), timeout)?;

            let mut opts = SuiteOptions::from(&config.contract);
            if let Some(user) = user {
                opts.user = user;
            }
            if let Some(tenant) = tenant {
                opts.tenant = tenant;
            }

            contract::run_suite(&*client, &opts).await?;
            Ok(())
        }
    }
}

/// Print warnings first, then errors or the success summary
fn print_report(report: &ValidationReport) {
    for warning in &report.warnings {
        println!("{} {}", "[warn]".yellow(), warning);
    }

    if report.is_success() {
        println!(
            "{}",
            format!("Validated {} pack(s) successfully.", report.manifests.len()).green()
        );
    } else {
        for error in &report.errors {
            eprintln!("{} {}", "[error]".red(), error);
        }
    }
}
