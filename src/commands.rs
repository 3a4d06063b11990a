//! CLI command definitions
//!
//! Defines the clap commands for packcheck.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Validate every pack manifest under a directory
    Validate {
        /// Directory holding one subdirectory per pack (default: packs)
        root: Option<PathBuf>,

        /// Also run the external pack tools (same as GREENTIC_PACK_VALIDATE=1)
        #[arg(long)]
        external: bool,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the WebChat contract suite
    Contract {
        /// Backend base URL (default: $WEBCHAT_BASE_URL, else the offline stub)
        #[arg(long)]
        base_url: Option<String>,

        /// Force the offline stub even if a base URL is configured
        #[arg(long, conflicts_with = "base_url")]
        offline: bool,

        /// User identifier sent with the token request
        #[arg(long)]
        user: Option<String>,

        /// Tenant identifier sent with the conversation request
        #[arg(long)]
        tenant: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}
