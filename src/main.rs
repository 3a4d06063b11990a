//! packcheck - pack fixture validator and WebChat contract probe
//!
//! `packcheck validate` checks pack manifests and their scenario and golden
//! files; `packcheck contract` probes the messaging backend (or its stub).

use clap::Parser;
use packcheck::commands::Commands;
use packcheck::common::config::Config;
use packcheck::common::logging;
use packcheck::cli;

#[derive(Parser)]
#[command(name = "packcheck", about = "Pack fixture validator and WebChat contract probe")]
#[command(version, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.verbose);

    let result = match Config::load() {
        Ok(config) => cli::dispatch(cli.command, &config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
