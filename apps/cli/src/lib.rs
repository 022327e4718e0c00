//! # shopcart CLI Library
//!
//! Replays a JSON action script through one [`CartStore`] and prints the
//! resulting cart. Useful for reproducing UI cart sessions outside the
//! browser.
//!
//! ## Module Organization
//! ```text
//! shopcart_cli/
//! ├── lib.rs          ◄─── You are here (args, logging, run)
//! ├── commands.rs     ◄─── Script loading, replay, output shape
//! ├── config.rs       ◄─── Environment configuration
//! └── error.rs        ◄─── CLI error type and codes
//! ```
//!
//! ## Run Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging (stderr, RUST_LOG)                               │
//! │  2. Load CliConfig from SHOPCART_* variables                            │
//! │  3. Read script (file or stdin)                                         │
//! │  4. Build CartStore, register a logging listener                        │
//! │  5. Replay actions                                                      │
//! │  6. Print CartResponse JSON to stdout                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::{load_script, replay, CartResponse};
use config::CliConfig;
use error::CliError;
use shopcart_store::CartStore;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "shopcart")]
#[command(author, version, about = "Replay cart action scripts")]
pub struct Args {
    /// JSON file with an array of cart actions (`-` or omitted: stdin)
    pub script: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Abort on the first rejected action instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

/// Runs one replay with configuration taken from the environment.
pub fn run(args: &Args) -> Result<(), CliError> {
    let mut config = CliConfig::from_env();
    config.pretty |= args.pretty;

    let script = read_script(args.script.as_deref())?;
    let output = execute(&script, args.strict, &config)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output).map_err(CliError::Write)?;
    Ok(())
}

/// Replays `script` and returns the rendered cart JSON.
pub fn execute(script: &str, strict: bool, config: &CliConfig) -> Result<String, CliError> {
    let actions = load_script(script)?;

    let store = CartStore::new();
    store.subscribe(|change| {
        info!(
            revision = change.revision,
            action = %change.kind,
            item_id = change.item_id.as_deref().unwrap_or("-"),
            items = change.totals.item_count,
            total = %change.totals.total,
            "cart changed"
        );
    });

    let report = replay(&store, actions, strict)?;
    info!(
        applied = report.applied,
        rejected = report.rejected.len(),
        "replay finished"
    );

    CartResponse::build(&store, report, config).to_json(config.pretty)
}

fn read_script(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| CliError::Read {
                source_name: path.display().to_string(),
                source,
            })
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| CliError::Read {
                    source_name: "stdin".to_string(),
                    source,
                })?;
            Ok(buf)
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopcart_store=trace` - Show listener fan-out
/// - Default: INFO, DEBUG for the shopcart crates
///
/// Logs go to stderr so stdout stays valid JSON.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopcart=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
