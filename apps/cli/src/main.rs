//! shopcart - replay cart action scripts.
//!
//! # Usage
//!
//! ```bash
//! # Replay a script file
//! shopcart session.json --pretty
//!
//! # Read from stdin, fail on the first bad action
//! cat session.json | shopcart --strict
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use shopcart_cli::{init_tracing, run, Args};

fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = ?err.code(), "{}", err);
            ExitCode::from(err.code().exit_status())
        }
    }
}
