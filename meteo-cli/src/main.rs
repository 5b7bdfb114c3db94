//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing and validating CLI arguments
//! - Merging flags with the optional config file
//! - Printing the rendered report and mapping failures to exit status

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Any argument error exits 1; --help and --version exit 0.
    let cmd = match cli::Cli::try_parse() {
        Ok(cmd) => cmd,
        Err(err) => {
            let _ = err.print();
            process::exit(cli::exit_code(&err));
        }
    };

    init_tracing(cmd.verbose);

    tokio::select! {
        res = cmd.run() => res,
        // A failed signal registration disables this arm instead of aborting the lookup.
        Ok(()) = tokio::signal::ctrl_c() => Err(anyhow::anyhow!("interrupted")),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
