//! # CLI Layer
//!
//! Parses the global options, sets up logging and hands the rest of the
//! command line to the [`registry::Registry`]. Output and exit codes are
//! decided here and in the handlers; the library never prints.

mod handlers;
mod registry;
mod render;
mod setup;

use clap::Parser;
use grafctl::client::Client;
use grafctl::error::Result;
use registry::Registry;
use setup::Cli;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let registry = Registry::builtin();

    if cli.help {
        print!("{}", render::general_help(&registry));
        return Ok(ExitCode::SUCCESS);
    }
    let Some((name, rest)) = cli.args.split_first() else {
        print!("{}", render::general_help(&registry));
        return Ok(ExitCode::FAILURE);
    };

    let options = cli.global_options().from_env();
    init_logging(options.verbose);

    registry.dispatch(&options, name, rest, |o| {
        Client::new(&o.key, &o.headers, &o.url)
    })?;
    Ok(ExitCode::SUCCESS)
}

/// Logs go to stderr so list output stays pipeable.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("grafctl={}", level)))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
