//! inventory-lint CLI entry point

use clap::Parser;
use inventory_lint::cli::{Cli, Command};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose when set
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("inventory_lint=debug")
    } else {
        EnvFilter::new("inventory_lint=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match cli.command {
        Command::Check {
            paths,
            format,
            lint,
        } => inventory_lint::cli::check::run_check(&paths, format, cli.color, &lint),
        Command::List { format, lint } => inventory_lint::cli::list::run_list(format, &lint),
    };

    process::exit(exit_code);
}
