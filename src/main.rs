use std::fs::File;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use domain_aligner::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on the requested level
    let level = cli.effective_log_level();
    let filter = EnvFilter::new(format!("domain_aligner={}", level.as_directive()));

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Cannot create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        cli::Commands::Align(args) => {
            cli::align::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Pair(args) => {
            cli::pair::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
