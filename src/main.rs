use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod filtering;
mod parsing;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag; stdout carries the pair
    // stream, so diagnostics go to stderr
    let filter = if cli.verbose {
        EnvFilter::new("pairsieve=debug,info")
    } else {
        EnvFilter::new("pairsieve=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        cli::Commands::Filter(args) => {
            cli::filter::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Thresholds(args) => {
            cli::thresholds::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
