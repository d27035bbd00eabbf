//! CLI entry point for per-pixel statistical image synthesis

use clap::Parser;
use pixelstat::io::cli::{Cli, CorpusProcessor};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> pixelstat::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut processor = CorpusProcessor::new(cli);
    processor.process()
}
