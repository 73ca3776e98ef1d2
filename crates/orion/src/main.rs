mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use orion_core::Normalizer;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries JSON results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    Normalizer::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            query,
            top_k,
            k1,
            b,
            config,
        } => {
            let overrides = commands::search::Overrides { top_k, k1, b };
            commands::search::run(&cli.db, &query, config.as_deref(), overrides)
        }
        Commands::Stats => commands::stats::run(&cli.db),
        Commands::Load { file } => commands::load::run(&cli.db, &file),
        Commands::Normalize { query } => commands::normalize::run(&query),
        Commands::Version => commands::version::run(),
    }
}
