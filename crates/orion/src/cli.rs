use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "orion")]
#[command(version)]
#[command(about = "BM25 search over a pre-built inverted index")]
pub struct Cli {
    /// Path to the SQLite index
    #[arg(long, global = true, env = "ORION_DB", default_value = "orion.db")]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank documents for a query
    Search {
        query: String,

        /// Number of results to return
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// BM25 term frequency saturation
        #[arg(long)]
        k1: Option<f64>,

        /// BM25 length normalization
        #[arg(long)]
        b: Option<f64>,

        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show corpus statistics
    Stats,

    /// Seed the index from pre-built postings (JSONL)
    Load {
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the normalized tokens of a query
    Normalize { query: String },

    /// Print version information
    Version,
}
