//! noisebank - build and query noise exemplar knowledge bases.

use clap::{Parser, Subcommand};

mod commands;

use commands::{BuildCommand, QueryCommand, SynthCommand};

/// Noise exemplar knowledge base CLI.
///
/// Encodes short noise clips into embeddings, keeps them in an in-memory
/// catalog, and ranks them against a query clip by cosine similarity:
///   - synth: generate the standard synthetic noise archetype clips
///   - build: encode an exemplar list and report the catalog shape
///   - query: retrieve the closest exemplars to a query clip
#[derive(Parser)]
#[command(name = "noisebank")]
#[command(about = "Noise exemplar knowledge base CLI")]
#[command(version)]
pub struct Cli {
    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate synthetic noise archetype clips and an exemplar list
    Synth(SynthCommand),
    /// Build a knowledge base from an exemplar list
    Build(BuildCommand),
    /// Retrieve the closest exemplars to a query clip
    Query(QueryCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .init();
    }

    match &cli.command {
        Commands::Synth(cmd) => cmd.run(&cli).await,
        Commands::Build(cmd) => cmd.run(&cli).await,
        Commands::Query(cmd) => cmd.run(&cli).await,
    }
}
