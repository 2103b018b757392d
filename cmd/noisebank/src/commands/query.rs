//! Retrieves the closest exemplars to a query clip.

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use super::build_kb;
use crate::Cli;

/// Builds a knowledge base, encodes the query clip, and prints the top-k
/// exemplars ranked by cosine similarity.
#[derive(Args)]
pub struct QueryCommand {
    /// Exemplar list JSON file
    #[arg(short, long)]
    exemplars: PathBuf,

    /// Query WAV clip
    #[arg(short, long)]
    query: PathBuf,

    /// Number of exemplars to retrieve
    #[arg(short = 'k', long, default_value_t = 4)]
    topk: usize,

    /// Maximum clips encoded at once during the build
    #[arg(long, default_value_t = 4)]
    concurrency: usize,
}

impl QueryCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let kb = build_kb(&self.exemplars, self.concurrency).await?;
        debug!("catalog ready: {} exemplars, dim {}", kb.len(), kb.dimension());

        let hits = kb.retrieve_path(&self.query, self.topk).await?;

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&hits)?);
        } else if hits.is_empty() {
            println!("no exemplars in catalog");
        } else {
            for (rank, hit) in hits.iter().enumerate() {
                println!(
                    "{:>2}. {:.4}  {}  ({})",
                    rank + 1,
                    hit.similarity,
                    hit.caption,
                    hit.source_path
                );
            }
        }
        Ok(())
    }
}
