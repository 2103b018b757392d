//! Builds a knowledge base and reports its shape.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;

use super::build_kb;
use crate::Cli;

/// Encodes an exemplar list into a knowledge base and prints a summary.
///
/// The catalog lives only for the run; this command exists to validate
/// an exemplar list and to time the encode stage.
#[derive(Args)]
pub struct BuildCommand {
    /// Exemplar list JSON file
    #[arg(short, long)]
    exemplars: PathBuf,

    /// Maximum clips encoded at once
    #[arg(long, default_value_t = 4)]
    concurrency: usize,
}

impl BuildCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let started = Instant::now();
        let kb = build_kb(&self.exemplars, self.concurrency).await?;
        let elapsed = started.elapsed();

        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "exemplars": kb.len(),
                    "dimension": kb.dimension(),
                    "elapsed_ms": elapsed.as_millis() as u64,
                })
            );
        } else {
            println!(
                "built knowledge base: {} exemplars, dimension {}, took {:?}",
                kb.len(),
                kb.dimension(),
                elapsed
            );
        }
        Ok(())
    }
}
