//! CLI commands module.

mod build;
mod query;
mod synth;
mod util;

pub use build::BuildCommand;
pub use query::QueryCommand;
pub use synth::SynthCommand;

// Re-export utils for use in commands
pub(crate) use util::*;
