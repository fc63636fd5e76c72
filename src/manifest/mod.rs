//! Entry manifests: which emitted files belong to which build entry.

mod collector;
mod stats;

pub use collector::{BuildPipeline, collect_entry_files};
pub use stats::{EntrypointRecord, StatsSnapshot};
