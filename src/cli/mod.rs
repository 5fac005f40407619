//! CLI layer - argument handling and terminal output

mod context;
pub mod style;
mod sync;

pub use sync::{SyncCommandOptions, run_sync};
