//! CLI commands for reldocs
//!
//! - **prepare**: sync CHANGELOG, README and the in-app fragment for a release tag,
//!   or verify them with `--check`
//!
//! Commands accept `&DocsContext` built once in main.rs.

pub mod prepare;

pub use prepare::{PrepareArgs, run_prepare};
