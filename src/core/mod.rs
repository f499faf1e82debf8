//! Core building blocks shared by every command
//!
//! - **config**: reldocs.toml parsing and validation
//! - **context**: project root, config and document I/O
//! - **error**: error types with contextual help messages and exit codes

pub mod config;
pub mod context;
pub mod error;
