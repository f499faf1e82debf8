//! Release tags and the document sync that follows a release
//!
//! # Sync order
//!
//! 1. Normalize the tag (`1.2.3` -> `v1.2.3`)
//! 2. Ensure the changelog has a section for it
//! 3. Summarize that section
//! 4. Rewrite README references and summaries
//! 5. Find the previous release and rewrite the UI fragment

pub mod sync;
pub mod tag;
pub mod version;
