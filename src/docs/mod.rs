//! Document rewriters
//!
//! - **changelog**: release sections in CHANGELOG.md
//! - **summary**: bullet extraction from a changelog section
//! - **readme**: release references and summary blocks in README.md
//! - **fragment**: the "What's New" page in the app's Swift source

pub mod changelog;
pub mod fragment;
pub mod readme;
pub mod summary;
