//! Terminal output helpers

pub mod diff;
