//! Integration tests for the reldocs binary

mod test_check;
mod test_prepare;
