//! Shared helpers

pub mod latex;
pub mod testing;
