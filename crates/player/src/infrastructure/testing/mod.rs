//! Test fixtures shared by unit tests across the crate.

#[cfg(any(test, feature = "testing"))]
pub mod fixtures;
