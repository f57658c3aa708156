//! Shared helpers for the bundling steps.

pub mod fs;
pub mod process;
