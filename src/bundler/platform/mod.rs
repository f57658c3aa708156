//! Platform-specific bundling implementations.

pub mod macos;
