//! macOS packaging for Karang Lestari
//!
//! This library compiles the Karang Lestari binary for Apple silicon, wraps
//! it in a signed `.app` bundle and produces a `.dmg` installer.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};
