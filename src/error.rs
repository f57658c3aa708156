//! Error types for the command line front end.
//!
//! Pipeline failures surface as [`crate::bundler::Error`] and are wrapped
//! here together with argument and configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Main error type for the `karang_bundler` binary
#[derive(Error, Debug)]
pub enum PackagerError {
    /// CLI argument errors
    #[error("{0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Bundler errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// The project directory does not exist
    #[error("Project directory not found: {}", path.display())]
    ProjectNotFound {
        /// Directory given on the command line
        path: PathBuf,
    },

    /// Required external programs are not on `PATH`
    #[error("Required tools not found in PATH: {}", tools.join(", "))]
    MissingTools {
        /// Names of the missing programs
        tools: Vec<String>,
    },

    /// `Cargo.toml` could not be read
    #[error("Failed to read {}: {reason}", path.display())]
    ManifestUnreadable {
        /// Manifest path
        path: PathBuf,
        /// Underlying reason
        reason: String,
    },
}
