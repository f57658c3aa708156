//! macOS application bundler for Karang Lestari.
//!
//! This module turns the compiled Rust binary into a signed `.app` bundle and
//! wraps it in a drag-to-install `.dmg` disk image.
//!
//! # Configuration
//!
//! Bundling is configured via `[package.metadata.karang_bundler]` in `Cargo.toml`:
//!
//! ```toml
//! [package.metadata.karang_bundler]
//! app_name = "Karang Lestari"
//! source_icon = "assets/icons/icon_1024x1024.png"
//!
//! [package.metadata.karang_bundler.macos]
//! signing_identity = "Developer ID Application: Example (TEAMID)"
//!
//! [package.metadata.karang_bundler.dmg]
//! volume_name = "Karang Lestari Installer"
//! ```
//!
//! # Pipeline
//!
//! | Step | Tool |
//! |------|------|
//! | compile | `cargo` |
//! | assemble-bundle | - |
//! | generate-iconset | `sips` |
//! | compile-icon | `iconutil` |
//! | install-metadata | - |
//! | sign-executables | `codesign` |
//! | sign-bundle | `codesign` |
//! | build-installer | `create-dmg` |
//! | cleanup | - |
//!
//! # Integration
//!
//! ```no_run
//! use karang_bundler::bundler::{Bundler, SettingsBuilder};
//!
//! # async fn example() -> karang_bundler::bundler::Result<()> {
//! let settings = SettingsBuilder::new().project_dir(".").build()?;
//! let artifact = Bundler::new(settings).bundle().await?;
//! println!("{}", artifact.checksum);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod builder;
pub mod error;
pub(crate) mod platform;
mod settings;
mod utils;

// Public re-exports
pub use builder::tool_detection::{REQUIRED_TOOLS, missing_tools};
pub use builder::{BuildStep, Bundler, PathKind, Precondition};
pub use error::{Error, Result};
pub use settings::{
    BUNDLED_ICON_NAME, BundleSettings, DEFAULT_APP_NAME, DEFAULT_CRATE_NAME,
    DEFAULT_SIGNING_IDENTITY, DEFAULT_TARGET, DmgSettings, MacOsSettings, PackageSettings,
    Settings, SettingsBuilder,
};
pub use utils::process::{ProcessRunner, ToolCommand, ToolRunner};

use std::path::PathBuf;

/// The result of a successful packaging run.
///
/// # Examples
///
/// ```no_run
/// use karang_bundler::bundler::{Bundler, SettingsBuilder};
///
/// # async fn example() -> karang_bundler::bundler::Result<()> {
/// # let settings = SettingsBuilder::new().build()?;
/// let artifact = Bundler::new(settings).bundle().await?;
///
/// println!("Created {}: {} bytes", artifact.dmg.display(), artifact.size);
/// println!("SHA256: {}", artifact.checksum);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BundledArtifact {
    /// The signed `.app` bundle.
    pub app_bundle: PathBuf,

    /// The disk image wrapping the bundle.
    pub dmg: PathBuf,

    /// Size of the disk image in bytes.
    pub size: u64,

    /// SHA-256 checksum of the disk image.
    pub checksum: String,

    /// Number of files signed individually before the bundle signature.
    pub signed_executables: usize,
}
