//! Bundle configuration as read from `Cargo.toml`.

use super::{DmgSettings, MacOsSettings};
use std::path::PathBuf;

/// Bundle configuration.
///
/// Every path is relative to the project directory unless absolute.
///
/// # Configuration
///
/// Add to `Cargo.toml`:
///
/// ```toml
/// [package.metadata.karang_bundler]
/// app_name = "Karang Lestari"
/// source_icon = "assets/icons/icon_1024x1024.png"
/// output_dir = "build/mac"
/// ```
///
/// # See Also
///
/// - [`MacOsSettings`] - signing and compile target
/// - [`DmgSettings`] - installer layout
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct BundleSettings {
    /// Overrides the application name.
    pub app_name: Option<String>,

    /// Overrides the binary name discovered from `[[bin]]` / `package.name`.
    pub crate_name: Option<String>,

    /// 1024x1024 source image for every icon variant.
    pub source_icon: PathBuf,

    /// Asset tree copied to `Contents/MacOS/assets`.
    pub assets_dir: PathBuf,

    /// Directory the `.app` bundle is created in.
    pub output_dir: PathBuf,

    /// Temporary iconset directory.
    pub iconset_dir: PathBuf,

    /// Temporary compiled icon resource.
    pub icns: PathBuf,

    /// Remove an existing bundle before assembling instead of overwriting into it.
    pub clean: bool,

    /// macOS signing settings.
    pub macos: MacOsSettings,

    /// Installer settings.
    pub dmg: DmgSettings,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            app_name: None,
            crate_name: None,
            source_icon: PathBuf::from("assets/icons/icon_1024x1024.png"),
            assets_dir: PathBuf::from("assets"),
            output_dir: PathBuf::from("build/mac"),
            iconset_dir: PathBuf::from("AppIcon.iconset"),
            icns: PathBuf::from("AppIcon.icns"),
            clean: false,
            macos: MacOsSettings::default(),
            dmg: DmgSettings::default(),
        }
    }
}
