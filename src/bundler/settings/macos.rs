//! macOS platform-specific settings.

use std::path::PathBuf;

/// Signing identity used when nothing else is configured.
pub const DEFAULT_SIGNING_IDENTITY: &str = "Apple Development: Jason Bond (XF7K2AK9HM)";

/// Target triple the release binary is compiled for.
pub const DEFAULT_TARGET: &str = "aarch64-apple-darwin";

/// macOS application bundle (.app) configuration.
///
/// # Configuration
///
/// Add to `Cargo.toml`:
///
/// ```toml
/// [package.metadata.karang_bundler.macos]
/// signing_identity = "Developer ID Application: Your Name (TEAMID)"
/// target = "aarch64-apple-darwin"
/// entitlements = "meta/entitlements.plist"
/// ```
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct MacOsSettings {
    /// Code signing identity name passed to `codesign --sign`.
    ///
    /// Use "-" for ad-hoc signing (development only).
    pub signing_identity: String,

    /// Rust target triple for `cargo build --target`.
    pub target: String,

    /// Property list copied verbatim to `Contents/Info.plist`.
    pub info_plist: PathBuf,

    /// Entitlements attached to the bundle-level signature.
    pub entitlements: PathBuf,
}

impl Default for MacOsSettings {
    fn default() -> Self {
        Self {
            signing_identity: DEFAULT_SIGNING_IDENTITY.to_string(),
            target: DEFAULT_TARGET.to_string(),
            info_plist: PathBuf::from("meta/Info.plist"),
            entitlements: PathBuf::from("meta/entitlements.plist"),
        }
    }
}

/// macOS DMG disk image configuration.
///
/// Describes where the installer is written and how the Finder window of the
/// mounted volume is laid out by `create-dmg`.
///
/// ```toml
/// [package.metadata.karang_bundler.dmg]
/// background = "meta/installer_bg.png"
/// window_size = [800, 400]
/// app_position = [200, 200]
/// app_drop_link = [600, 200]
/// ```
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct DmgSettings {
    /// Output path of the disk image.
    pub path: PathBuf,

    /// Volume name shown when the image is mounted.
    pub volume_name: String,

    /// Background image for the installer window.
    pub background: PathBuf,

    /// Installer window size (width, height) in points.
    pub window_size: (u32, u32),

    /// Icon size in the installer window.
    pub icon_size: u32,

    /// Position of the `.app` icon.
    pub app_position: (u32, u32),

    /// Position of the `/Applications` drop link.
    pub app_drop_link: (u32, u32),
}

impl Default for DmgSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("build/karang_lestari_mac.dmg"),
            volume_name: "Karang Lestari Installer".to_string(),
            background: PathBuf::from("meta/installer_bg.png"),
            window_size: (800, 400),
            icon_size: 128,
            app_position: (200, 200),
            app_drop_link: (600, 200),
        }
    }
}
