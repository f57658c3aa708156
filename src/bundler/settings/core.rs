//! Core Settings struct and implementations.

use super::{BundleSettings, DmgSettings, PackageSettings};
use std::path::{Path, PathBuf};

/// File name of the icon inside `Contents/Resources`.
pub const BUNDLED_ICON_NAME: &str = "AppIcon.icns";

/// Main settings for bundler operations.
///
/// Central configuration for the bundler, constructed via [`SettingsBuilder`].
/// Every path the pipeline touches is derived here so the steps never
/// assemble paths on their own.
///
/// # Examples
///
/// ```no_run
/// use karang_bundler::bundler::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> karang_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir(".")
///     .package_settings(PackageSettings::default())
///     .build()?;
///
/// println!("bundle: {}", settings.app_bundle_path().display());
/// # Ok(())
/// # }
/// ```
///
/// [`SettingsBuilder`]: super::SettingsBuilder
#[derive(Clone, Debug)]
pub struct Settings {
    /// Package identity.
    package: PackageSettings,

    /// Bundle configuration.
    bundle_settings: BundleSettings,

    /// Root of the project being packaged.
    project_dir: PathBuf,

    /// Cargo target directory (`CARGO_TARGET_DIR` or `<project>/target`).
    target_dir: PathBuf,
}

impl Settings {
    /// Returns the product name.
    pub fn app_name(&self) -> &str {
        &self.package.app_name
    }

    /// Returns the binary name.
    pub fn crate_name(&self) -> &str {
        &self.package.crate_name
    }

    /// Returns the code signing identity.
    pub fn signing_identity(&self) -> &str {
        &self.bundle_settings.macos.signing_identity
    }

    /// Returns the compile target triple.
    pub fn target(&self) -> &str {
        &self.bundle_settings.macos.target
    }

    /// Returns the project directory all relative paths are resolved against.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Returns the bundle settings.
    pub fn bundle_settings(&self) -> &BundleSettings {
        &self.bundle_settings
    }

    /// Returns the installer settings.
    pub fn dmg_settings(&self) -> &DmgSettings {
        &self.bundle_settings.dmg
    }

    /// Whether an existing bundle is removed before assembly.
    pub fn clean(&self) -> bool {
        self.bundle_settings.clean
    }

    /// Resolves a configured path against the project directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_dir.join(path)
        }
    }

    /// Project `Cargo.toml`.
    pub fn cargo_manifest(&self) -> PathBuf {
        self.project_dir.join("Cargo.toml")
    }

    /// Binary produced by `cargo build --release --target <triple>`.
    pub fn compiled_binary_path(&self) -> PathBuf {
        self.target_dir
            .join(self.target())
            .join("release")
            .join(self.crate_name())
    }

    /// `<AppName>.app`
    pub fn app_bundle_name(&self) -> String {
        format!("{}.app", self.app_name())
    }

    /// Directory holding the `.app` bundle (also the DMG source folder).
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.bundle_settings.output_dir)
    }

    /// Full path to the `.app` bundle.
    pub fn app_bundle_path(&self) -> PathBuf {
        self.output_dir().join(self.app_bundle_name())
    }

    /// `<bundle>/Contents`
    pub fn contents_dir(&self) -> PathBuf {
        self.app_bundle_path().join("Contents")
    }

    /// `<bundle>/Contents/MacOS`
    pub fn macos_dir(&self) -> PathBuf {
        self.contents_dir().join("MacOS")
    }

    /// `<bundle>/Contents/Resources`
    pub fn resources_dir(&self) -> PathBuf {
        self.contents_dir().join("Resources")
    }

    /// Executable inside the bundle.
    pub fn bundled_binary_path(&self) -> PathBuf {
        self.macos_dir().join(self.crate_name())
    }

    /// Asset tree inside the bundle, next to the executable.
    pub fn bundled_assets_dir(&self) -> PathBuf {
        self.macos_dir().join("assets")
    }

    /// Icon resource inside the bundle.
    pub fn bundled_icon_path(&self) -> PathBuf {
        self.resources_dir().join(BUNDLED_ICON_NAME)
    }

    /// `Info.plist` inside the bundle.
    pub fn bundled_info_plist_path(&self) -> PathBuf {
        self.contents_dir().join("Info.plist")
    }

    /// Source icon image.
    pub fn source_icon(&self) -> PathBuf {
        self.resolve(&self.bundle_settings.source_icon)
    }

    /// Source asset tree.
    pub fn assets_dir(&self) -> PathBuf {
        self.resolve(&self.bundle_settings.assets_dir)
    }

    /// Temporary iconset directory.
    pub fn iconset_dir(&self) -> PathBuf {
        self.resolve(&self.bundle_settings.iconset_dir)
    }

    /// Temporary compiled icon resource.
    pub fn icns_path(&self) -> PathBuf {
        self.resolve(&self.bundle_settings.icns)
    }

    /// Source `Info.plist`.
    pub fn info_plist(&self) -> PathBuf {
        self.resolve(&self.bundle_settings.macos.info_plist)
    }

    /// Entitlements for the bundle signature.
    pub fn entitlements(&self) -> PathBuf {
        self.resolve(&self.bundle_settings.macos.entitlements)
    }

    /// Installer output path.
    pub fn dmg_path(&self) -> PathBuf {
        self.resolve(&self.bundle_settings.dmg.path)
    }

    /// Installer background image.
    pub fn dmg_background(&self) -> PathBuf {
        self.resolve(&self.bundle_settings.dmg.background)
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        package: PackageSettings,
        bundle_settings: BundleSettings,
        project_dir: PathBuf,
        target_dir: PathBuf,
    ) -> Self {
        Self {
            package,
            bundle_settings,
            project_dir,
            target_dir,
        }
    }
}
