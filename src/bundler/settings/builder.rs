//! Builder for constructing Settings.

use super::{BundleSettings, PackageSettings, Settings};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use karang_bundler::bundler::{BundleSettings, PackageSettings, SettingsBuilder};
///
/// # fn example() -> karang_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir("../karang-lestari")
///     .package_settings(PackageSettings {
///         app_name: "Karang Lestari".into(),
///         crate_name: "karang_lestari".into(),
///     })
///     .bundle_settings(BundleSettings::default())
///     .signing_identity("-")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    project_dir: Option<PathBuf>,
    target_dir: Option<PathBuf>,
    package_settings: Option<PackageSettings>,
    bundle_settings: BundleSettings,
    signing_identity: Option<String>,
    target: Option<String>,
    clean: Option<bool>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project directory.
    ///
    /// Default: current directory
    pub fn project_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the cargo target directory.
    ///
    /// Default: `CARGO_TARGET_DIR`, then `<project>/target`. Relative paths
    /// are taken relative to the project directory.
    pub fn target_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.target_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets package identity.
    ///
    /// Default: [`PackageSettings::default`], with `app_name` / `crate_name`
    /// from the bundle settings applied on top when present.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets bundle configuration.
    ///
    /// Default: [`BundleSettings::default`]
    pub fn bundle_settings(mut self, settings: BundleSettings) -> Self {
        self.bundle_settings = settings;
        self
    }

    /// Overrides the signing identity from the bundle settings.
    pub fn signing_identity(mut self, identity: impl Into<String>) -> Self {
        self.signing_identity = Some(identity.into());
        self
    }

    /// Overrides the compile target triple from the bundle settings.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Overrides the clean-rebuild flag from the bundle settings.
    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = Some(clean);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the name, crate name, signing identity or target
    /// resolve to an empty string.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let mut bundle_settings = self.bundle_settings;

        let mut package = self.package_settings.unwrap_or_default();
        if let Some(app_name) = bundle_settings.app_name.clone() {
            package.app_name = app_name;
        }
        if let Some(crate_name) = bundle_settings.crate_name.clone() {
            package.crate_name = crate_name;
        }

        if let Some(identity) = self.signing_identity {
            bundle_settings.macos.signing_identity = identity;
        }
        if let Some(target) = self.target {
            bundle_settings.macos.target = target;
        }
        if let Some(clean) = self.clean {
            bundle_settings.clean = clean;
        }

        for (field, value) in [
            ("app_name", package.app_name.as_str()),
            ("crate_name", package.crate_name.as_str()),
            ("signing_identity", bundle_settings.macos.signing_identity.as_str()),
            ("target", bundle_settings.macos.target.as_str()),
        ] {
            if value.trim().is_empty() {
                crate::bail!("{} must not be empty", field);
            }
        }

        if !bundle_settings.macos.target.ends_with("-apple-darwin") {
            log::warn!(
                "Target {} is not an Apple target; the bundle will not launch on macOS",
                bundle_settings.macos.target
            );
        }

        let project_dir = self.project_dir.unwrap_or_else(|| PathBuf::from("."));
        let target_dir = resolve_target_dir(
            &project_dir,
            self.target_dir
                .or_else(|| std::env::var_os("CARGO_TARGET_DIR").map(PathBuf::from)),
        );

        Ok(Settings::new(package, bundle_settings, project_dir, target_dir))
    }
}

/// Cargo runs from the project directory, so a relative target directory
/// is relative to it as well.
fn resolve_target_dir(project_dir: &Path, configured: Option<PathBuf>) -> PathBuf {
    match configured {
        Some(dir) if dir.is_absolute() => dir,
        Some(dir) => project_dir.join(dir),
        None => project_dir.join("target"),
    }
}
