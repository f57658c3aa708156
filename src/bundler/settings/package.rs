//! Package identity.

/// Application name used when nothing else is configured.
pub const DEFAULT_APP_NAME: &str = "Karang Lestari";

/// Crate (and binary) name used when nothing else is configured.
pub const DEFAULT_CRATE_NAME: &str = "karang_lestari";

/// Package identity shared by every step.
///
/// # Examples
///
/// ```no_run
/// use karang_bundler::bundler::PackageSettings;
///
/// let settings = PackageSettings {
///     app_name: "Karang Lestari".into(),
///     crate_name: "karang_lestari".into(),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct PackageSettings {
    /// Product name displayed to users and used for `<AppName>.app`.
    pub app_name: String,

    /// Cargo binary name; the executable placed in `Contents/MacOS`.
    pub crate_name: String,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            crate_name: DEFAULT_CRATE_NAME.to_string(),
        }
    }
}
