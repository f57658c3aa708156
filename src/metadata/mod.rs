//! Packaging configuration discovery from the project's `Cargo.toml`

use crate::bundler::{BundleSettings, PackageSettings};
use crate::error::{CliError, PackagerError, Result};
use std::path::Path;

/// Table under `[package.metadata]` holding bundler overrides.
pub const METADATA_TABLE: &str = "karang_bundler";

/// Packaging configuration extracted from `Cargo.toml`
#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
    /// App and binary names
    pub package: PackageSettings,

    /// Overrides from `[package.metadata.karang_bundler]`
    pub bundle_settings: BundleSettings,
}

/// Loads packaging configuration for the project rooted at `project_dir`.
///
/// A project without `Cargo.toml` yields the defaults; the compile step
/// reports the missing manifest later with its own precondition error.
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig> {
    let cargo_toml_path = project_dir.join("Cargo.toml");

    if !cargo_toml_path.is_file() {
        log::debug!(
            "{} not found, using default packaging configuration",
            cargo_toml_path.display()
        );
        return Ok(ProjectConfig::default());
    }

    let manifest = std::fs::read_to_string(&cargo_toml_path).map_err(|e| {
        PackagerError::Cli(CliError::ManifestUnreadable {
            path: cargo_toml_path.clone(),
            reason: e.to_string(),
        })
    })?;

    parse_project_config(&manifest)
}

/// Parses packaging configuration from manifest text.
pub fn parse_project_config(manifest: &str) -> Result<ProjectConfig> {
    let toml_value: toml::Value = toml::from_str(manifest)?;

    let mut package = PackageSettings::default();

    // Try [[bin]] section first
    if let Some(binary_name) = toml_value
        .get("bin")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|first| first.get("name"))
        .and_then(|v| v.as_str())
        .or_else(|| {
            toml_value
                .get("package")
                .and_then(|p| p.get("name"))
                .and_then(|v| v.as_str())
        })
    {
        package.crate_name = binary_name.to_string();
    }

    let bundle_settings = match toml_value
        .get("package")
        .and_then(|p| p.get("metadata"))
        .and_then(|m| m.get(METADATA_TABLE))
    {
        Some(table) => {
            log::debug!("Found [package.metadata.{}]", METADATA_TABLE);
            table.clone().try_into::<BundleSettings>()?
        }
        None => BundleSettings::default(),
    };

    Ok(ProjectConfig {
        package,
        bundle_settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn binary_name_prefers_bin_section() {
        let config = parse_project_config(
            r#"
            [package]
            name = "karang-lestari-workspace"

            [[bin]]
            name = "karang_lestari"
            "#,
        )
        .unwrap();
        assert_eq!(config.package.crate_name, "karang_lestari");
    }

    #[test]
    fn binary_name_falls_back_to_package_name() {
        let config = parse_project_config("[package]\nname = \"reef\"\n").unwrap();
        assert_eq!(config.package.crate_name, "reef");
        assert_eq!(config.package.app_name, "Karang Lestari");
    }

    #[test]
    fn metadata_table_overrides_defaults() {
        let config = parse_project_config(
            r#"
            [package]
            name = "reef"

            [package.metadata.karang_bundler]
            app_name = "Reef"
            output_dir = "dist/mac"

            [package.metadata.karang_bundler.macos]
            signing_identity = "-"

            [package.metadata.karang_bundler.dmg]
            volume_name = "Reef Installer"
            "#,
        )
        .unwrap();

        let bundle = config.bundle_settings;
        assert_eq!(bundle.app_name.as_deref(), Some("Reef"));
        assert_eq!(bundle.output_dir, PathBuf::from("dist/mac"));
        assert_eq!(bundle.macos.signing_identity, "-");
        assert_eq!(bundle.macos.target, "aarch64-apple-darwin");
        assert_eq!(bundle.dmg.volume_name, "Reef Installer");
        assert_eq!(bundle.iconset_dir, PathBuf::from("AppIcon.iconset"));
    }

    #[test]
    fn malformed_metadata_is_an_error() {
        let err = parse_project_config(
            "[package]\nname = \"reef\"\n[package.metadata.karang_bundler]\nclean = \"yes\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, PackagerError::Toml(_)));
    }

    #[test]
    fn missing_manifest_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = load_project_config(tmp.path()).unwrap();
        assert_eq!(config.package.crate_name, "karang_lestari");
    }
}
