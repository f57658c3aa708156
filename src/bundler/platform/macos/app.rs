//! macOS application bundle (.app) assembly.

use crate::bundler::{
    error::{Context, Error, Result},
    settings::Settings,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Creates the bundle layout and copies the compiled binary and assets into it.
///
/// Existing bundle content is overwritten in place. With `clean` set the
/// whole bundle is removed first, so files dropped from `assets/` since the
/// last build do not linger.
pub async fn assemble_bundle(settings: &Settings) -> Result<PathBuf> {
    let app_bundle_path = settings.app_bundle_path();

    log::info!(
        "Bundling {} at {}",
        settings.app_bundle_name(),
        app_bundle_path.display()
    );

    if settings.clean() {
        log::debug!("Removing previous bundle {}", app_bundle_path.display());
        fs::remove_dir_all(&app_bundle_path).await?;
    }

    let macos_dir = settings.macos_dir();
    let resources_dir = settings.resources_dir();
    fs::create_dir_all(&macos_dir, false).await?;
    fs::create_dir_all(&resources_dir, false).await?;

    let binary = settings.compiled_binary_path();
    fs::copy_file(&binary, &settings.bundled_binary_path())
        .await
        .with_context(|| format!("failed to copy {} to .app bundle", binary.display()))?;

    let assets = settings.assets_dir();
    fs::copy_dir(&assets, &settings.bundled_assets_dir())
        .await
        .with_context(|| format!("failed to copy assets from {}", assets.display()))?;

    Ok(app_bundle_path)
}

/// Copies the compiled icon and the property list into the bundle.
pub async fn install_metadata(settings: &Settings) -> Result<()> {
    let info_plist = settings.info_plist();
    check_info_plist(&info_plist, settings.crate_name())?;

    let icns = settings.icns_path();
    fs::copy_file(&icns, &settings.bundled_icon_path())
        .await
        .context("failed to copy app icon into Resources")?;

    fs::copy_file(&info_plist, &settings.bundled_info_plist_path())
        .await
        .context("failed to copy Info.plist into Contents")?;

    log::info!("Installed {} and Info.plist", settings.bundled_icon_path().display());
    Ok(())
}

/// Parses `Info.plist` and warns when it names a different executable.
///
/// The file is copied as-is, so a mismatch would produce a bundle that
/// launches nothing.
pub fn check_info_plist(path: &Path, crate_name: &str) -> Result<()> {
    let value = plist::Value::from_file(path)
        .map_err(Error::from)
        .with_context(|| format!("{} is not a valid property list", path.display()))?;

    let dict = value
        .as_dictionary()
        .with_context(|| format!("{} is not a dictionary property list", path.display()))?;

    match dict.get("CFBundleExecutable").and_then(plist::Value::as_string) {
        Some(executable) if executable == crate_name => {}
        Some(executable) => log::warn!(
            "Info.plist CFBundleExecutable is '{}' but the bundled binary is '{}'",
            executable,
            crate_name
        ),
        None => log::warn!("Info.plist has no CFBundleExecutable entry"),
    }

    Ok(())
}
