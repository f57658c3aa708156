//! macOS DMG disk image creator.
//!
//! Produces a drag-to-install disk image around the signed `.app` bundle,
//! using the external `create-dmg` tool for window layout and background.

mod creation;

use crate::bundler::{
    error::Result,
    settings::Settings,
    utils::{fs, process::ToolRunner},
};
use std::path::PathBuf;

pub use creation::create_dmg_command;

/// Builds the installer image.
///
/// # Process
/// 1. Remove any stale image at the output path (`create-dmg` refuses to overwrite)
/// 2. Ensure the output directory exists
/// 3. Run `create-dmg` with the configured layout
///
/// # Returns
/// Path to the created DMG file.
pub async fn build_installer<R: ToolRunner>(settings: &Settings, runner: &R) -> Result<PathBuf> {
    let dmg_path = settings.dmg_path();
    log::info!("Creating DMG for {}", settings.app_name());

    if dmg_path.exists() {
        log::debug!("Removing previous installer {}", dmg_path.display());
    }
    fs::remove_file(&dmg_path).await?;

    if let Some(parent) = dmg_path.parent() {
        fs::create_dir_all(parent, false).await?;
    }

    runner.run(&create_dmg_command(settings)).await?;

    log::info!("✓ Created DMG: {}", dmg_path.display());
    Ok(dmg_path)
}
