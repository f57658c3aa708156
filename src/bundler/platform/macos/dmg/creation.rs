//! `create-dmg` invocation.
//!
//! The installer window layout (size, icon placement, background, drop link)
//! is passed straight to `create-dmg`, which handles mounting, Finder
//! customization and compression itself.

use crate::bundler::{settings::Settings, utils::process::ToolCommand};

/// Builds the `create-dmg` command for the configured layout.
///
/// The source folder is the bundle's parent directory, so the mounted
/// volume shows `<AppName>.app` next to the Applications drop link.
pub fn create_dmg_command(settings: &Settings) -> ToolCommand {
    let dmg = settings.dmg_settings();
    let app_name = settings.app_bundle_name();
    let (width, height) = dmg.window_size;
    let (app_x, app_y) = dmg.app_position;
    let (link_x, link_y) = dmg.app_drop_link;
    let icon_size = dmg.icon_size.to_string();

    ToolCommand::new("create-dmg")
        .args(["--volname", dmg.volume_name.as_str()])
        .arg("--volicon")
        .arg(settings.icns_path())
        .arg("--background")
        .arg(settings.dmg_background())
        .arg("--window-size")
        .args([width.to_string(), height.to_string()])
        .args(["--icon-size", icon_size.as_str()])
        .args(["--icon", app_name.as_str()])
        .args([app_x.to_string(), app_y.to_string()])
        .args(["--hide-extension", app_name.as_str()])
        .arg("--app-drop-link")
        .args([link_x.to_string(), link_y.to_string()])
        .arg(settings.dmg_path())
        .arg(settings.output_dir())
        .current_dir(settings.project_dir())
}
