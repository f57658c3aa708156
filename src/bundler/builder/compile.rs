//! Release build of the application binary.

use crate::bundler::{
    error::Result,
    settings::Settings,
    utils::process::{ToolCommand, ToolRunner},
};

/// `cargo build --release --target <triple>` run from the project directory.
pub fn cargo_build_command(settings: &Settings) -> ToolCommand {
    ToolCommand::new("cargo")
        .args(["build", "--release", "--target", settings.target()])
        .current_dir(settings.project_dir())
}

/// Compiles the release binary for the configured target.
pub async fn compile_release<R: ToolRunner>(settings: &Settings, runner: &R) -> Result<()> {
    log::info!(
        "Building {} for {}",
        settings.crate_name(),
        settings.target()
    );
    runner.run(&cargo_build_command(settings)).await?;
    log::info!("✓ Built {}", settings.compiled_binary_path().display());
    Ok(())
}
