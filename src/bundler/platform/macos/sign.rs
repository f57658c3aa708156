//! macOS code signing.
//!
//! Inner executables are signed one by one before the bundle-level signature
//! is applied; signing the bundle first and touching its contents afterwards
//! would invalidate the outer signature.

use crate::bundler::{
    error::{Context, Error, Result},
    settings::Settings,
    utils::process::{ToolCommand, ToolRunner},
};
use std::path::{Path, PathBuf};

/// Regular files under `root` with any executable permission bit set, in
/// sorted path order. Symlinks are not followed.
pub fn find_executables(root: &Path) -> Result<Vec<PathBuf>> {
    let mut executables = Vec::new();
    for entry in walkdir::WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let metadata = entry.metadata()?;
        if is_executable(&metadata) {
            executables.push(entry.into_path());
        }
    }
    Ok(executables)
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    false
}

/// `codesign` invocation for a single file inside the bundle.
pub fn sign_file_command(identity: &str, path: &Path) -> ToolCommand {
    ToolCommand::new("codesign")
        .args(["--force", "--sign", identity, "--verbose"])
        .arg(path)
}

/// `codesign` invocation for the whole bundle, with entitlements and the
/// hardened runtime.
pub fn sign_bundle_command(identity: &str, entitlements: &Path, app_bundle: &Path) -> ToolCommand {
    ToolCommand::new("codesign")
        .arg("--entitlements")
        .arg(entitlements)
        .args([
            "--deep", "--force", "--verify", "--verbose", "--options", "runtime", "--sign",
        ])
        .arg(identity)
        .arg(app_bundle)
}

/// Signs every executable file in the bundle in place.
///
/// Returns the number of files signed.
pub async fn sign_executables<R: ToolRunner>(settings: &Settings, runner: &R) -> Result<usize> {
    let app_bundle = settings.app_bundle_path();
    let identity = settings.signing_identity();
    let executables = find_executables(&app_bundle)?;

    if executables.is_empty() {
        log::warn!("No executable files found in {}", app_bundle.display());
    }

    for path in &executables {
        log::info!("Signing {}", path.display());
        runner.run(&sign_file_command(identity, path)).await?;
    }

    Ok(executables.len())
}

/// Signs the bundle as a whole. Must run after [`sign_executables`].
pub async fn sign_bundle<R: ToolRunner>(settings: &Settings, runner: &R) -> Result<()> {
    let app_bundle = settings.app_bundle_path();
    let identity = settings.signing_identity();
    let entitlements = settings.entitlements();

    plist::Value::from_file(&entitlements)
        .map_err(Error::from)
        .with_context(|| format!("{} is not a valid property list", entitlements.display()))?;

    log::info!(
        "Signing {} with identity '{}'",
        app_bundle.display(),
        identity
    );

    runner
        .run(&sign_bundle_command(identity, &entitlements, &app_bundle))
        .await?;

    log::info!("✓ Successfully signed {}", app_bundle.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_signature_uses_hardened_runtime() {
        let cmd = sign_bundle_command(
            "-",
            Path::new("meta/entitlements.plist"),
            Path::new("build/mac/Karang Lestari.app"),
        );
        assert_eq!(
            cmd.to_string(),
            "codesign --entitlements meta/entitlements.plist --deep --force --verify --verbose \
             --options runtime --sign - \"build/mac/Karang Lestari.app\""
        );
    }

    #[cfg(unix)]
    #[test]
    fn only_executable_files_are_found() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let macos = tmp.path().join("Contents/MacOS");
        std::fs::create_dir_all(macos.join("assets")).unwrap();

        let bin = macos.join("karang_lestari");
        std::fs::write(&bin, b"bin").unwrap();
        std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();

        let texture = macos.join("assets/sand.png");
        std::fs::write(&texture, b"png").unwrap();
        std::fs::set_permissions(&texture, std::fs::Permissions::from_mode(0o644)).unwrap();

        let helper = macos.join("assets/helper");
        std::fs::write(&helper, b"sh").unwrap();
        std::fs::set_permissions(&helper, std::fs::Permissions::from_mode(0o700)).unwrap();

        let found = find_executables(tmp.path()).unwrap();
        assert_eq!(found, vec![macos.join("assets/helper"), bin]);
    }
}
