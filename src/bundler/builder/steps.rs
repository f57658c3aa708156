//! The ordered list of build steps and their filesystem preconditions.
//!
//! Ordering constraints:
//! - the iconset is complete before `iconutil` runs
//! - inner executables are signed before the bundle signature
//! - a stale installer is removed before `create-dmg` runs

use crate::bundler::{
    error::{Error, Result},
    platform::macos::icon::iconset_variants,
    settings::Settings,
};
use std::fmt;
use std::path::PathBuf;

/// One named stage of the packaging pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStep {
    /// `cargo build --release --target <triple>`
    Compile,
    /// Create the bundle layout, copy binary and assets.
    AssembleBundle,
    /// Resize the source icon into every iconset variant.
    GenerateIconset,
    /// `iconutil -c icns`
    CompileIcon,
    /// Copy the icon and `Info.plist` into the bundle.
    InstallMetadata,
    /// `codesign` each executable file.
    SignExecutables,
    /// `codesign` the bundle with entitlements and hardened runtime.
    SignBundle,
    /// `create-dmg`
    BuildInstaller,
    /// Remove the iconset and intermediate `.icns`.
    Cleanup,
}

impl BuildStep {
    /// Execution order.
    pub const ORDER: [BuildStep; 9] = [
        BuildStep::Compile,
        BuildStep::AssembleBundle,
        BuildStep::GenerateIconset,
        BuildStep::CompileIcon,
        BuildStep::InstallMetadata,
        BuildStep::SignExecutables,
        BuildStep::SignBundle,
        BuildStep::BuildInstaller,
        BuildStep::Cleanup,
    ];

    /// Short kebab-case name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            BuildStep::Compile => "compile",
            BuildStep::AssembleBundle => "assemble-bundle",
            BuildStep::GenerateIconset => "generate-iconset",
            BuildStep::CompileIcon => "compile-icon",
            BuildStep::InstallMetadata => "install-metadata",
            BuildStep::SignExecutables => "sign-executables",
            BuildStep::SignBundle => "sign-bundle",
            BuildStep::BuildInstaller => "build-installer",
            BuildStep::Cleanup => "cleanup",
        }
    }

    /// Paths that must exist before this step runs.
    pub fn preconditions(&self, settings: &Settings) -> Vec<Precondition> {
        use PathKind::{Dir, File};

        match self {
            BuildStep::Compile => vec![Precondition::new(
                "project manifest",
                settings.cargo_manifest(),
                File,
            )],
            BuildStep::AssembleBundle => vec![
                Precondition::new("compiled binary", settings.compiled_binary_path(), File),
                Precondition::new("assets directory", settings.assets_dir(), Dir),
            ],
            BuildStep::GenerateIconset => vec![Precondition::new(
                "source icon",
                settings.source_icon(),
                File,
            )],
            BuildStep::CompileIcon => iconset_variants()
                .into_iter()
                .map(|v| {
                    Precondition::new("iconset variant", settings.iconset_dir().join(v.file_name), File)
                })
                .collect(),
            BuildStep::InstallMetadata => vec![
                Precondition::new("compiled icon", settings.icns_path(), File),
                Precondition::new("Info.plist", settings.info_plist(), File),
            ],
            BuildStep::SignExecutables => vec![
                Precondition::new("bundle MacOS directory", settings.macos_dir(), Dir),
                Precondition::new("bundle Resources directory", settings.resources_dir(), Dir),
                Precondition::new("bundle Info.plist", settings.bundled_info_plist_path(), File),
            ],
            BuildStep::SignBundle => vec![
                Precondition::new("application bundle", settings.app_bundle_path(), Dir),
                Precondition::new("entitlements", settings.entitlements(), File),
            ],
            BuildStep::BuildInstaller => vec![
                Precondition::new("application bundle", settings.app_bundle_path(), Dir),
                Precondition::new("installer background", settings.dmg_background(), File),
                Precondition::new("compiled icon", settings.icns_path(), File),
            ],
            BuildStep::Cleanup => Vec::new(),
        }
    }

    /// Checks every precondition, failing on the first one that does not hold.
    pub fn check_preconditions(&self, settings: &Settings) -> Result<()> {
        for precondition in self.preconditions(settings) {
            precondition.check(*self)?;
        }
        Ok(())
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a precondition expects a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// A regular file (or symlink to one).
    File,
    /// A directory.
    Dir,
}

/// A path that must exist, with the kind it must have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Precondition {
    /// Human-readable name of the input.
    pub description: &'static str,
    /// Absolute or project-relative path.
    pub path: PathBuf,
    /// Expected kind.
    pub kind: PathKind,
}

impl Precondition {
    fn new(description: &'static str, path: PathBuf, kind: PathKind) -> Self {
        Self {
            description,
            path,
            kind,
        }
    }

    /// Whether the path currently exists with the expected kind.
    pub fn holds(&self) -> bool {
        match self.kind {
            PathKind::File => self.path.is_file(),
            PathKind::Dir => self.path.is_dir(),
        }
    }

    fn check(&self, step: BuildStep) -> Result<()> {
        if self.holds() {
            Ok(())
        } else {
            Err(Error::PreconditionFailed {
                step: step.name(),
                description: self.description,
                path: self.path.clone(),
            })
        }
    }
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            PathKind::File => "file",
            PathKind::Dir => "dir",
        };
        write!(f, "{} ({}): {}", self.description, kind, self.path.display())
    }
}
