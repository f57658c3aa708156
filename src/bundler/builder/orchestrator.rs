//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that walks
//! [`BuildStep::ORDER`], checking each step's preconditions before running it.

use crate::bundler::{
    BundledArtifact, Result, Settings,
    error::ErrorExt,
    platform::macos::{app, dmg, icon, sign},
    utils::process::{ProcessRunner, ToolRunner},
};

use super::{
    checksum::calculate_sha256,
    compile::compile_release,
    steps::{BuildStep, Precondition},
};

/// Main bundler orchestrator.
///
/// Runs the packaging pipeline strictly in order. The first failing step
/// aborts the run; nothing produced by earlier steps is rolled back.
///
/// # Examples
///
/// ```no_run
/// use karang_bundler::bundler::{Bundler, SettingsBuilder};
///
/// # async fn example() -> karang_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new().project_dir(".").build()?;
/// let bundler = Bundler::new(settings);
///
/// let artifact = bundler.bundle().await?;
/// println!("Created: {} ({} bytes)", artifact.dmg.display(), artifact.size);
/// println!("SHA256: {}", artifact.checksum);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler<R = ProcessRunner> {
    settings: Settings,
    runner: R,
}

impl Bundler<ProcessRunner> {
    /// Creates a bundler that runs the real external tools.
    pub fn new(settings: Settings) -> Self {
        Self::with_runner(settings, ProcessRunner)
    }
}

impl<R: ToolRunner> Bundler<R> {
    /// Creates a bundler with a custom tool runner.
    pub fn with_runner(settings: Settings, runner: R) -> Self {
        Self { settings, runner }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns a reference to the tool runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Every step in execution order with the paths it requires.
    ///
    /// Nothing is executed or checked.
    pub fn plan(&self) -> Vec<(BuildStep, Vec<Precondition>)> {
        BuildStep::ORDER
            .iter()
            .map(|step| (*step, step.preconditions(&self.settings)))
            .collect()
    }

    /// Runs the full pipeline.
    pub async fn bundle(&self) -> Result<BundledArtifact> {
        self.bundle_with_progress(|_, _| {}).await
    }

    /// Runs the full pipeline, calling `on_step` with the 1-based index and
    /// step right before each step executes.
    pub async fn bundle_with_progress<F>(&self, mut on_step: F) -> Result<BundledArtifact>
    where
        F: FnMut(usize, BuildStep),
    {
        let mut signed_executables = 0;

        for (index, step) in BuildStep::ORDER.iter().enumerate() {
            step.check_preconditions(&self.settings)?;
            on_step(index + 1, *step);
            log::info!("[{}/{}] {}", index + 1, BuildStep::ORDER.len(), step);

            if let Some(count) = self.run_step(*step).await? {
                signed_executables = count;
            }
        }

        let dmg = self.settings.dmg_path();
        let size = tokio::fs::metadata(&dmg)
            .await
            .fs_context("reading artifact metadata", &dmg)?
            .len();
        let checksum = calculate_sha256(&dmg).await?;

        Ok(BundledArtifact {
            app_bundle: self.settings.app_bundle_path(),
            dmg,
            size,
            checksum,
            signed_executables,
        })
    }

    /// Executes one step without checking its preconditions.
    ///
    /// Returns the number of files signed for [`BuildStep::SignExecutables`].
    async fn run_step(&self, step: BuildStep) -> Result<Option<usize>> {
        let settings = &self.settings;
        let runner = &self.runner;

        match step {
            BuildStep::Compile => compile_release(settings, runner).await?,
            BuildStep::AssembleBundle => {
                app::assemble_bundle(settings).await?;
            }
            BuildStep::GenerateIconset => icon::generate_iconset(settings, runner).await?,
            BuildStep::CompileIcon => icon::compile_icns(settings, runner).await?,
            BuildStep::InstallMetadata => app::install_metadata(settings).await?,
            BuildStep::SignExecutables => {
                return Ok(Some(sign::sign_executables(settings, runner).await?));
            }
            BuildStep::SignBundle => sign::sign_bundle(settings, runner).await?,
            BuildStep::BuildInstaller => {
                dmg::build_installer(settings, runner).await?;
            }
            BuildStep::Cleanup => icon::remove_intermediates(settings).await?,
        }

        Ok(None)
    }
}
