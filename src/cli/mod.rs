//! Command line interface for the Karang Lestari packager.
//!
//! Parses arguments, resolves settings from `Cargo.toml` and the command
//! line, and drives the [`Bundler`] with colored progress output.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::bundler::{Bundler, REQUIRED_TOOLS, Settings, SettingsBuilder, missing_tools};
use crate::error::{CliError, Result};
use crate::metadata;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    init_logging(&args);

    let output = OutputManager::new(args.verbose, args.quiet);
    let settings = resolve_settings(&args)?;
    let bundler = Bundler::new(settings);

    if args.plan {
        print_plan(&bundler, &output)?;
        return Ok(0);
    }

    let missing = missing_tools(&REQUIRED_TOOLS);
    if !missing.is_empty() {
        return Err(CliError::MissingTools {
            tools: missing.into_iter().map(String::from).collect(),
        }
        .into());
    }

    output.section(&format!("Packaging {}", bundler.settings().app_bundle_name()))?;
    output.verbose(&format!(
        "Target {} signed as \"{}\"",
        bundler.settings().target(),
        bundler.settings().signing_identity()
    ))?;

    let artifact = bundler
        .bundle_with_progress(|index, step| {
            if let Err(e) = output.step(index, step) {
                log::debug!("Failed to print progress for {}: {}", step, e);
            }
        })
        .await?;

    output.artifact(&artifact)?;

    Ok(0)
}

/// Configures `env_logger`; `RUST_LOG` takes precedence over the flags.
fn init_logging(args: &Args) {
    let level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

/// Builds settings from the project manifest with command line overrides applied.
fn resolve_settings(args: &Args) -> Result<Settings> {
    if !args.project_dir.is_dir() {
        return Err(CliError::ProjectNotFound {
            path: args.project_dir.clone(),
        }
        .into());
    }

    let config = metadata::load_project_config(&args.project_dir)?;

    let mut builder = SettingsBuilder::new()
        .project_dir(&args.project_dir)
        .package_settings(config.package)
        .bundle_settings(config.bundle_settings);

    if let Some(identity) = &args.signing_identity {
        builder = builder.signing_identity(identity);
    }
    if let Some(target) = &args.target {
        builder = builder.target(target);
    }
    if args.clean {
        builder = builder.clean(true);
    }

    Ok(builder.build()?)
}

fn print_plan(bundler: &Bundler, output: &OutputManager) -> Result<()> {
    output.section(&format!("Plan for {}", bundler.settings().app_bundle_name()))?;

    for (index, (step, preconditions)) in bundler.plan().into_iter().enumerate() {
        output.plan_step(index + 1, step, &preconditions)?;
    }

    let missing = missing_tools(&REQUIRED_TOOLS);
    if !missing.is_empty() {
        output.warn(&format!("Not found in PATH: {}", missing.join(", ")))?;
    }

    Ok(())
}
