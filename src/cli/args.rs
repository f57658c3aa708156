//! Command line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// macOS packager for Karang Lestari
#[derive(Parser, Debug)]
#[command(
    name = "karang_bundler",
    version,
    about = "Builds, signs and packages Karang Lestari as a macOS .app and .dmg",
    long_about = "Compiles the release binary, assembles the .app bundle, generates the icon, \
signs every executable and the bundle, and wraps it in a .dmg installer.

Usage:
  karang_bundler
  karang_bundler --project-dir ../karang-lestari --clean
  karang_bundler --plan

Exit code 0 = the .dmg exists and the bundle is signed."
)]
pub struct Args {
    /// Project root containing Cargo.toml, assets/ and meta/
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Code-signing identity passed to codesign --sign
    #[arg(long, value_name = "ID", env = "KARANG_SIGNING_IDENTITY")]
    pub signing_identity: Option<String>,

    /// Rust target triple to compile for
    #[arg(long, value_name = "TRIPLE", env = "KARANG_TARGET")]
    pub target: Option<String>,

    /// Remove the existing bundle before assembling
    #[arg(long)]
    pub clean: bool,

    /// Print the ordered steps and their preconditions, then exit
    #[arg(long)]
    pub plan: bool,

    /// Show verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
