//! Colored terminal output for packaging runs
//!
//! Every user-facing line of a run goes through [`OutputManager`]: the step
//! progress, the `--plan` listing and the final artifact report.

use crate::bundler::{BuildStep, BundledArtifact, Precondition};
use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Create a new output manager writing to stdout
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    /// Section header, e.g. `═══ Packaging Karang Lestari.app ═══`
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        writeln!(&mut buffer)?;
        buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        writeln!(&mut buffer, "═══ {} ═══", title)?;
        buffer.reset()?;
        self.bufwtr.print(&buffer)
    }

    /// `[index/total] step`, printed right before a step runs
    pub fn step(&self, index: usize, step: BuildStep) -> std::io::Result<()> {
        self.marked("⋯", ColorSpec::new().set_fg(Some(Color::Magenta)), &step_line(index, step))
    }

    /// One step of the `--plan` listing with the state of each precondition
    pub fn plan_step(
        &self,
        index: usize,
        step: BuildStep,
        preconditions: &[Precondition],
    ) -> std::io::Result<()> {
        self.step(index, step)?;
        for precondition in preconditions {
            self.indented(&precondition_line(precondition))?;
        }
        Ok(())
    }

    /// Summary of a finished run
    pub fn artifact(&self, artifact: &BundledArtifact) -> std::io::Result<()> {
        let success = ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true).clone();
        self.marked(
            "✓",
            &success,
            &format!(
                "Signed {} executable(s) and {}",
                artifact.signed_executables,
                artifact.app_bundle.display()
            ),
        )?;
        self.marked("✓", &success, &format!("Created {}", artifact.dmg.display()))?;
        self.indented(&format!("Size: {} bytes", artifact.size))?;
        self.indented(&format!("SHA256: {}", artifact.checksum))
    }

    /// Warning line
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.marked("⚠", ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true), message)
    }

    /// Detail shown only with `--verbose`
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.marked("→", ColorSpec::new().set_fg(Some(Color::Blue)), message)
    }

    fn marked(&self, marker: &str, color: &ColorSpec, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        buffer.set_color(color)?;
        write!(&mut buffer, "{}", marker)?;
        buffer.reset()?;
        writeln!(&mut buffer, " {}", message)?;
        self.bufwtr.print(&buffer)
    }

    fn indented(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        writeln!(&mut buffer, "    {}", message)?;
        self.bufwtr.print(&buffer)
    }
}

fn step_line(index: usize, step: BuildStep) -> String {
    format!("[{}/{}] {}", index, BuildStep::ORDER.len(), step)
}

fn precondition_line(precondition: &Precondition) -> String {
    let marker = if precondition.holds() { "ok" } else { "missing" };
    format!("[{}] {}", marker, precondition)
}
