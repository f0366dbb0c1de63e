//! Human-readable progress output on stdout.
//!
//! Styling comes from `console`, which drops colours when stdout is not a
//! terminal.

use console::style;
use std::io::{self, Write};

/// Terminal output for pipeline progress.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    fn line(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut out = io::stdout().lock();
        writeln!(out, "{message}")?;
        out.flush()
    }

    /// Section header for a stage.
    pub fn section(&self, title: &str) -> io::Result<()> {
        self.line(&format!("\n{}", style(format!("==> {title}")).bold()))
    }

    /// Progress line.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.line(&format!("  {message}"))
    }

    /// Indented detail line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.line(&format!("    {}", style(message).dim()))
    }

    /// Success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.line(&format!("{} {message}", style("✓").green().bold()))
    }

    /// Warning line.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        self.line(&format!("{} {message}", style("⚠").yellow().bold()))
    }

    /// Only printed in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose {
            self.line(message)
        } else {
            Ok(())
        }
    }
}
