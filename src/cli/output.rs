//! Styled terminal output.

use console::{Term, style};
use std::io;

/// Writes styled progress, log and summary lines.
///
/// Everything goes to stdout unless JSON output is requested, in which case
/// human-readable lines move to stderr.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    to_stderr: bool,
}

impl OutputManager {
    /// Creates an output manager.
    ///
    /// `verbose` controls whether raw tool output is shown; `to_stderr`
    /// moves all human-readable output to stderr.
    pub fn new(verbose: bool, to_stderr: bool) -> Self {
        Self { verbose, to_stderr }
    }

    fn term(&self) -> Term {
        if self.to_stderr {
            Term::stderr()
        } else {
            Term::stdout()
        }
    }

    /// Indented raw tool output, only when verbose.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.verbose {
            self.term().write_line(&format!("  {message}"))?;
        }
        Ok(())
    }

    /// Secondary detail.
    pub fn dim(&self, message: &str) -> io::Result<()> {
        self.term().write_line(&style(message).dim().to_string())
    }

    /// Section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        self.term()
            .write_line(&style(title).yellow().bold().to_string())
    }

    /// The command being run.
    pub fn command(&self, message: &str) -> io::Result<()> {
        self.term().write_line(&style(message).cyan().to_string())
    }

    /// Work in progress.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.term().write_line(&format!("{} {}", style("●").blue(), message))
    }

    /// Success message.
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.term().write_line(&style(message).green().to_string())
    }

    /// Warning message.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        Term::stderr().write_line(&style(message).yellow().to_string())
    }

    /// Error message.
    pub fn error(&self, message: &str) -> io::Result<()> {
        Term::stderr().write_line(&style(message).red().to_string())
    }
}
