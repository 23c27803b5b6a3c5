//! Terminal implementation of the converter's [`Frontend`].

use super::{OutputManager, RuntimeConfig};
use crate::converter::{Frontend, LogLine, LogTag, Notice, Tone};
use console::{Term, style};
use dialoguer::{Confirm, Input};
use std::path::PathBuf;

/// Drives a build from an interactive (or scripted) terminal.
pub struct TerminalFrontend {
    output: OutputManager,
    assume_yes: bool,
    interactive: bool,
}

impl TerminalFrontend {
    /// Creates a front end from the runtime configuration.
    pub fn new(config: &RuntimeConfig) -> Self {
        Self {
            output: config.output().clone(),
            assume_yes: config.assume_yes(),
            interactive: Term::stderr().is_term(),
        }
    }

    /// Asks for an interpreter path when none was found.
    ///
    /// Returns `None` when not attached to a terminal or the answer is empty.
    pub fn choose_interpreter(&mut self) -> Option<PathBuf> {
        if !self.interactive {
            return None;
        }
        let answer: String = Input::new()
            .with_prompt("Path to a Python 3 executable (empty to cancel)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| log::warn!("Prompt failed: {e}"))
            .ok()?;
        let answer = answer.trim();
        (!answer.is_empty()).then(|| PathBuf::from(answer))
    }

    fn report(&self, result: std::io::Result<()>) {
        if let Err(e) = result {
            log::warn!("Failed to write to terminal: {e}");
        }
    }
}

impl Frontend for TerminalFrontend {
    fn log(&mut self, line: &LogLine) {
        let text = line.text.as_str();
        let result = match line.tag {
            LogTag::Output => self.output.indent(text),
            LogTag::Head => self.output.section(text),
            LogTag::Dim => self.output.dim(text),
            LogTag::Command => self.output.command(text),
            LogTag::Ok => self.output.success(text),
            LogTag::Warn => self.output.warn(text),
            LogTag::Err => self.output.error(text),
        };
        self.report(result);
    }

    fn set_status(&mut self, text: &str, tone: Tone) {
        let result = match tone {
            Tone::Busy => self.output.progress(text),
            Tone::Ok => self.output.success(text),
            Tone::Warn => self.output.warn(text),
            Tone::Danger => self.output.error(text),
        };
        self.report(result);
    }

    fn set_build_ready(&mut self, ready: bool) {
        log::debug!("Build control {}", if ready { "ready" } else { "busy" });
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        if self.assume_yes {
            log::info!("{title}: answering yes (--yes)");
            return true;
        }
        if !self.interactive {
            self.report(
                self.output
                    .warn(&format!("{title}: not asking without a terminal (use --yes)")),
            );
            return false;
        }
        self.report(self.output.section(title));
        Confirm::new()
            .with_prompt(message.replace("\n\n", " "))
            .default(true)
            .interact()
            .unwrap_or_else(|e| {
                log::warn!("Prompt failed: {e}");
                false
            })
    }

    fn notify(&mut self, notice: Notice, title: &str, message: &str) {
        let heading = match notice {
            Notice::Info => style(title).green().bold(),
            Notice::Warning => style(title).yellow().bold(),
            Notice::Error => style(title).red().bold(),
        };
        let term = Term::stderr();
        self.report(term.write_line(""));
        self.report(term.write_line(&heading.to_string()));
        for line in message.lines() {
            self.report(term.write_line(&format!("  {line}")));
        }
    }
}
