//! Background PyInstaller runs.
//!
//! The invoker never touches front-end state. It reports through a
//! [`LogSink`], which forwards [`WorkerEvent`]s over a channel to the
//! interactive side:
//!
//! - `runner` - spawning, output relay, waiting, cancellation
//! - `outcome` - classification of a finished build
//! - `checksum` - SHA-256 of the produced executable

mod checksum;
mod outcome;
mod runner;

pub use checksum::calculate_sha256;
pub use outcome::{BuildOutcome, Classification, classify};
pub use runner::{RunOptions, run_build};

use tokio::sync::mpsc::UnboundedSender;

/// Presentation hint attached to a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTag {
    /// Raw output from the packaging tool
    Output,
    /// Section header
    Head,
    /// Secondary detail
    Dim,
    /// The command being run
    Command,
    /// Success message
    Ok,
    /// Warning message
    Warn,
    /// Error message
    Err,
}

/// One line for the build log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Text without trailing newline
    pub text: String,
    /// How to present it
    pub tag: LogTag,
}

/// Messages from the build worker to the interactive side.
#[derive(Debug)]
pub enum WorkerEvent {
    /// A line for the build log.
    Log(LogLine),
    /// The build ended. Sent exactly once per build, after all its lines.
    Finished(BuildOutcome),
}

/// Sending half of the worker channel.
#[derive(Debug, Clone)]
pub struct LogSink {
    tx: UnboundedSender<WorkerEvent>,
}

impl LogSink {
    /// Wraps the worker channel.
    pub fn new(tx: UnboundedSender<WorkerEvent>) -> Self {
        Self { tx }
    }

    /// Relays one line. Lines are dropped once the receiver is gone.
    pub fn line(&self, text: impl Into<String>, tag: LogTag) {
        let _ = self.tx.send(WorkerEvent::Log(LogLine {
            text: text.into(),
            tag,
        }));
    }

    /// Reports the end of the build.
    pub(crate) fn finish(self, outcome: BuildOutcome) {
        if self.tx.send(WorkerEvent::Finished(outcome)).is_err() {
            log::debug!("Build finished after the session went away");
        }
    }
}
