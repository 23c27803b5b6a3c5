//! Error types for interpreter discovery, dependency checks and builds.
//!
//! Every variant renders as a human-readable sentence; remediation text for
//! the front end lives in [`Error::hint`].

use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error as DeriveError;

/// Result alias for converter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the converter core.
#[derive(Debug, DeriveError)]
pub enum Error {
    /// No Python 3 interpreter could be located.
    #[error("no Python 3 interpreter was found")]
    InterpreterNotFound,

    /// The interpreter path could not be executed.
    #[error("could not run interpreter `{path}`: {reason}")]
    InterpreterNotRunnable {
        /// Interpreter path
        path: PathBuf,
        /// Why the launch failed
        reason: String,
    },

    /// The user declined the on-demand PyInstaller install.
    #[error("PyInstaller is not installed and installation was declined")]
    PackagerDeclined,

    /// `pip install pyinstaller` failed.
    #[error("could not install PyInstaller automatically: {reason}")]
    PackagerInstallFailed {
        /// Command the user can run by hand
        manual_command: String,
        /// Failure detail
        reason: String,
    },

    /// No script was given.
    #[error("no Python script was selected")]
    ScriptNotSelected,

    /// The script path does not point at a file.
    #[error("script not found: {0}")]
    ScriptNotFound(PathBuf),

    /// The icon path does not point at a file.
    #[error("icon file not found: {0}")]
    IconNotFound(PathBuf),

    /// An extra file to bundle does not exist.
    #[error("file to bundle not found: {0}")]
    ExtraFileNotFound(PathBuf),

    /// A build is already running.
    #[error("a build is already running")]
    Busy,

    /// A subprocess could not be spawned.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Program or command line
        command: String,
        /// Underlying I/O error
        error: io::Error,
    },

    /// A subprocess did not finish in time.
    #[error("`{command}` timed out after {} seconds", timeout.as_secs())]
    Timeout {
        /// Program or command line
        command: String,
        /// Limit that was exceeded
        timeout: Duration,
    },

    /// Filesystem error with context.
    #[error("{context} `{}`: {error}", path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying I/O error
        error: io::Error,
    },

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Next action to suggest to the user, if there is a useful one.
    pub fn hint(&self) -> Option<String> {
        match self {
            Error::InterpreterNotFound => Some(
                "Install Python 3 from https://python.org/downloads and add it to PATH, \
                 or point --python (or PYTOEXE_PYTHON) at your python executable."
                    .to_string(),
            ),
            Error::InterpreterNotRunnable { .. } => Some(
                "Make sure Python 3 is installed and the selected path is an executable."
                    .to_string(),
            ),
            Error::PackagerDeclined => Some(
                "Install PyInstaller yourself (pip install pyinstaller) or rerun with --yes."
                    .to_string(),
            ),
            Error::PackagerInstallFailed { manual_command, .. } => {
                Some(format!("Run this manually in a terminal:\n  {manual_command}"))
            }
            Error::ScriptNotSelected => Some("Please select a .py file first.".to_string()),
            Error::ScriptNotFound(_) | Error::IconNotFound(_) | Error::ExtraFileNotFound(_) => {
                Some("Check the path and try again.".to_string())
            }
            Error::Busy => Some("Wait for the current build to finish.".to_string()),
            _ => None,
        }
    }

    /// Whether the error comes from the user's inputs rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::ScriptNotSelected
                | Error::ScriptNotFound(_)
                | Error::IconNotFound(_)
                | Error::ExtraFileNotFound(_)
        )
    }
}

/// Attach filesystem context to I/O results.
pub trait ErrorExt<T> {
    /// Wraps an I/O error with a description and the path involved.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Turn an `Option` into a [`Result`] with a message.
pub trait Context<T> {
    /// Returns `Error::GenericError(msg)` when `None`.
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

/// Return early with a formatted [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::converter::Error::GenericError(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_failure_hint_carries_manual_command() {
        let err = Error::PackagerInstallFailed {
            manual_command: "python3 -m pip install pyinstaller".into(),
            reason: "exit status 1".into(),
        };
        let hint = err.hint().unwrap();
        assert!(hint.contains("python3 -m pip install pyinstaller"));
    }

    #[test]
    fn fs_context_keeps_path() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = res.fs_context("creating output folder", "/tmp/out").unwrap_err();
        assert!(err.to_string().contains("/tmp/out"));
        assert!(err.to_string().starts_with("creating output folder"));
    }

    #[test]
    fn validation_errors_are_flagged() {
        assert!(Error::ScriptNotSelected.is_validation());
        assert!(Error::IconNotFound("x.ico".into()).is_validation());
        assert!(!Error::InterpreterNotFound.is_validation());
    }
}
