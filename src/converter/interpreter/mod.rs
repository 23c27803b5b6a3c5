//! Locating a Python 3 interpreter that can run PyInstaller.
//!
//! This binary is never a Python interpreter itself, so the interpreter comes
//! either from an explicit launch path (`--python` / `PYTOEXE_PYTHON`) or from
//! probing: well-known names on `PATH` first, then conventional install
//! locations. The result is resolved once at startup and carried in the
//! session's [`Environment`](crate::converter::Environment).

mod locations;
mod probe;
mod resolver;

pub use locations::default_patterns;
pub use probe::{ProbeFailure, probe};
pub use resolver::InterpreterResolver;

use serde::Serialize;
use std::path::{Path, PathBuf};

/// A Python interpreter the converter will run PyInstaller with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpreter {
    path: PathBuf,
    version: Option<String>,
}

impl Interpreter {
    /// Creates an interpreter record.
    pub fn new(path: PathBuf, version: Option<String>) -> Self {
        Self { path, version }
    }

    /// Path to the executable.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Version reported by `--version`, when it was probed.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl std::fmt::Display for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{} (Python {})", self.path.display(), v),
            None => write!(f, "{}", self.path.display()),
        }
    }
}
