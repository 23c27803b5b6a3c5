//! Interpreter resolution policy.

use super::{Interpreter, default_patterns, probe};
use crate::converter::{
    config::{INTERPRETER_NAMES, PROBE_TIMEOUT},
    error::{Error, Result},
};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Finds a working Python 3 interpreter.
///
/// Resolution order:
///
/// 1. An explicit launch path that is not this application is used as-is.
/// 2. Each name in `names` found on `PATH` is probed with `--version`.
/// 3. Each file matching one of `patterns` is probed the same way.
///
/// The first candidate that reports Python 3 wins. Rejected candidates are
/// logged at debug level with the reason.
#[derive(Debug, Clone)]
pub struct InterpreterResolver {
    names: Vec<String>,
    patterns: Vec<String>,
    probe_timeout: Duration,
    current_exe: Option<PathBuf>,
}

impl Default for InterpreterResolver {
    fn default() -> Self {
        Self {
            names: INTERPRETER_NAMES.iter().map(|n| n.to_string()).collect(),
            patterns: default_patterns(),
            probe_timeout: PROBE_TIMEOUT,
            current_exe: std::env::current_exe().ok(),
        }
    }
}

impl InterpreterResolver {
    /// Creates a resolver with the platform's default names and locations.
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the executable names probed on `PATH`.
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the install-location glob patterns.
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the per-candidate probe timeout.
    pub fn with_probe_timeout(mut self, limit: Duration) -> Self {
        self.probe_timeout = limit;
        self
    }

    /// Overrides the path treated as this application's own executable.
    pub fn with_current_exe(mut self, path: impl Into<PathBuf>) -> Self {
        self.current_exe = Some(path.into());
        self
    }

    /// Whether `path` is this application rather than an interpreter.
    pub fn is_packaged_instance(&self, path: &Path) -> bool {
        let Some(exe) = &self.current_exe else {
            return false;
        };
        match (path.canonicalize(), exe.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => path == exe,
        }
    }

    /// Resolves an interpreter, returning `None` when nothing usable exists.
    pub async fn resolve(&self, launch_path: Option<&Path>) -> Option<Interpreter> {
        if let Some(path) = launch_path {
            if !self.is_packaged_instance(path) {
                log::debug!("Using launch interpreter {}", path.display());
                return Some(Interpreter::new(path.to_path_buf(), None));
            }
            log::debug!(
                "{} is this application, searching for an interpreter",
                path.display()
            );
        }

        for name in &self.names {
            match which::which(name) {
                Ok(found) => {
                    if let Some(interpreter) = self.accept(found).await {
                        return Some(interpreter);
                    }
                }
                Err(e) => log::debug!("{name} not found on PATH: {e}"),
            }
        }

        for candidate in self.install_candidates() {
            if let Some(interpreter) = self.accept(candidate).await {
                return Some(interpreter);
            }
        }

        log::warn!("No Python 3 interpreter found on PATH or in common install locations");
        None
    }

    /// Validates a path the user picked by hand.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InterpreterNotRunnable`] with the probe's reason.
    pub async fn validate(&self, path: &Path) -> Result<Interpreter> {
        match probe(path, self.probe_timeout).await {
            Ok(version) => Ok(Interpreter::new(path.to_path_buf(), version)),
            Err(failure) => Err(Error::InterpreterNotRunnable {
                path: path.to_path_buf(),
                reason: failure.to_string(),
            }),
        }
    }

    async fn accept(&self, candidate: PathBuf) -> Option<Interpreter> {
        match probe(&candidate, self.probe_timeout).await {
            Ok(version) => {
                log::info!(
                    "Found Python {} at {}",
                    version.as_deref().unwrap_or("3"),
                    candidate.display()
                );
                Some(Interpreter::new(candidate, version))
            }
            Err(failure) => {
                log::debug!("Rejected {}: {}", candidate.display(), failure);
                None
            }
        }
    }

    /// Existing files matching the install patterns, in pattern order.
    fn install_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        for pattern in &self.patterns {
            let paths = match glob::glob(pattern) {
                Ok(paths) => paths,
                Err(e) => {
                    log::debug!("Skipping invalid pattern {pattern}: {e}");
                    continue;
                }
            };
            for path in paths.flatten() {
                if path.is_file() && !candidates.contains(&path) {
                    candidates.push(path);
                }
            }
        }
        candidates
    }
}
