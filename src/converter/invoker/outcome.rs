//! Terminal states of a build.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// How the exit status and the artifact check combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Clean exit and the executable exists.
    Success,
    /// Clean exit but no executable, usually antivirus interference.
    ArtifactMissing,
    /// Non-zero exit.
    Failure,
}

/// Classifies a finished PyInstaller run.
///
/// A non-zero exit is a failure whether or not an executable exists; it may
/// be left over from an earlier build.
pub fn classify(exit_success: bool, artifact_present: bool) -> Classification {
    match (exit_success, artifact_present) {
        (true, true) => Classification::Success,
        (true, false) => Classification::ArtifactMissing,
        (false, _) => Classification::Failure,
    }
}

/// Final result of one build request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum BuildOutcome {
    /// The executable was produced.
    Succeeded {
        /// Path of the executable
        artifact: PathBuf,
        /// Output directory
        dist_dir: PathBuf,
        /// Size in bytes
        size: u64,
        /// Hex SHA-256, when the file could be read
        sha256: Option<String>,
    },
    /// PyInstaller reported success but the executable is not there.
    ArtifactMissing {
        /// Where it was expected
        expected: PathBuf,
    },
    /// PyInstaller exited with an error.
    Failed {
        /// Exit code, if the process was not killed by a signal
        exit_code: Option<i32>,
    },
    /// The build could not be started or its output could not be read.
    Errored {
        /// What went wrong
        reason: String,
    },
    /// The user cancelled the build.
    Cancelled,
    /// The build exceeded its time limit and was killed.
    TimedOut {
        /// Limit in seconds
        after_secs: u64,
    },
}

impl BuildOutcome {
    /// Whether the executable was produced.
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Succeeded { .. })
    }

    /// Output directory of a successful build.
    pub fn output_dir(&self) -> Option<&Path> {
        match self {
            BuildOutcome::Succeeded { dist_dir, .. } => Some(dist_dir),
            _ => None,
        }
    }
}
