//! `--version` probing of interpreter candidates.

use crate::converter::{config::VERSION_MARKER, utils::process::command};
use std::{path::Path, process::Stdio, time::Duration};
use thiserror::Error;
use tokio::time::timeout;

/// Why a candidate was rejected.
#[derive(Debug, Error)]
pub enum ProbeFailure {
    /// The candidate could not be started.
    #[error("failed to execute: {0}")]
    Spawn(#[from] std::io::Error),

    /// `--version` did not answer in time.
    #[error("no answer within {} seconds", .0.as_secs())]
    TimedOut(Duration),

    /// `--version` exited unsuccessfully.
    #[error("--version exited with code {0:?}")]
    Exited(Option<i32>),

    /// The output did not contain the expected major version.
    #[error("not a Python 3 interpreter (reported {0:?})")]
    WrongVersion(String),
}

/// Runs `<path> --version` and checks it reports Python 3.
///
/// stdout and stderr are both inspected, since older interpreters print
/// their version to stderr. The child is killed if it does not finish within
/// `limit`.
///
/// # Returns
///
/// * `Ok(Some(version))` - e.g. `"3.12.1"`
/// * `Ok(None)` - the marker matched but no version number followed it
/// * `Err` - the candidate is unusable
pub async fn probe(path: &Path, limit: Duration) -> Result<Option<String>, ProbeFailure> {
    let output = timeout(
        limit,
        command(path)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output(),
    )
    .await
    .map_err(|_| ProbeFailure::TimedOut(limit))??;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    if !text.contains(VERSION_MARKER) {
        return Err(ProbeFailure::WrongVersion(text.trim().to_string()));
    }
    if !output.status.success() {
        return Err(ProbeFailure::Exited(output.status.code()));
    }
    Ok(parse_version(&text))
}

/// Extracts `3.x.y` from output such as `Python 3.11.4`.
fn parse_version(output: &str) -> Option<String> {
    output
        .split_whitespace()
        .skip_while(|word| *word != "Python")
        .nth(1)
        .filter(|v| v.starts_with('3'))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_parsed_from_banner() {
        assert_eq!(parse_version("Python 3.11.4\n"), Some("3.11.4".to_string()));
        assert_eq!(parse_version("Python 2.7.18"), None);
        assert_eq!(parse_version(""), None);
    }

    #[tokio::test]
    async fn missing_candidate_is_a_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let result = probe(&dir.path().join("python3"), Duration::from_secs(1)).await;
        assert!(matches!(result, Err(ProbeFailure::Spawn(_))));
    }
}
