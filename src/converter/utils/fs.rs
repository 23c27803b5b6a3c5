//! File system utilities for builds.

use crate::converter::error::{Error, ErrorExt, Result};
use std::path::Path;
use tokio::fs;

/// Creates all of the directories of the specified path.
///
/// Succeeds when the directory already exists.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .fs_context("creating output folder", path)
}

/// Returns whether `path` exists and is a regular file.
pub async fn is_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Opens a folder in the platform's file manager.
///
/// # Errors
///
/// Fails if the folder no longer exists or the file manager cannot be
/// launched.
pub fn open_folder(path: &Path) -> Result<()> {
    if !path.is_dir() {
        crate::bail!("output folder no longer exists: {}", path.display());
    }

    let opener = if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    log::debug!("Opening {} with {}", path.display(), opener);
    std::process::Command::new(opener)
        .arg(path)
        .spawn()
        .map(|_| ())
        .map_err(|error| Error::CommandFailed {
            command: opener.to_string(),
            error,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_dir_all_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        create_dir_all(&nested).await.unwrap();
        create_dir_all(&nested).await.unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn open_folder_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone");
        let err = open_folder(&gone).unwrap_err();
        assert!(err.to_string().contains("no longer exists"));
    }
}
