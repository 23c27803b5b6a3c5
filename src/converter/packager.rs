//! PyInstaller availability check and on-demand installation.

use crate::converter::{
    config::{IMPORT_CHECK_TIMEOUT, INSTALL_TIMEOUT, PACKAGER_DISTRIBUTION, PACKAGER_MODULE},
    error::{Error, Result},
    utils::process::{command, display_command_line},
};
use std::{
    io,
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};
use tokio::time::timeout;

/// How PyInstaller became available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackagerStatus {
    /// It was already importable.
    AlreadyInstalled,
    /// It was installed just now with pip.
    Installed,
}

/// PyInstaller as seen through one interpreter.
#[derive(Debug, Clone)]
pub struct Packager {
    python: PathBuf,
    import_timeout: Duration,
    install_timeout: Duration,
}

impl Packager {
    /// Creates a packager check for `python` with the default timeouts.
    pub fn new(python: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
            import_timeout: IMPORT_CHECK_TIMEOUT,
            install_timeout: INSTALL_TIMEOUT,
        }
    }

    /// Overrides the import-check and install timeouts.
    pub fn with_timeouts(mut self, import_timeout: Duration, install_timeout: Duration) -> Self {
        self.import_timeout = import_timeout;
        self.install_timeout = install_timeout;
        self
    }

    /// The command a user can run to install PyInstaller by hand.
    pub fn manual_install_command(&self) -> String {
        display_command_line(&self.python, ["-m", "pip", "install", PACKAGER_DISTRIBUTION])
    }

    /// Makes sure PyInstaller is importable, installing it if `consent`
    /// agrees.
    ///
    /// `consent` is only called when the import check fails.
    ///
    /// # Errors
    ///
    /// - [`Error::InterpreterNotRunnable`] if the interpreter cannot be started
    /// - [`Error::PackagerDeclined`] if `consent` returns `false`
    /// - [`Error::PackagerInstallFailed`] if pip fails, with the manual command
    pub async fn ensure<F>(&self, consent: F) -> Result<PackagerStatus>
    where
        F: FnOnce() -> bool,
    {
        if self.is_importable().await? {
            log::debug!("{} is importable via {}", PACKAGER_MODULE, self.python.display());
            return Ok(PackagerStatus::AlreadyInstalled);
        }

        log::info!("{} is not installed for {}", PACKAGER_MODULE, self.python.display());
        if !consent() {
            return Err(Error::PackagerDeclined);
        }

        self.install().await?;
        Ok(PackagerStatus::Installed)
    }

    /// Runs `<python> -c "import PyInstaller"`.
    ///
    /// A failed or timed-out import is `Ok(false)`; only a launch failure is
    /// an error.
    pub async fn is_importable(&self) -> Result<bool> {
        let import = format!("import {PACKAGER_MODULE}");
        let status = timeout(
            self.import_timeout,
            command(&self.python)
                .args(["-c", &import])
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status(),
        )
        .await;

        match status {
            Err(_) => {
                log::warn!(
                    "Import check timed out after {} seconds",
                    self.import_timeout.as_secs()
                );
                Ok(false)
            }
            Ok(Ok(status)) => Ok(status.success()),
            Ok(Err(e)) => Err(not_runnable(&self.python, e)),
        }
    }

    /// Runs `<python> -m pip install pyinstaller`.
    pub async fn install(&self) -> Result<()> {
        log::info!("Installing {} with pip...", PACKAGER_DISTRIBUTION);
        let fail = |reason: String| Error::PackagerInstallFailed {
            manual_command: self.manual_install_command(),
            reason,
        };

        let output = timeout(
            self.install_timeout,
            command(&self.python)
                .args(["-m", "pip", "install", PACKAGER_DISTRIBUTION])
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output(),
        )
        .await
        .map_err(|_| {
            fail(
                Error::Timeout {
                    command: self.manual_install_command(),
                    timeout: self.install_timeout,
                }
                .to_string(),
            )
        })?
        .map_err(|e| fail(e.to_string()))?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            log::debug!("pip: {line}");
        }

        if output.status.success() {
            log::info!("{} installed", PACKAGER_DISTRIBUTION);
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("no error output");
        Err(fail(format!(
            "pip exited with code {:?}: {}",
            output.status.code(),
            detail.trim()
        )))
    }
}

fn not_runnable(python: &Path, error: io::Error) -> Error {
    Error::InterpreterNotRunnable {
        path: python.to_path_buf(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_command_names_the_interpreter() {
        let packager = Packager::new("/usr/bin/python3");
        assert_eq!(
            packager.manual_install_command(),
            "/usr/bin/python3 -m pip install pyinstaller"
        );
    }

    #[tokio::test]
    async fn missing_interpreter_is_not_runnable() {
        let dir = tempfile::tempdir().unwrap();
        let packager = Packager::new(dir.path().join("python3"));
        let mut asked = false;
        let err = packager
            .ensure(|| {
                asked = true;
                true
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InterpreterNotRunnable { .. }));
        assert!(!asked);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn declined_install_is_reported() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let python = dir.path().join("python3");
        std::fs::write(&python, "#!/bin/sh\nexit 1\n").unwrap();
        std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755)).unwrap();

        let err = Packager::new(&python).ensure(|| false).await.unwrap_err();
        assert!(matches!(err, Error::PackagerDeclined));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failed_install_carries_manual_command() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let python = dir.path().join("python3");
        std::fs::write(
            &python,
            "#!/bin/sh\nif [ \"$1\" = \"-m\" ]; then echo 'ERROR: no network' >&2; fi\nexit 1\n",
        )
        .unwrap();
        std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755)).unwrap();

        match Packager::new(&python).ensure(|| true).await {
            Err(Error::PackagerInstallFailed {
                manual_command,
                reason,
            }) => {
                assert!(manual_command.ends_with("-m pip install pyinstaller"));
                assert!(reason.contains("no network"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
