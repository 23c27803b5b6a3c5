//! The per-request build configuration.

use super::{BundleMode, WindowMode};
use crate::converter::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Options for one PyInstaller build.
///
/// Constructed with [`BuildConfigBuilder`](super::BuildConfigBuilder).
/// Paths are stored as the user gave them; the command builder makes them
/// absolute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildConfig {
    script: PathBuf,
    output_dir: Option<PathBuf>,
    icon: Option<PathBuf>,
    bundle_mode: BundleMode,
    window_mode: WindowMode,
    extra_files: Vec<PathBuf>,
}

impl BuildConfig {
    pub(super) fn new(
        script: PathBuf,
        output_dir: Option<PathBuf>,
        icon: Option<PathBuf>,
        bundle_mode: BundleMode,
        window_mode: WindowMode,
        extra_files: Vec<PathBuf>,
    ) -> Self {
        Self {
            script,
            output_dir,
            icon,
            bundle_mode,
            window_mode,
            extra_files,
        }
    }

    /// Returns the script path.
    pub fn script(&self) -> &Path {
        &self.script
    }

    /// Returns the explicit output directory, if one was chosen.
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Returns the icon path, if any.
    pub fn icon(&self) -> Option<&Path> {
        self.icon.as_deref()
    }

    /// Returns the bundle mode.
    pub fn bundle_mode(&self) -> BundleMode {
        self.bundle_mode
    }

    /// Returns the window mode.
    pub fn window_mode(&self) -> WindowMode {
        self.window_mode
    }

    /// Returns the extra files to bundle, in the order they were added.
    pub fn extra_files(&self) -> &[PathBuf] {
        &self.extra_files
    }

    /// Checks the user's inputs before anything is spawned.
    ///
    /// # Errors
    ///
    /// - [`Error::ScriptNotSelected`] if the script path is empty
    /// - [`Error::ScriptNotFound`] if it is not a file
    /// - [`Error::IconNotFound`] if an icon is set but is not a file
    /// - [`Error::ExtraFileNotFound`] if an extra file does not exist
    pub fn validate(&self) -> Result<()> {
        if self.script.as_os_str().is_empty() {
            return Err(Error::ScriptNotSelected);
        }
        if !self.script.is_file() {
            return Err(Error::ScriptNotFound(self.script.clone()));
        }
        if let Some(icon) = self.icon.as_ref().filter(|icon| !icon.is_file()) {
            return Err(Error::IconNotFound(icon.clone()));
        }
        if let Some(missing) = self.extra_files.iter().find(|f| !f.exists()) {
            return Err(Error::ExtraFileNotFound(missing.clone()));
        }
        Ok(())
    }
}
