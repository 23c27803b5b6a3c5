//! Builder for constructing [`BuildConfig`].

use super::{BuildConfig, BundleMode, WindowMode};
use std::path::{Path, PathBuf};

/// Fluent builder for [`BuildConfig`].
///
/// # Examples
///
/// ```no_run
/// use pytoexe::converter::{BuildConfigBuilder, BundleMode, WindowMode};
///
/// let config = BuildConfigBuilder::new()
///     .script("app.py")
///     .icon("app.ico")
///     .bundle_mode(BundleMode::OneDir)
///     .window_mode(WindowMode::Windowed)
///     .extra_file("settings.json")
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Default)]
pub struct BuildConfigBuilder {
    script: PathBuf,
    output_dir: Option<PathBuf>,
    icon: Option<PathBuf>,
    bundle_mode: BundleMode,
    window_mode: WindowMode,
    extra_files: Vec<PathBuf>,
}

impl BuildConfigBuilder {
    /// Creates a new builder with default modes (single file, console).
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the script to package.
    pub fn script<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.script = path.as_ref().to_path_buf();
        self
    }

    /// Sets the output directory.
    ///
    /// Default: `dist` next to the script
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the icon file.
    pub fn icon<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.icon = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the bundle mode.
    pub fn bundle_mode(mut self, mode: BundleMode) -> Self {
        self.bundle_mode = mode;
        self
    }

    /// Sets the window mode.
    pub fn window_mode(mut self, mode: WindowMode) -> Self {
        self.window_mode = mode;
        self
    }

    /// Adds a file to bundle next to the script. Duplicates are ignored.
    pub fn extra_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        if !self.extra_files.contains(&path) {
            self.extra_files.push(path);
        }
        self
    }

    /// Adds several files to bundle.
    pub fn extra_files<I, P>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths.into_iter().fold(self, |b, p| b.extra_file(p))
    }

    /// Builds the configuration. Validation is separate, see
    /// [`BuildConfig::validate`].
    pub fn build(self) -> BuildConfig {
        BuildConfig::new(
            self.script,
            self.output_dir,
            self.icon,
            self.bundle_mode,
            self.window_mode,
            self.extra_files,
        )
    }
}
