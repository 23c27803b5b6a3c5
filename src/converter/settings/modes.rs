//! Mutually exclusive PyInstaller mode flags.

use serde::Serialize;

/// Whether PyInstaller emits one executable or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundleMode {
    /// Single consolidated executable.
    #[default]
    OneFile,
    /// Directory of supporting files plus an executable.
    OneDir,
}

impl BundleMode {
    /// The PyInstaller flag for this mode.
    pub fn flag(self) -> &'static str {
        match self {
            BundleMode::OneFile => "--onefile",
            BundleMode::OneDir => "--onedir",
        }
    }
}

/// Whether the produced executable opens a console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowMode {
    /// Console window at launch.
    #[default]
    Console,
    /// No console window.
    Windowed,
}

impl WindowMode {
    /// The PyInstaller flag for this mode.
    pub fn flag(self) -> &'static str {
        match self {
            WindowMode::Console => "--console",
            WindowMode::Windowed => "--windowed",
        }
    }
}
