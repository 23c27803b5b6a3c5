//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation and
//! conversion into a [`BuildConfig`].

use crate::converter::{
    BuildConfig, BuildConfigBuilder, BundleMode, WindowMode, config::PYTHON_ENV_VAR,
};
use clap::Parser;
use std::{path::PathBuf, time::Duration};

/// Package a Python script into a standalone executable
#[derive(Parser, Debug)]
#[command(
    name = "pytoexe",
    version,
    about = "Package a Python script into a standalone executable with PyInstaller",
    long_about = "Packages a Python script into a standalone executable with PyInstaller.

Finds a Python 3 interpreter, installs PyInstaller on demand, runs it with
absolute paths and checks that the executable really exists afterwards.

Usage:
  pytoexe app.py
  pytoexe app.py --windowed --icon app.ico --add-data config.json
  pytoexe app.py --onedir -o build/out --python /usr/bin/python3.12

Exit code 0 = the executable exists in the output directory.
Exit code 2 = PyInstaller reported success but the executable is missing."
)]
pub struct Args {
    /// Python script to package
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Output directory (default: `dist` next to the script)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Icon file for the executable
    #[arg(short, long, value_name = "FILE")]
    pub icon: Option<PathBuf>,

    /// Produce a directory with supporting files instead of a single executable
    #[arg(long)]
    pub onedir: bool,

    /// Do not open a console window when the executable starts
    #[arg(short, long)]
    pub windowed: bool,

    /// Extra file to bundle next to the script (repeatable)
    #[arg(short = 'a', long = "add-data", value_name = "FILE")]
    pub add_data: Vec<PathBuf>,

    /// Python interpreter to run PyInstaller with
    #[arg(long, value_name = "PATH", env = PYTHON_ENV_VAR)]
    pub python: Option<PathBuf>,

    /// Install PyInstaller without asking if it is missing
    #[arg(short, long)]
    pub yes: bool,

    /// Kill the build after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Open the output folder after a successful build
    #[arg(long)]
    pub open: bool,

    /// Print the build outcome as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Hide PyInstaller's own output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.script.as_os_str().is_empty() {
            return Err("Script path cannot be empty".to_string());
        }

        if self.timeout == Some(0) {
            return Err("--timeout must be at least 1 second".to_string());
        }

        if self
            .python
            .as_ref()
            .is_some_and(|python| python.as_os_str().is_empty())
        {
            return Err(format!("--python (or {PYTHON_ENV_VAR}) cannot be empty"));
        }

        Ok(())
    }

    /// Build timeout, if one was requested
    pub fn build_timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// The build request described by these arguments
    pub fn build_config(&self) -> BuildConfig {
        let mut builder = BuildConfigBuilder::new()
            .script(&self.script)
            .bundle_mode(if self.onedir {
                BundleMode::OneDir
            } else {
                BundleMode::OneFile
            })
            .window_mode(if self.windowed {
                WindowMode::Windowed
            } else {
                WindowMode::Console
            })
            .extra_files(&self.add_data);

        if let Some(dir) = &self.output_dir {
            builder = builder.output_dir(dir);
        }
        if let Some(icon) = &self.icon {
            builder = builder.icon(icon);
        }
        builder.build()
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
    assume_yes: bool,
    open_output: bool,
    json: bool,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(
            !args.quiet, // PyInstaller output unless --quiet
            args.json,   // keep stdout clean for JSON
        );

        Self {
            output,
            assume_yes: args.yes,
            open_output: args.open,
            json: args.json,
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Whether missing PyInstaller is installed without asking
    pub fn assume_yes(&self) -> bool {
        self.assume_yes
    }

    /// Whether to open the output folder after success
    pub fn open_output(&self) -> bool {
        self.open_output
    }

    /// Whether the outcome is printed as JSON
    pub fn json(&self) -> bool {
        self.json
    }
}
