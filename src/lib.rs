//! Package Python scripts into standalone executables with PyInstaller.
//!
//! This library provides:
//! - Python 3 interpreter discovery
//! - PyInstaller availability checks and on-demand installation
//! - Command construction with absolute paths throughout
//! - Background builds with streamed output and result classification
//!
//! It can be used both as a CLI tool and as a library dependency; other
//! front ends implement [`converter::Frontend`].

pub mod cli;
pub mod converter;
pub mod error;

// Re-export commonly used types
pub use error::{AppError, CliError, Result};
