//! Filesystem and process helpers shared by the converter.

pub mod fs;
pub mod process;
