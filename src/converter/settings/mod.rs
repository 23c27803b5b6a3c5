//! Build configuration passed from the front end to the converter.
//!
//! A [`BuildConfig`] is built fresh for every build request (usually through
//! [`BuildConfigBuilder`]), validated, turned into a command line and then
//! dropped.

mod builder;
mod core;
mod modes;

pub use builder::BuildConfigBuilder;
pub use core::BuildConfig;
pub use modes::{BundleMode, WindowMode};
