//! PyInstaller build orchestration.
//!
//! This module holds everything between "the user pressed build" and "the
//! executable is on disk":
//!
//! 1. [`InterpreterResolver`] finds a Python 3 interpreter once at startup
//! 2. [`BuildConfig::validate`] checks the user's inputs
//! 3. [`Packager`] makes sure PyInstaller is importable, installing it with consent
//! 4. [`build_command`] turns the config into an absolute-path command line
//! 5. [`run_build`] runs it in the background and classifies the result
//!
//! [`Session`] ties the steps together for a [`Frontend`].
//!
//! # Example
//!
//! ```no_run
//! use pytoexe::converter::{BuildConfigBuilder, Environment, InterpreterResolver, Session};
//! # use pytoexe::converter::{Frontend, LogLine, Notice, Tone};
//! # struct Quiet;
//! # impl Frontend for Quiet {
//! #     fn log(&mut self, _: &LogLine) {}
//! #     fn set_status(&mut self, _: &str, _: Tone) {}
//! #     fn set_build_ready(&mut self, _: bool) {}
//! #     fn confirm(&mut self, _: &str, _: &str) -> bool { true }
//! #     fn notify(&mut self, _: Notice, _: &str, _: &str) {}
//! # }
//!
//! # async fn example() -> pytoexe::converter::Result<()> {
//! let interpreter = InterpreterResolver::new().resolve(None).await;
//! let mut session = Session::new(Quiet, Environment::new(interpreter));
//!
//! let config = BuildConfigBuilder::new().script("app.py").build();
//! session.start_build(config).await?;
//! let outcome = session.wait_for_outcome().await;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod invoker;
pub mod packager;
pub mod session;
pub mod settings;
pub mod utils;

pub use command::{BuildCommand, build_command};
pub use error::{Error, Result};
pub use interpreter::{Interpreter, InterpreterResolver};
pub use invoker::{BuildOutcome, LogLine, LogSink, LogTag, RunOptions, WorkerEvent, run_build};
pub use packager::{Packager, PackagerStatus};
pub use session::{Environment, Frontend, Notice, Session, SessionState, Tone};
pub use settings::{BuildConfig, BuildConfigBuilder, BundleMode, WindowMode};
