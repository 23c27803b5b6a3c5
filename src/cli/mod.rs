//! Command line interface for pytoexe.
//!
//! This module parses arguments, resolves the interpreter once, and drives a
//! [`Session`] with a terminal front end until the build ends.

mod args;
mod frontend;
mod output;

pub use args::{Args, RuntimeConfig};
pub use frontend::TerminalFrontend;
pub use output::OutputManager;

use crate::converter::{
    BuildOutcome, Environment, Error, Frontend, Interpreter, InterpreterResolver, Notice, Session,
};
use crate::error::{CliError, Result};

/// Exit code for a build whose executable is missing after a clean exit
pub const EXIT_ARTIFACT_MISSING: i32 = 2;

/// Exit code for a build killed by `--timeout`
pub const EXIT_TIMED_OUT: i32 = 124;

/// Exit code for a build cancelled with Ctrl-C
pub const EXIT_CANCELLED: i32 = 130;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let runtime_config = RuntimeConfig::from(&args);
    if let Err(reason) = args.validate() {
        not_started(&runtime_config, reason.clone())?;
        return Err(CliError::InvalidArguments { reason }.into());
    }

    let mut frontend = TerminalFrontend::new(&runtime_config);

    let resolver = InterpreterResolver::new();
    let interpreter = match resolver.resolve(args.python.as_deref()).await {
        Some(interpreter) => Some(interpreter),
        None => choose_interpreter(&resolver, &mut frontend).await,
    };
    let Some(interpreter) = interpreter else {
        return not_started(&runtime_config, Error::InterpreterNotFound.to_string());
    };

    let env = Environment::new(Some(interpreter)).with_build_timeout(args.build_timeout());
    let mut session = Session::new(frontend, env);

    if let Err(e) = session.start_build(args.build_config()).await {
        // Already shown to the user by the session
        return not_started(&runtime_config, e.to_string());
    }

    let ctrl_c = session.cancel_token().map(|token| {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        })
    });
    let outcome = session.wait_for_outcome().await;
    if let Some(listener) = ctrl_c {
        listener.abort();
    }

    let outcome =
        outcome.ok_or_else(|| anyhow::anyhow!("the build ended without reporting a result"))?;

    if runtime_config.open_output() && outcome.is_success() {
        // A failure here is shown by the session and does not change the result
        let _ = session.open_output();
    }

    print_json(&runtime_config, &outcome)?;
    Ok(exit_code(&outcome))
}

/// Ends a run whose build never started. Under `--json` the reason is still
/// printed as an `errored` outcome, so stdout always carries one result.
fn not_started(config: &RuntimeConfig, reason: String) -> Result<i32> {
    let outcome = BuildOutcome::Errored { reason };
    print_json(config, &outcome)?;
    Ok(exit_code(&outcome))
}

fn print_json(config: &RuntimeConfig, outcome: &BuildOutcome) -> Result<()> {
    if config.json() {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    }
    Ok(())
}

/// Process exit code for a build outcome
pub fn exit_code(outcome: &BuildOutcome) -> i32 {
    match outcome {
        BuildOutcome::Succeeded { .. } => 0,
        BuildOutcome::ArtifactMissing { .. } => EXIT_ARTIFACT_MISSING,
        BuildOutcome::Cancelled => EXIT_CANCELLED,
        BuildOutcome::TimedOut { .. } => EXIT_TIMED_OUT,
        BuildOutcome::Failed { .. } | BuildOutcome::Errored { .. } => 1,
    }
}

/// Tells the user no interpreter was found and lets them pick one by hand.
async fn choose_interpreter(
    resolver: &InterpreterResolver,
    frontend: &mut TerminalFrontend,
) -> Option<Interpreter> {
    let error = Error::InterpreterNotFound;
    frontend.notify(
        Notice::Error,
        "Python Not Found",
        &format!("{error}.\n\n{}", error.hint().unwrap_or_default()),
    );

    while let Some(path) = frontend.choose_interpreter() {
        match resolver.validate(&path).await {
            Ok(interpreter) => return Some(interpreter),
            Err(e) => frontend.notify(Notice::Error, "Python Not Found", &e.to_string()),
        }
    }
    None
}
