//! Interactive-side build controller.
//!
//! A [`Session`] owns the front end and the busy/ready state. It validates a
//! request, makes sure PyInstaller is available, then hands the build to a
//! background task. The task reports back only through [`WorkerEvent`]s,
//! which the session applies to the front end on its own task:
//!
//! ```text
//! Idle --start_build--> Running --Finished--> Idle
//! ```
//!
//! A second request while running is rejected with [`Error::Busy`]. The
//! ready control is restored exactly once per started build, whatever the
//! outcome, including a panic inside the worker.

use crate::converter::{
    command::build_command,
    config::{IMPORT_CHECK_TIMEOUT, INSTALL_TIMEOUT, WORK_DIR_NAME},
    error::{Context, Error, Result},
    interpreter::Interpreter,
    invoker::{BuildOutcome, LogLine, LogSink, LogTag, RunOptions, WorkerEvent, run_build},
    packager::{Packager, PackagerStatus},
    settings::BuildConfig,
    utils::fs::open_folder,
};
use std::{path::PathBuf, time::Duration};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

/// Colour of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Work in progress
    Busy,
    /// Finished well
    Ok,
    /// Needs attention
    Warn,
    /// Failed
    Danger,
}

/// Kind of a blocking notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Information
    Info,
    /// Something is off but not fatal
    Warning,
    /// Something failed
    Error,
}

/// The surface a session drives.
///
/// All methods are called from the session's own task, never from the
/// build worker.
pub trait Frontend {
    /// Appends a line to the build log.
    fn log(&mut self, line: &LogLine);

    /// Empties the build log.
    fn clear_log(&mut self) {}

    /// Updates the status line.
    fn set_status(&mut self, text: &str, tone: Tone);

    /// Enables (`true`) or disables the control that starts a build.
    fn set_build_ready(&mut self, ready: bool);

    /// Asks a yes/no question.
    fn confirm(&mut self, title: &str, message: &str) -> bool;

    /// Shows a message the user must acknowledge.
    fn notify(&mut self, notice: Notice, title: &str, message: &str);
}

/// Process-scoped settings shared by every build of a session.
#[derive(Debug, Clone)]
pub struct Environment {
    interpreter: Option<Interpreter>,
    import_timeout: Duration,
    install_timeout: Duration,
    build_timeout: Option<Duration>,
}

impl Environment {
    /// Creates an environment around the interpreter resolved at startup.
    pub fn new(interpreter: Option<Interpreter>) -> Self {
        Self {
            interpreter,
            import_timeout: IMPORT_CHECK_TIMEOUT,
            install_timeout: INSTALL_TIMEOUT,
            build_timeout: None,
        }
    }

    /// Kills builds that run longer than `limit`.
    pub fn with_build_timeout(mut self, limit: Option<Duration>) -> Self {
        self.build_timeout = limit;
        self
    }

    /// Kill limit for a build.
    pub fn build_timeout(&self) -> Option<Duration> {
        self.build_timeout
    }
}

/// Whether a build is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Ready for a request
    Idle,
    /// A worker is running
    Running,
}

/// Build controller for one front end.
pub struct Session<F: Frontend> {
    frontend: F,
    env: Environment,
    state: SessionState,
    tx: UnboundedSender<WorkerEvent>,
    rx: UnboundedReceiver<WorkerEvent>,
    cancel: Option<CancellationToken>,
    last_output: Option<PathBuf>,
}

impl<F: Frontend> Session<F> {
    /// Creates an idle session.
    pub fn new(frontend: F, env: Environment) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            frontend,
            env,
            state: SessionState::Idle,
            tx,
            rx,
            cancel: None,
            last_output: None,
        }
    }

    /// The front end.
    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Output folder of the last successful build.
    pub fn last_output(&self) -> Option<&std::path::Path> {
        self.last_output.as_deref()
    }

    /// Validates `config`, ensures PyInstaller, and starts the build in the
    /// background.
    ///
    /// Every error is also shown through [`Frontend::notify`] before it is
    /// returned. Nothing is spawned unless this returns `Ok`.
    ///
    /// # Errors
    ///
    /// [`Error::Busy`], interpreter and PyInstaller errors, validation
    /// errors, and path resolution failures.
    pub async fn start_build(&mut self, config: BuildConfig) -> Result<()> {
        if self.state == SessionState::Running {
            self.frontend
                .notify(Notice::Info, "Busy", "A build is already running.");
            return Err(Error::Busy);
        }

        let result = self.prepare(&config).await;
        let command = match result {
            Ok(command) => command,
            Err(e) => {
                self.show_error(&e);
                return Err(e);
            }
        };

        let options = RunOptions {
            timeout: self.env.build_timeout,
            cancel: CancellationToken::new(),
        };
        self.cancel = Some(options.cancel.clone());
        self.launch(move |sink| async move { run_build(&command, &sink, options).await });
        Ok(())
    }

    async fn prepare(&mut self, config: &BuildConfig) -> Result<crate::converter::BuildCommand> {
        let interpreter = self
            .env
            .interpreter
            .clone()
            .ok_or(Error::InterpreterNotFound)?;
        config.validate()?;

        let packager = Packager::new(interpreter.path())
            .with_timeouts(self.env.import_timeout, self.env.install_timeout);
        let frontend = &mut self.frontend;
        let status = packager
            .ensure(|| {
                frontend.confirm(
                    "PyInstaller Missing",
                    "PyInstaller is not installed.\n\nInstall it now via pip?",
                )
            })
            .await?;
        if status == PackagerStatus::Installed {
            self.frontend
                .set_status("PyInstaller installed.", Tone::Ok);
        }

        build_command(config, interpreter.path())
    }

    /// Puts the session in the running state and runs `work` on a
    /// background task. The worker's result, or a panic, always arrives as
    /// exactly one [`WorkerEvent::Finished`].
    fn launch<W, Fut>(&mut self, work: W)
    where
        W: FnOnce(LogSink) -> Fut + Send + 'static,
        Fut: Future<Output = BuildOutcome> + Send + 'static,
    {
        self.state = SessionState::Running;
        self.frontend.set_build_ready(false);
        self.frontend.clear_log();
        self.frontend
            .set_status("Building  ...  compiling your script.", Tone::Busy);

        let sink = LogSink::new(self.tx.clone());
        tokio::spawn(async move {
            let worker = tokio::spawn(work(sink.clone()));
            let outcome = match worker.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::error!("Build worker crashed: {e}");
                    sink.line(format!("Unexpected error: {e}"), LogTag::Err);
                    BuildOutcome::Errored {
                        reason: format!("build worker crashed: {e}"),
                    }
                }
            };
            sink.finish(outcome);
        });
    }

    /// A handle that cancels the running build from elsewhere (e.g. a
    /// Ctrl-C listener).
    pub fn cancel_token(&self) -> Option<CancellationToken> {
        self.cancel.clone()
    }

    /// Waits for the next message from the worker.
    pub async fn next_event(&mut self) -> Option<WorkerEvent> {
        self.rx.recv().await
    }

    /// Applies one worker message to the front end. Returns the outcome when
    /// the message ends the build.
    pub fn handle_event(&mut self, event: WorkerEvent) -> Option<BuildOutcome> {
        match event {
            WorkerEvent::Log(line) => {
                self.frontend.log(&line);
                None
            }
            WorkerEvent::Finished(outcome) => {
                if self.state != SessionState::Running {
                    log::warn!("Ignoring build result received while idle");
                    return None;
                }
                self.state = SessionState::Idle;
                self.cancel = None;
                self.frontend.set_build_ready(true);
                self.report(&outcome);
                Some(outcome)
            }
        }
    }

    /// Pumps worker messages until the running build ends.
    ///
    /// Returns `None` immediately when no build is running.
    pub async fn wait_for_outcome(&mut self) -> Option<BuildOutcome> {
        while self.state == SessionState::Running {
            let event = self.next_event().await?;
            if let Some(outcome) = self.handle_event(event) {
                return Some(outcome);
            }
        }
        None
    }

    /// Opens the output folder of the last successful build.
    pub fn open_output(&mut self) -> Result<()> {
        let result = self
            .last_output
            .as_deref()
            .context("no build output yet")
            .and_then(open_folder);
        if let Err(e) = &result {
            self.frontend
                .notify(Notice::Warning, "Not Found", &e.to_string());
        }
        result
    }

    fn show_error(&mut self, error: &Error) {
        let title = match error {
            Error::InterpreterNotFound | Error::InterpreterNotRunnable { .. } => {
                "Python Not Found"
            }
            Error::PackagerDeclined => "PyInstaller Missing",
            Error::PackagerInstallFailed { .. } => "Install Failed",
            Error::ScriptNotSelected => "No Script",
            Error::IconNotFound(_) => "Icon Not Found",
            e if e.is_validation() => "Not Found",
            _ => "Error",
        };
        let message = match error.hint() {
            Some(hint) => format!("{error}\n\n{hint}"),
            None => error.to_string(),
        };
        let notice = if matches!(error, Error::ScriptNotSelected | Error::PackagerDeclined) {
            Notice::Warning
        } else {
            Notice::Error
        };
        self.frontend.notify(notice, title, &message);
    }

    fn report(&mut self, outcome: &BuildOutcome) {
        let ts = chrono::Local::now().format("%H:%M:%S");
        let mut log = |text: String, tag: LogTag| self.frontend.log(&LogLine { text, tag });

        match outcome {
            BuildOutcome::Succeeded {
                artifact,
                dist_dir,
                size,
                sha256,
            } => {
                log(String::new(), LogTag::Output);
                log(format!("[ {ts} ]  Build succeeded"), LogTag::Ok);
                log(format!("  Executable : {}", artifact.display()), LogTag::Ok);
                log(format!("  Size       : {size} bytes"), LogTag::Dim);
                if let Some(sum) = sha256 {
                    log(format!("  SHA-256    : {sum}"), LogTag::Dim);
                }
                let name = file_name(artifact);
                self.last_output = Some(dist_dir.clone());
                self.frontend.set_status(
                    &format!("Done.   {name}  -->  {}", dist_dir.display()),
                    Tone::Ok,
                );
                self.frontend.notify(
                    Notice::Info,
                    "Build Successful",
                    &format!(
                        "'{name}' was created successfully.\n\nLocation:\n{}",
                        artifact.display()
                    ),
                );
            }
            BuildOutcome::ArtifactMissing { expected } => {
                log(String::new(), LogTag::Output);
                log(
                    format!("[ {ts} ]  PyInstaller finished OK but the executable was NOT found."),
                    LogTag::Warn,
                );
                log(format!("  Expected: {}", expected.display()), LogTag::Warn);
                log(String::new(), LogTag::Output);
                log("  Most likely causes:".to_string(), LogTag::Warn);
                log(
                    "  1. Antivirus deleted the executable immediately after creation".to_string(),
                    LogTag::Warn,
                );
                log(
                    "     --> Add your output folder to antivirus exclusions".to_string(),
                    LogTag::Warn,
                );
                log("  2. The output folder was changed mid-build".to_string(), LogTag::Warn);
                log(
                    format!("  3. A previous .spec file conflict (delete {WORK_DIR_NAME})"),
                    LogTag::Warn,
                );
                let name = file_name(expected);
                self.frontend.set_status(
                    "Build finished but the executable was not found.  Antivirus?",
                    Tone::Warn,
                );
                self.frontend.notify(
                    Notice::Warning,
                    "Executable Not Found",
                    &format!(
                        "PyInstaller finished without errors but\n'{name}' was not found at:\n{}\n\n\
                         Most likely cause: Antivirus deleted it.\n\n\
                         Fix: Add your output folder to antivirus exclusions,\nthen build again.",
                        expected.display()
                    ),
                );
            }
            BuildOutcome::Failed { exit_code } => {
                log(String::new(), LogTag::Output);
                let code = exit_code.map(|c| format!(" (exit code {c})")).unwrap_or_default();
                log(
                    format!("[ {ts} ]  Build FAILED{code}.  See log above."),
                    LogTag::Err,
                );
                self.frontend.set_status(
                    "Build failed.  See the Build Log for details.",
                    Tone::Danger,
                );
                self.frontend.notify(
                    Notice::Error,
                    "Build Failed",
                    "PyInstaller encountered errors.\n\
                     Read the Build Log carefully; the first error line\n\
                     is usually the root cause.",
                );
            }
            BuildOutcome::Errored { reason } => {
                log(String::new(), LogTag::Output);
                log(format!("[ {ts} ]  Build FAILED: {reason}"), LogTag::Err);
                self.frontend
                    .set_status("Build failed.  See log.", Tone::Danger);
                self.frontend.notify(
                    Notice::Error,
                    "Build Failed",
                    &format!("The build could not run.\n\n{reason}"),
                );
            }
            BuildOutcome::Cancelled => {
                self.frontend.set_status("Build cancelled.", Tone::Warn);
            }
            BuildOutcome::TimedOut { after_secs } => {
                self.frontend.set_status(
                    &format!("Build killed after {after_secs} seconds."),
                    Tone::Danger,
                );
                self.frontend.notify(
                    Notice::Error,
                    "Build Timed Out",
                    "PyInstaller did not finish in time and was stopped.\n\
                     Raise or remove the time limit and build again.",
                );
            }
        }
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::BuildConfigBuilder;
    use tokio::sync::oneshot;

    #[derive(Default)]
    struct Recorder {
        lines: Vec<LogLine>,
        ready: Vec<bool>,
        notices: Vec<(Notice, String)>,
        answer: bool,
        asked: usize,
    }

    impl Frontend for Recorder {
        fn log(&mut self, line: &LogLine) {
            self.lines.push(line.clone());
        }

        fn set_status(&mut self, _text: &str, _tone: Tone) {}

        fn set_build_ready(&mut self, ready: bool) {
            self.ready.push(ready);
        }

        fn confirm(&mut self, _title: &str, _message: &str) -> bool {
            self.asked += 1;
            self.answer
        }

        fn notify(&mut self, notice: Notice, title: &str, _message: &str) {
            self.notices.push((notice, title.to_string()));
        }
    }

    fn session() -> Session<Recorder> {
        Session::new(Recorder::default(), Environment::new(None))
    }

    #[tokio::test]
    async fn second_request_while_running_is_rejected() {
        let mut session = session();
        let (release, released) = oneshot::channel::<()>();
        session.launch(move |sink| async move {
            sink.line("working", LogTag::Output);
            let _ = released.await;
            BuildOutcome::Failed { exit_code: Some(1) }
        });
        assert_eq!(session.state(), SessionState::Running);

        let config = BuildConfigBuilder::new().script("app.py").build();
        assert!(matches!(session.start_build(config).await, Err(Error::Busy)));
        assert_eq!(session.frontend().notices[0].1, "Busy");

        release.send(()).unwrap();
        let outcome = session.wait_for_outcome().await.unwrap();
        assert_eq!(outcome, BuildOutcome::Failed { exit_code: Some(1) });
        assert_eq!(session.frontend().ready, vec![false, true]);
        assert_eq!(session.frontend().lines[0].text, "working");
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn worker_panic_still_restores_ready_once() {
        let mut session = session();
        session.launch(|_sink| async move {
            if true {
                panic!("boom");
            }
            BuildOutcome::Cancelled
        });
        let outcome = session.wait_for_outcome().await.unwrap();
        assert!(matches!(outcome, BuildOutcome::Errored { .. }));
        assert_eq!(session.frontend().ready, vec![false, true]);
        assert!(session.wait_for_outcome().await.is_none());
    }

    #[tokio::test]
    async fn missing_artifact_is_reported_as_warning() {
        let mut session = session();
        session.launch(|_sink| async move {
            BuildOutcome::ArtifactMissing {
                expected: PathBuf::from("/proj/dist/app"),
            }
        });
        session.wait_for_outcome().await.unwrap();
        assert_eq!(
            session.frontend().notices,
            vec![(Notice::Warning, "Executable Not Found".to_string())]
        );
        assert!(session.last_output().is_none());
    }

    #[tokio::test]
    async fn missing_interpreter_blocks_the_build() {
        let mut session = session();
        let config = BuildConfigBuilder::new().script("app.py").build();
        let err = session.start_build(config).await.unwrap_err();
        assert!(matches!(err, Error::InterpreterNotFound));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.frontend().ready.is_empty());
        assert_eq!(
            session.frontend().notices,
            vec![(Notice::Error, "Python Not Found".to_string())]
        );
    }

    #[tokio::test]
    async fn invalid_script_is_rejected_before_packager_check() {
        let interpreter = Interpreter::new(PathBuf::from("/nonexistent/python3"), None);
        let mut session = Session::new(Recorder::default(), Environment::new(Some(interpreter)));
        let config = BuildConfigBuilder::new().build();
        let err = session.start_build(config).await.unwrap_err();
        assert!(matches!(err, Error::ScriptNotSelected));
        assert_eq!(session.frontend().asked, 0);
        assert_eq!(
            session.frontend().notices,
            vec![(Notice::Warning, "No Script".to_string())]
        );
    }

    #[tokio::test]
    async fn stray_result_while_idle_is_ignored() {
        let mut session = session();
        let outcome = session.handle_event(WorkerEvent::Finished(BuildOutcome::Cancelled));
        assert!(outcome.is_none());
        assert!(session.frontend().ready.is_empty());
    }
}
