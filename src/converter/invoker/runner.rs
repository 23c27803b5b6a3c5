//! PyInstaller process execution and output relay.

use super::{BuildOutcome, Classification, LogSink, LogTag, calculate_sha256, classify};
use crate::converter::{
    command::BuildCommand,
    utils::{fs, process},
};
use std::{io, process::Stdio, time::Duration};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio_util::sync::CancellationToken;

/// Limits applied to a running build.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Kill the build after this long
    pub timeout: Option<Duration>,
    /// Cancelled when the user aborts the build
    pub cancel: CancellationToken,
}

enum Interrupted {
    Cancelled,
    TimedOut(Duration),
}

/// Runs one build to completion and classifies it.
///
/// Writes a header to `sink`, creates the output directory, spawns the
/// command with stdout and stderr piped, and relays both streams line by
/// line as they arrive. Never returns an error: every failure becomes a
/// [`BuildOutcome`] and the reason is written to `sink`.
///
/// stdout and stderr are separate pipes read concurrently, not one merged
/// pipe. Lines keep their order within each stream, but a stdout line and a
/// stderr line written close together may reach `sink` in either order.
pub async fn run_build(command: &BuildCommand, sink: &LogSink, options: RunOptions) -> BuildOutcome {
    let ts = chrono::Local::now().format("%H:%M:%S");
    sink.line(format!("[ {ts} ]  Build started"), LogTag::Head);
    sink.line(format!("Python     : {}", command.program.display()), LogTag::Dim);
    sink.line(format!("Script     : {}", command.script.display()), LogTag::Dim);
    sink.line(format!("Output dir : {}", command.dist_dir.display()), LogTag::Dim);
    sink.line("", LogTag::Output);
    sink.line("Command:", LogTag::Command);
    sink.line(format!("  {}", command.display()), LogTag::Command);
    sink.line("", LogTag::Output);

    if let Err(e) = fs::create_dir_all(&command.dist_dir).await {
        sink.line(format!("Cannot create output folder: {e}"), LogTag::Err);
        return BuildOutcome::Errored {
            reason: e.to_string(),
        };
    }

    log::info!("Running {}", command.display());
    let mut child = match process::command(&command.program)
        .args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => return spawn_failed(command, sink, e),
    };

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let result = {
        let streamed = async {
            let (out, err) = tokio::join!(relay_lines(stdout, sink), relay_lines(stderr, sink));
            out.and(err)?;
            child.wait().await
        };
        let deadline = async {
            match options.timeout {
                Some(limit) => {
                    tokio::time::sleep(limit).await;
                    limit
                }
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            status = streamed => Ok(status),
            _ = options.cancel.cancelled() => Err(Interrupted::Cancelled),
            limit = deadline => Err(Interrupted::TimedOut(limit)),
        }
    };

    let status = match result {
        Ok(Ok(status)) => status,
        Ok(Err(e)) => {
            if let Err(kill_err) = child.kill().await {
                log::warn!("Failed to kill PyInstaller: {kill_err}");
            }
            sink.line(format!("Unexpected error: {e}"), LogTag::Err);
            return BuildOutcome::Errored {
                reason: e.to_string(),
            };
        }
        Err(interrupted) => {
            if let Err(e) = child.kill().await {
                log::warn!("Failed to kill PyInstaller: {e}");
            }
            return match interrupted {
                Interrupted::Cancelled => {
                    sink.line("Build cancelled.", LogTag::Warn);
                    BuildOutcome::Cancelled
                }
                Interrupted::TimedOut(limit) => {
                    sink.line(
                        format!("Build timed out after {} seconds.", limit.as_secs()),
                        LogTag::Err,
                    );
                    BuildOutcome::TimedOut {
                        after_secs: limit.as_secs(),
                    }
                }
            };
        }
    };

    log::debug!("PyInstaller exited with {status}");
    let present = fs::is_file(&command.expected_artifact).await;

    match classify(status.success(), present) {
        Classification::Success => {
            let size = tokio::fs::metadata(&command.expected_artifact)
                .await
                .map(|m| m.len())
                .unwrap_or(0);
            let sha256 = match calculate_sha256(&command.expected_artifact).await {
                Ok(sum) => Some(sum),
                Err(e) => {
                    log::warn!("Could not hash artifact: {e}");
                    None
                }
            };
            BuildOutcome::Succeeded {
                artifact: command.expected_artifact.clone(),
                dist_dir: command.dist_dir.clone(),
                size,
                sha256,
            }
        }
        Classification::ArtifactMissing => BuildOutcome::ArtifactMissing {
            expected: command.expected_artifact.clone(),
        },
        Classification::Failure => BuildOutcome::Failed {
            exit_code: status.code(),
        },
    }
}

fn spawn_failed(command: &BuildCommand, sink: &LogSink, e: io::Error) -> BuildOutcome {
    if e.kind() == io::ErrorKind::NotFound {
        sink.line("ERROR: Could not launch:", LogTag::Err);
        sink.line(format!("  {}", command.program.display()), LogTag::Err);
        sink.line("Make sure Python is installed and on PATH.", LogTag::Err);
    } else {
        sink.line(format!("Unexpected error: {e}"), LogTag::Err);
    }
    BuildOutcome::Errored {
        reason: format!("could not launch {}: {e}", command.program.display()),
    }
}

/// Forwards each line of `stream` to `sink` as soon as it is read.
///
/// Bytes are decoded lossily; the tool's output is not guaranteed to be UTF-8.
async fn relay_lines<R>(stream: Option<R>, sink: &LogSink) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let Some(stream) = stream else {
        return Ok(());
    };
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        sink.line(line.trim_end_matches(['\r', '\n']), LogTag::Output);
    }
}
