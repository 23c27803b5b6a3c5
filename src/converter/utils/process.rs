//! Subprocess construction.

use std::{ffi::OsStr, path::Path};
use tokio::process::Command;

/// Prevents a console window from flashing up for child processes.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Creates a command that is killed when its handle is dropped and, on
/// Windows, never opens a console window of its own.
pub fn command(program: impl AsRef<OsStr>) -> Command {
    let mut cmd = Command::new(program);
    cmd.kill_on_drop(true);
    #[cfg(windows)]
    cmd.creation_flags(CREATE_NO_WINDOW);
    cmd
}

/// Renders a program and its arguments as one line for display.
///
/// Arguments containing whitespace or quotes are wrapped in double quotes.
pub fn display_command_line<I, S>(program: &Path, args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    std::iter::once(program.as_os_str().to_string_lossy().into_owned())
        .chain(
            args.into_iter()
                .map(|a| a.as_ref().to_string_lossy().into_owned()),
        )
        .map(|arg| quote(&arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote(arg: &str) -> String {
    if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '"') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_with_spaces_are_quoted() {
        let line = display_command_line(
            Path::new("python3"),
            ["-m", "PyInstaller", "/home/me/My Project/app.py"],
        );
        assert_eq!(line, "python3 -m PyInstaller \"/home/me/My Project/app.py\"");
    }
}
