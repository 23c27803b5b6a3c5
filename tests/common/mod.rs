//! Shared helpers for integration tests: a fake Python that pretends to be
//! PyInstaller, and a front end that records what the session tells it.

#![allow(dead_code)]

use pytoexe::converter::{Frontend, LogLine, Notice, Tone};
use std::path::{Path, PathBuf};

/// How the fake PyInstaller run behaves.
#[derive(Debug, Clone, Copy)]
pub enum Build {
    /// Writes the executable and exits 0
    Succeeds,
    /// Exits 0 without writing anything
    LosesArtifact,
    /// Writes the executable, then exits with this code
    Fails(i32),
    /// Never finishes
    Hangs,
    /// Passes the PyInstaller import check, then deletes itself
    VanishesAfterCheck,
}

/// Writes an executable shell script that answers like Python 3 and
/// imitates a PyInstaller build.
#[cfg(unix)]
pub fn fake_python(dir: &Path, build: Build) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let finish = match build {
        Build::Succeeds => "touch \"$artifact\"\nexit 0".to_string(),
        Build::LosesArtifact => "exit 0".to_string(),
        Build::Fails(code) => format!("touch \"$artifact\"\necho 'ERROR: boom' >&2\nexit {code}"),
        Build::Hangs | Build::VanishesAfterCheck => "exec sleep 30".to_string(),
    };
    let check = match build {
        Build::VanishesAfterCheck => "rm -f \"$0\"; exit 0",
        _ => "exit 0",
    };
    let script = format!(
        r#"#!/bin/sh
case "$1" in
  --version) echo "Python 3.11.4"; exit 0 ;;
  -c) {check} ;;
esac
dist=""
name=""
onedir=0
while [ $# -gt 0 ]; do
  case "$1" in
    --distpath) dist="$2"; shift ;;
    --name) name="$2"; shift ;;
    --onedir) onedir=1 ;;
  esac
  shift
done
echo "INFO: PyInstaller: 6.3.0"
echo "INFO: Building EXE from EXE-00.toc" >&2
if [ "$onedir" = 1 ]; then
  mkdir -p "$dist/$name"
  artifact="$dist/$name/$name"
else
  artifact="$dist/$name"
fi
{finish}
"#
    );

    let path = dir.join("python3");
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Writes a trivial script to package.
pub fn write_script(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "print('hello')\n").unwrap();
    path
}

/// Front end that keeps everything it was told.
#[derive(Debug, Default)]
pub struct Recorder {
    pub lines: Vec<LogLine>,
    pub statuses: Vec<(String, Tone)>,
    pub ready: Vec<bool>,
    pub notices: Vec<(Notice, String)>,
    pub answer: bool,
}

impl Recorder {
    pub fn log_text(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }
}

impl Frontend for Recorder {
    fn log(&mut self, line: &LogLine) {
        self.lines.push(line.clone());
    }

    fn set_status(&mut self, text: &str, tone: Tone) {
        self.statuses.push((text.to_string(), tone));
    }

    fn set_build_ready(&mut self, ready: bool) {
        self.ready.push(ready);
    }

    fn confirm(&mut self, _title: &str, _message: &str) -> bool {
        self.answer
    }

    fn notify(&mut self, notice: Notice, title: &str, _message: &str) {
        self.notices.push((notice, title.to_string()));
    }
}
