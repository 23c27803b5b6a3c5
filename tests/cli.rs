//! Command line behaviour of the `pytoexe` binary.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn pytoexe() -> Command {
    let mut cmd = Command::cargo_bin("pytoexe").unwrap();
    cmd.env_remove("PYTOEXE_PYTHON");
    cmd
}

#[test]
fn help_describes_the_tool() {
    pytoexe()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PyInstaller"))
        .stdout(predicate::str::contains("--onedir"));
}

#[test]
fn script_argument_is_required() {
    pytoexe()
        .assert()
        .failure()
        .stderr(predicate::str::contains("SCRIPT"));
}

#[test]
fn zero_timeout_is_invalid() {
    pytoexe()
        .args(["app.py", "--timeout", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid arguments"));
}

#[test]
fn invalid_arguments_still_print_a_json_outcome() {
    let output = pytoexe()
        .args(["app.py", "--timeout", "0", "--json"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["outcome"], "errored");
    assert!(json["reason"].as_str().unwrap().contains("--timeout"));
}

#[cfg(unix)]
mod with_fake_python {
    use super::*;
    use common::{Build, fake_python, write_script};

    #[test]
    fn successful_build_prints_json_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let python = fake_python(dir.path(), Build::Succeeds);
        let script = write_script(dir.path(), "hello.py");

        let output = pytoexe()
            .arg(&script)
            .arg("--python")
            .arg(&python)
            .args(["--yes", "--json", "--quiet"])
            .assert()
            .code(0)
            .get_output()
            .stdout
            .clone();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["outcome"], "succeeded");
        assert_eq!(
            json["dist_dir"].as_str().unwrap(),
            dir.path().join("dist").to_str().unwrap()
        );
        assert!(dir.path().join("dist").join("hello").is_file());
    }

    #[test]
    fn interpreter_can_come_from_the_environment() {
        let dir = tempfile::tempdir().unwrap();
        let python = fake_python(dir.path(), Build::Succeeds);
        let script = write_script(dir.path(), "hello.py");

        pytoexe()
            .env("PYTOEXE_PYTHON", &python)
            .arg(&script)
            .assert()
            .code(0)
            .stdout(predicate::function(|out: &str| {
                out.matches("Python     :").count() == 1
            }))
            .stderr(predicate::str::contains("Build Successful"));
    }

    #[test]
    fn missing_executable_exits_with_two() {
        let dir = tempfile::tempdir().unwrap();
        let python = fake_python(dir.path(), Build::LosesArtifact);
        let script = write_script(dir.path(), "hello.py");

        pytoexe()
            .arg(&script)
            .arg("--python")
            .arg(&python)
            .arg("--json")
            .assert()
            .code(2)
            .stdout(predicate::str::contains("\"artifact-missing\""))
            .stderr(predicate::str::contains("Executable Not Found"));
    }

    #[test]
    fn failed_build_exits_with_one() {
        let dir = tempfile::tempdir().unwrap();
        let python = fake_python(dir.path(), Build::Fails(1));
        let script = write_script(dir.path(), "hello.py");

        pytoexe()
            .arg(&script)
            .arg("--python")
            .arg(&python)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Build Failed"));
    }

    #[test]
    fn timed_out_build_exits_with_124() {
        let dir = tempfile::tempdir().unwrap();
        let python = fake_python(dir.path(), Build::Hangs);
        let script = write_script(dir.path(), "hello.py");

        pytoexe()
            .arg(&script)
            .arg("--python")
            .arg(&python)
            .args(["--timeout", "1"])
            .timeout(std::time::Duration::from_secs(20))
            .assert()
            .code(124);
    }

    #[test]
    fn missing_script_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let python = fake_python(dir.path(), Build::Succeeds);

        pytoexe()
            .arg(dir.path().join("nope.py"))
            .arg("--python")
            .arg(&python)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("script not found"));
        assert!(!dir.path().join("dist").exists());
    }

    #[test]
    fn build_that_never_starts_prints_errored_json() {
        let dir = tempfile::tempdir().unwrap();
        let python = fake_python(dir.path(), Build::Succeeds);

        let output = pytoexe()
            .arg(dir.path().join("nope.py"))
            .arg("--python")
            .arg(&python)
            .arg("--json")
            .assert()
            .code(1)
            .get_output()
            .stdout
            .clone();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["outcome"], "errored");
        assert!(json["reason"].as_str().unwrap().contains("script not found"));
    }

    #[test]
    fn unrunnable_interpreter_prints_errored_json() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "hello.py");

        let output = pytoexe()
            .arg(&script)
            .arg("--python")
            .arg(dir.path().join("gone").join("python3"))
            .args(["--json", "--yes"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Python Not Found"))
            .get_output()
            .stdout
            .clone();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["outcome"], "errored");
        assert!(json["reason"].as_str().unwrap().contains("could not run interpreter"));
    }
}
