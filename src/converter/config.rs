//! Timeouts, tool names and other fixed settings.

use std::time::Duration;

/// Timeout for a single `<python> --version` probe (5 seconds)
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for the `import PyInstaller` check (15 seconds)
pub const IMPORT_CHECK_TIMEOUT: Duration = Duration::from_secs(15);

/// Timeout for `pip install pyinstaller` (2 minutes)
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(120);

/// Marker a probe's `--version` output must contain
pub const VERSION_MARKER: &str = "Python 3";

/// Python module name of the packaging tool
pub const PACKAGER_MODULE: &str = "PyInstaller";

/// pip distribution name of the packaging tool
pub const PACKAGER_DISTRIBUTION: &str = "pyinstaller";

/// Work/spec directory created next to the script
pub const WORK_DIR_NAME: &str = "__pybuild_tmp__";

/// Default output directory name, relative to the script
pub const DIST_DIR_NAME: &str = "dist";

/// Environment variable naming the interpreter to use
pub const PYTHON_ENV_VAR: &str = "PYTOEXE_PYTHON";

/// Separator between source and destination in `--add-data`
#[cfg(windows)]
pub const ADD_DATA_SEPARATOR: &str = ";";

/// Separator between source and destination in `--add-data`
#[cfg(not(windows))]
pub const ADD_DATA_SEPARATOR: &str = ":";

/// Executable names probed on `PATH`, in order
#[cfg(windows)]
pub const INTERPRETER_NAMES: &[&str] = &["python", "python3", "py"];

/// Executable names probed on `PATH`, in order
#[cfg(not(windows))]
pub const INTERPRETER_NAMES: &[&str] = &["python3", "python"];
