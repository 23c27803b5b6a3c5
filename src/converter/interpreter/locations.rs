//! Conventional Python install locations, as glob patterns.

/// Glob patterns searched when no interpreter is found on `PATH`.
#[cfg(windows)]
pub fn default_patterns() -> Vec<String> {
    let mut patterns = Vec::new();
    for drive in ["C", "D"] {
        patterns.push(format!(r"{drive}:\Python3*\python.exe"));
        patterns.push(format!(r"{drive}:\Program Files\Python3*\python.exe"));
        patterns.push(format!(
            r"{drive}:\Users\*\AppData\Local\Programs\Python\Python3*\python.exe"
        ));
    }
    patterns
}

/// Glob patterns searched when no interpreter is found on `PATH`.
#[cfg(target_os = "macos")]
pub fn default_patterns() -> Vec<String> {
    let mut patterns = vec![
        "/Library/Frameworks/Python.framework/Versions/3*/bin/python3".to_string(),
        "/opt/homebrew/bin/python3*".to_string(),
        "/usr/local/bin/python3*".to_string(),
    ];
    patterns.extend(home_patterns(&["~/.pyenv/versions/3*/bin/python3"]));
    patterns
}

/// Glob patterns searched when no interpreter is found on `PATH`.
#[cfg(all(unix, not(target_os = "macos")))]
pub fn default_patterns() -> Vec<String> {
    let mut patterns = vec![
        "/usr/bin/python3*".to_string(),
        "/usr/local/bin/python3*".to_string(),
    ];
    patterns.extend(home_patterns(&[
        "~/.local/bin/python3*",
        "~/.pyenv/versions/3*/bin/python3",
    ]));
    patterns
}

/// Expands a leading `~` against the home directory; patterns are skipped
/// when there is no home directory.
#[cfg(unix)]
fn home_patterns(patterns: &[&str]) -> Vec<String> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };
    let home = glob::Pattern::escape(&home.to_string_lossy());
    patterns
        .iter()
        .map(|p| p.replacen('~', &home, 1))
        .collect()
}
