//! PyInstaller command-line construction.

use crate::converter::{
    config::{ADD_DATA_SEPARATOR, DIST_DIR_NAME, PACKAGER_MODULE, WORK_DIR_NAME},
    error::{Error, Result},
    settings::{BuildConfig, BundleMode},
    utils::process::display_command_line,
};
use path_absolutize::Absolutize;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// A ready-to-spawn PyInstaller invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    /// Interpreter to launch
    pub program: PathBuf,
    /// Arguments after the program
    pub args: Vec<OsString>,
    /// Executable name (the script's file stem)
    pub name: String,
    /// Absolute script path
    pub script: PathBuf,
    /// Absolute output directory
    pub dist_dir: PathBuf,
    /// Absolute work and spec directory
    pub work_dir: PathBuf,
    /// Where the executable should appear after a successful build
    pub expected_artifact: PathBuf,
}

impl BuildCommand {
    /// One-line rendering of the command for the build log.
    pub fn display(&self) -> String {
        display_command_line(&self.program, &self.args)
    }
}

/// Builds the PyInstaller command for `config`, run through `python`.
///
/// Every path is made absolute against the current directory. Exactly one
/// flag per mode axis is emitted; optional inputs only when set. Inputs are
/// not validated here, see [`BuildConfig::validate`].
///
/// # Errors
///
/// Fails only if a relative path cannot be resolved because the current
/// directory is unavailable.
pub fn build_command(config: &BuildConfig, python: &Path) -> Result<BuildCommand> {
    let script = absolute(config.script())?;
    let script_dir = script
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| script.clone());
    let dist_dir = match config.output_dir() {
        Some(dir) => absolute(dir)?,
        None => script_dir.join(DIST_DIR_NAME),
    };
    let work_dir = script_dir.join(WORK_DIR_NAME);
    let name = script
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut args: Vec<OsString> = vec!["-m".into(), PACKAGER_MODULE.into()];
    args.push("--name".into());
    args.push(name.clone().into());
    args.push(config.bundle_mode().flag().into());
    args.push(config.window_mode().flag().into());

    if let Some(icon) = config.icon() {
        args.push("--icon".into());
        args.push(absolute(icon)?.into_os_string());
    }

    for file in config.extra_files() {
        let src = absolute(file)?;
        let dest = file
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| ".".into());
        let mut spec = src.into_os_string();
        spec.push(ADD_DATA_SEPARATOR);
        spec.push(dest);
        args.push("--add-data".into());
        args.push(spec);
    }

    args.push("--distpath".into());
    args.push(dist_dir.clone().into_os_string());
    args.push("--workpath".into());
    args.push(work_dir.clone().into_os_string());
    args.push("--specpath".into());
    args.push(work_dir.clone().into_os_string());
    args.push("--noconfirm".into());
    args.push(script.clone().into_os_string());

    let expected_artifact = expected_artifact(&dist_dir, &name, config.bundle_mode());

    Ok(BuildCommand {
        program: python.to_path_buf(),
        args,
        name,
        script,
        dist_dir,
        work_dir,
        expected_artifact,
    })
}

/// Path of the executable PyInstaller produces for `name`.
pub fn expected_artifact(dist_dir: &Path, name: &str, mode: BundleMode) -> PathBuf {
    let file = format!("{name}{}", std::env::consts::EXE_SUFFIX);
    match mode {
        BundleMode::OneFile => dist_dir.join(file),
        BundleMode::OneDir => dist_dir.join(name).join(file),
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    path.absolutize()
        .map(|p| p.into_owned())
        .map_err(|e| Error::GenericError(format!("cannot resolve {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{BuildConfigBuilder, WindowMode};

    fn strings(cmd: &BuildCommand) -> Vec<String> {
        cmd.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    fn value_after<'a>(args: &'a [String], flag: &str) -> Vec<&'a str> {
        args.windows(2)
            .filter(|w| w[0] == flag)
            .map(|w| w[1].as_str())
            .collect()
    }

    #[test]
    fn relative_inputs_become_absolute() {
        let config = BuildConfigBuilder::new()
            .script("proj/app.py")
            .icon("proj/app.ico")
            .output_dir("out")
            .extra_file("proj/data/config.json")
            .build();
        let cmd = build_command(&config, Path::new("python3")).unwrap();
        let args = strings(&cmd);

        for flag in ["--icon", "--distpath", "--workpath", "--specpath"] {
            for value in value_after(&args, flag) {
                assert!(Path::new(value).is_absolute(), "{flag} {value}");
            }
        }
        assert!(Path::new(args.last().unwrap()).is_absolute());
        assert!(cmd.script.is_absolute());
        assert!(cmd.dist_dir.is_absolute());
        assert!(cmd.work_dir.ends_with(WORK_DIR_NAME));

        let data = value_after(&args, "--add-data");
        assert_eq!(data.len(), 1);
        let (src, dest) = data[0].rsplit_once(ADD_DATA_SEPARATOR).unwrap();
        assert!(Path::new(src).is_absolute());
        assert_eq!(dest, "config.json");
    }

    #[test]
    fn exactly_one_flag_per_mode_axis() {
        for bundle in [BundleMode::OneFile, BundleMode::OneDir] {
            for window in [WindowMode::Console, WindowMode::Windowed] {
                let config = BuildConfigBuilder::new()
                    .script("app.py")
                    .bundle_mode(bundle)
                    .window_mode(window)
                    .build();
                let args = strings(&build_command(&config, Path::new("python")).unwrap());
                let count = |flags: &[&str]| args.iter().filter(|a| flags.contains(&a.as_str())).count();
                assert_eq!(count(&["--onefile", "--onedir"]), 1);
                assert_eq!(count(&["--console", "--windowed"]), 1);
                assert!(args.contains(&bundle.flag().to_string()));
                assert!(args.contains(&window.flag().to_string()));
            }
        }
    }

    #[test]
    fn optional_inputs_are_omitted_when_unset() {
        let config = BuildConfigBuilder::new().script("app.py").build();
        let args = strings(&build_command(&config, Path::new("python")).unwrap());
        assert!(!args.contains(&"--icon".to_string()));
        assert!(!args.contains(&"--add-data".to_string()));
        assert_eq!(&args[..4], &["-m", "PyInstaller", "--name", "app"]);
        assert_eq!(args.iter().filter(|a| *a == "--noconfirm").count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn default_output_dir_is_dist_next_to_script() {
        let config = BuildConfigBuilder::new().script("/proj/app.py").build();
        let cmd = build_command(&config, Path::new("/usr/bin/python3")).unwrap();
        assert_eq!(cmd.dist_dir, PathBuf::from("/proj/dist"));
        assert_eq!(cmd.expected_artifact, PathBuf::from("/proj/dist/app"));
        assert_eq!(cmd.work_dir, PathBuf::from("/proj/__pybuild_tmp__"));
        assert_eq!(cmd.program, PathBuf::from("/usr/bin/python3"));
    }

    #[cfg(windows)]
    #[test]
    fn default_output_dir_is_dist_next_to_script() {
        let config = BuildConfigBuilder::new().script(r"C:\proj\app.py").build();
        let cmd = build_command(&config, Path::new(r"C:\Python312\python.exe")).unwrap();
        assert_eq!(cmd.dist_dir, PathBuf::from(r"C:\proj\dist"));
        assert_eq!(cmd.expected_artifact, PathBuf::from(r"C:\proj\dist\app.exe"));
    }

    #[test]
    fn onedir_artifact_lives_in_its_own_folder() {
        let dist = Path::new("/out");
        let file = format!("app{}", std::env::consts::EXE_SUFFIX);
        assert_eq!(
            expected_artifact(dist, "app", BundleMode::OneDir),
            dist.join("app").join(&file)
        );
        assert_eq!(expected_artifact(dist, "app", BundleMode::OneFile), dist.join(&file));
    }
}
