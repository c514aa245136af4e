use std::path::{Path, PathBuf};

use clap::Parser;

use crate::hooks::Step;

/// Arguments as passed by the package installer to its scripts.
///
/// The installer calls every script as
/// `<self-path> <package-path> <install-location> <target-volume> [<startup-disk>]`.
/// `<self-path>` is `argv[0]` and only matters for step inference.
#[derive(Parser, Debug, Clone)]
#[command(name = "pkg-hooks")]
#[command(version, about = "Run OpenCore-Patcher package installer hooks")]
pub struct Args {
    /// Path of the package being installed (unused)
    pub package_path: PathBuf,

    /// Install location chosen in the installer (unused)
    pub install_location: PathBuf,

    /// Root of the volume the payload was installed onto
    pub target_volume: PathBuf,

    /// Startup disk, only passed by some installer versions (unused)
    pub startup_disk: Option<PathBuf>,

    /// Hook to run; inferred from the script name when omitted
    #[arg(long, value_enum)]
    pub step: Option<Step>,

    /// TOML file overriding the well-known payload layout
    #[arg(long)]
    pub layout: Option<PathBuf>,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Pick the hook to run.
    ///
    /// An explicit `--step` wins. The uninstaller package ships its only
    /// script as `preinstall`, so a package named `*-Uninstaller.pkg` selects
    /// `uninstall` whatever the script is called. After that comes the
    /// script's own file name, and `postinstall` otherwise.
    pub fn resolve_step(&self, self_path: Option<&Path>) -> Step {
        if let Some(step) = self.step {
            return step;
        }
        if is_uninstaller_package(&self.package_path) {
            return Step::Uninstall;
        }
        self_path
            .and_then(Step::from_script_name)
            .unwrap_or(Step::Postinstall)
    }
}

fn is_uninstaller_package(package_path: &Path) -> bool {
    package_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.to_ascii_lowercase().ends_with("-uninstaller"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv.iter().copied()).expect("valid arguments")
    }

    #[test]
    fn accepts_installer_positional_contract() {
        let args = parse(&[
            "/tmp/PKInstallSandbox/Scripts/postinstall",
            "/Users/me/Downloads/OpenCore-Patcher.pkg",
            "/",
            "/",
        ]);
        assert_eq!(args.target_volume, PathBuf::from("/"));
        assert!(args.startup_disk.is_none());
        assert!(args.step.is_none());
    }

    #[test]
    fn accepts_optional_startup_disk() {
        let args = parse(&["postinstall", "pkg", "/", "/Volumes/Data", "/"]);
        assert_eq!(args.target_volume, PathBuf::from("/Volumes/Data"));
        assert_eq!(args.startup_disk, Some(PathBuf::from("/")));
    }

    #[test]
    fn rejects_missing_target_volume() {
        assert!(Args::try_parse_from(["postinstall", "pkg", "/"]).is_err());
    }

    #[test]
    fn explicit_step_overrides_script_name() {
        let args = parse(&["postinstall", "pkg", "/", "/", "--step", "uninstall"]);
        assert_eq!(
            args.resolve_step(Some(Path::new("/scripts/postinstall"))),
            Step::Uninstall
        );
    }

    #[test]
    fn uninstaller_package_runs_uninstall_from_preinstall_script() {
        let args = parse(&[
            "/tmp/PKInstallSandbox/Scripts/preinstall",
            "/Users/me/Downloads/OpenCore-Patcher-Uninstaller.pkg",
            "/",
            "/",
        ]);
        assert_eq!(
            args.resolve_step(Some(Path::new("/tmp/PKInstallSandbox/Scripts/preinstall"))),
            Step::Uninstall
        );
    }

    #[test]
    fn regular_package_preinstall_stays_preinstall() {
        let args = parse(&[
            "/tmp/PKInstallSandbox/Scripts/preinstall",
            "/Users/me/Downloads/OpenCore-Patcher.pkg",
            "/",
            "/",
        ]);
        assert_eq!(
            args.resolve_step(Some(Path::new("/tmp/PKInstallSandbox/Scripts/preinstall"))),
            Step::Preinstall
        );
    }

    #[test]
    fn step_inferred_from_script_name() {
        let args = parse(&["preinstall", "pkg", "/", "/"]);
        assert_eq!(
            args.resolve_step(Some(Path::new("/scripts/preinstall"))),
            Step::Preinstall
        );
        assert_eq!(
            args.resolve_step(Some(Path::new("/usr/local/bin/pkg-hooks"))),
            Step::Postinstall
        );
        assert_eq!(args.resolve_step(None), Step::Postinstall);
    }
}
