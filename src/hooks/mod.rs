//! Installer hooks
//!
//! Each hook is a straight-line sequence of filesystem operations over the
//! resolved payload layout. The first failure aborts the hook and is
//! reported to the installer through a non-zero exit status.

pub mod alias;
pub mod cleanup;
pub mod error;
pub mod permissions;

use std::fmt;
use std::path::Path;

use clap::ValueEnum;

use crate::config::ResolvedLayout;

pub use alias::replace_alias;
pub use cleanup::{Existing, Removed, remove_if_present};
pub use error::HookError;
pub use permissions::set_suid_bit;

/// Which installer script is being run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Step {
    Preinstall,
    Postinstall,
    Uninstall,
}

impl Step {
    /// Infer the step from a script path such as `.../Scripts/postinstall`
    pub fn from_script_name(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;
        <Self as ValueEnum>::from_str(stem, true).ok()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Step::Preinstall => "preinstall",
            Step::Postinstall => "postinstall",
            Step::Uninstall => "uninstall",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run `step` against `layout`
pub fn run(step: Step, layout: &ResolvedLayout) -> Result<(), HookError> {
    println!("Starting {step} script...");
    log::info!("Running {step} hook");
    match step {
        Step::Preinstall => run_preinstall(layout),
        Step::Postinstall => run_postinstall(layout),
        Step::Uninstall => run_uninstall(layout),
    }
}

/// SUID bit on the helper tool, then the shim for the app bundle
pub fn run_postinstall(layout: &ResolvedLayout) -> Result<(), HookError> {
    set_suid_bit(&layout.helper_tool)?;
    replace_alias(&layout.app_bundle, &layout.shim)
}

/// Clear out a previous installation so the payload lands on a clean volume
pub fn run_preinstall(layout: &ResolvedLayout) -> Result<(), HookError> {
    for path in [&layout.shim, &layout.app_bundle, &layout.helper_tool] {
        remove_if_present(path)?;
    }
    Ok(())
}

/// Everything preinstall removes, plus the auto-patch launch agent
pub fn run_uninstall(layout: &ResolvedLayout) -> Result<(), HookError> {
    run_preinstall(layout)?;
    remove_if_present(&layout.launch_agent)?;
    Ok(())
}
