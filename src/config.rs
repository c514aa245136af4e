use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::hooks::HookError;

/// Well-known payload layout (mirrors the paths the package installs to).
///
/// Every path is relative to the target volume. Missing fields in a layout
/// file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Reverse-DNS identifier shared by the helper tool and launch agent
    pub identifier: String,
    /// Vendor directory under `Library/Application Support`
    pub vendor: String,
    /// Application bundle name without the `.app` extension
    pub app_name: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            identifier: "com.dortania.opencore-legacy-patcher".to_string(),
            vendor: "Dortania".to_string(),
            app_name: "OpenCore-Patcher".to_string(),
        }
    }
}

impl Layout {
    /// Load a layout override from a TOML file
    pub fn load(path: &Path) -> Result<Self, HookError> {
        let raw = fs::read_to_string(path).map_err(|e| HookError::Config {
            path: path.to_path_buf(),
            message: format!("failed to read layout file: {e}"),
        })?;
        let layout: Layout = toml::from_str(&raw).map_err(|e| HookError::Config {
            path: path.to_path_buf(),
            message: format!("failed to parse layout file: {e}"),
        })?;
        layout.validate().map_err(|message| HookError::Config {
            path: path.to_path_buf(),
            message,
        })?;
        log::debug!("Loaded layout from {}: {:?}", path.display(), layout);
        Ok(layout)
    }

    /// Load `path` when given, built-in defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, HookError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Each field becomes a single path component, so it must not be able to
    /// escape its parent directory.
    fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("identifier", &self.identifier),
            ("vendor", &self.vendor),
            ("app_name", &self.app_name),
        ] {
            if value.trim().is_empty() {
                return Err(format!("`{field}` must not be empty"));
            }
            if value.contains('/') || value.contains('\0') || value == "." || value == ".." {
                return Err(format!("`{field}` is not a valid path component: {value:?}"));
            }
        }
        Ok(())
    }

    pub fn helper_tool(&self) -> PathBuf {
        PathBuf::from("Library/PrivilegedHelperTools")
            .join(format!("{}.privileged-helper", self.identifier))
    }

    pub fn app_bundle(&self) -> PathBuf {
        PathBuf::from("Library/Application Support")
            .join(&self.vendor)
            .join(format!("{}.app", self.app_name))
    }

    pub fn shim(&self) -> PathBuf {
        PathBuf::from("Applications").join(format!("{}.app", self.app_name))
    }

    pub fn launch_agent(&self) -> PathBuf {
        PathBuf::from("Library/LaunchAgents")
            .join(format!("{}.auto-patch.plist", self.identifier))
    }

    /// Join every well-known path onto `volume`
    pub fn resolve(&self, volume: &Path) -> ResolvedLayout {
        ResolvedLayout {
            helper_tool: volume.join(self.helper_tool()),
            app_bundle: volume.join(self.app_bundle()),
            shim: volume.join(self.shim()),
            launch_agent: volume.join(self.launch_agent()),
        }
    }
}

/// Layout paths anchored at a concrete target volume
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLayout {
    pub helper_tool: PathBuf,
    pub app_bundle: PathBuf,
    pub shim: PathBuf,
    pub launch_agent: PathBuf,
}
