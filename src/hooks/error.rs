//! Error taxonomy for installer hooks.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    /// The helper tool or application bundle was not laid down by the installer
    #[error("missing target: {} does not exist", path.display())]
    MissingTarget { path: PathBuf },

    #[error("permission denied while trying to {action} {}", path.display())]
    PermissionDenied {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to {action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid layout file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl HookError {
    /// Classify a filesystem failure
    pub(crate) fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        if source.kind() == io::ErrorKind::PermissionDenied {
            HookError::PermissionDenied {
                action,
                path,
                source,
            }
        } else {
            HookError::Io {
                action,
                path,
                source,
            }
        }
    }
}
