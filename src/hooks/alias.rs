//! `/Applications` shim for the real application bundle.

use std::io;
use std::os::unix::fs::symlink;
use std::path::Path;

use super::HookError;
use super::cleanup::{Existing, probe, remove_as};

/// Point `link` at `target`, replacing whatever currently sits at `link`.
///
/// A stale link is unlinked; a stale file or directory is removed
/// recursively. `target` must exist, otherwise nothing is touched.
pub fn replace_alias(target: &Path, link: &Path) -> Result<(), HookError> {
    match target.try_exists() {
        Ok(true) => {}
        Ok(false) => {
            return Err(HookError::MissingTarget {
                path: target.to_path_buf(),
            });
        }
        Err(e) => return Err(HookError::io("inspect", target, e)),
    }

    match probe(link)? {
        Existing::Absent => {}
        Existing::Link => {
            println!("Removing old symbolic link: {}", link.display());
            remove_as(link, Existing::Link)?;
        }
        kind => {
            // Whatever a user left here is deleted with the rest of the tree
            println!("Removing old file: {}", link.display());
            remove_as(link, kind)?;
        }
    }

    println!("Creating symbolic link: {}", link.display());
    symlink(target, link).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            log::warn!("{} reappeared before the link was created", link.display());
        }
        HookError::io("create symbolic link", link, e)
    })?;

    log::debug!("{} -> {}", link.display(), target.display());
    Ok(())
}
