//! Set-user-ID fix-up for the privileged helper tool.
//!
//! The package payload is copied without the SUID bit, so the helper tool
//! needs it added back after installation. Directories are handled
//! recursively; symbolic links below the root are neither followed nor
//! modified.

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use nix::sys::stat::Mode;
use walkdir::WalkDir;

use super::HookError;

const ACTION: &str = "set SUID bit on";

/// Raw `S_ISUID` as used by `std::fs::Permissions`
fn suid_bit() -> u32 {
    u32::from(Mode::S_ISUID.bits())
}

/// Add the SUID bit to `path`, and to everything beneath it when it is a
/// directory.
///
/// Returns how many entries actually changed; entries that already carry the
/// bit are left alone.
pub fn set_suid_bit(path: &Path) -> Result<usize, HookError> {
    println!("Setting SUID bit on: {}", path.display());

    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(HookError::MissingTarget {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(HookError::io(ACTION, path, e)),
    };

    if !metadata.is_dir() {
        return Ok(usize::from(add_suid(path, metadata.permissions())?));
    }

    let mut changed = 0;
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = entry.map_err(|e| {
            let at = e.path().unwrap_or(path).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
            HookError::io(ACTION, &at, source)
        })?;

        if entry.file_type().is_symlink() {
            log::debug!("Skipping symbolic link {}", entry.path().display());
            continue;
        }

        let permissions = entry
            .metadata()
            .map_err(|e| {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("metadata unavailable"));
                HookError::io(ACTION, entry.path(), source)
            })?
            .permissions();
        if add_suid(entry.path(), permissions)? {
            changed += 1;
        }
    }

    log::debug!("SUID bit added to {changed} entries under {}", path.display());
    Ok(changed)
}

fn add_suid(path: &Path, mut permissions: fs::Permissions) -> Result<bool, HookError> {
    let mode = permissions.mode();
    if mode & suid_bit() != 0 {
        return Ok(false);
    }
    permissions.set_mode(mode | suid_bit());
    fs::set_permissions(path, permissions).map_err(|e| HookError::io(ACTION, path, e))?;
    Ok(true)
}
