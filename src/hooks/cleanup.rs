//! Payload removal shared by the alias step, preinstall and uninstall.

use std::fs;
use std::io;
use std::path::Path;

use super::HookError;

/// What currently sits at a path, inspected without following links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existing {
    Absent,
    Link,
    File,
    Directory,
}

/// Outcome of [`remove_if_present`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removed {
    /// Nothing was there
    Nothing,
    /// A symbolic link; its target was left alone
    Link,
    /// A regular file
    File,
    /// A directory, removed with its contents
    Directory,
}

impl From<Existing> for Removed {
    fn from(kind: Existing) -> Self {
        match kind {
            Existing::Absent => Removed::Nothing,
            Existing::Link => Removed::Link,
            Existing::File => Removed::File,
            Existing::Directory => Removed::Directory,
        }
    }
}

/// Inspect `path` without following links
pub(crate) fn probe(path: &Path) -> Result<Existing, HookError> {
    match fs::symlink_metadata(path) {
        Ok(metadata) => {
            let kind = metadata.file_type();
            Ok(if kind.is_symlink() {
                Existing::Link
            } else if kind.is_dir() {
                Existing::Directory
            } else {
                Existing::File
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Existing::Absent),
        Err(e) => Err(HookError::io("inspect", path, e)),
    }
}

/// Remove whatever is at `path` according to `kind`, as reported by [`probe`].
pub(crate) fn remove_as(path: &Path, kind: Existing) -> Result<(), HookError> {
    let result = match kind {
        Existing::Absent => return Ok(()),
        Existing::Link | Existing::File => fs::remove_file(path),
        Existing::Directory => fs::remove_dir_all(path),
    };
    match result {
        Ok(()) => Ok(()),
        // Gone between probe and removal
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(HookError::io("remove", path, e)),
    }
}

/// Remove `path` if present. Links are unlinked, never followed.
pub fn remove_if_present(path: &Path) -> Result<Removed, HookError> {
    let kind = probe(path)?;
    if kind != Existing::Absent {
        println!("Removing: {}", path.display());
        remove_as(path, kind)?;
    } else {
        log::debug!("Nothing to remove at {}", path.display());
    }
    Ok(Removed::from(kind))
}

#[cfg(test)]
mod tests {
    use std::os::unix::fs::symlink;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn absent_path_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            remove_if_present(&dir.path().join("absent")).unwrap(),
            Removed::Nothing
        );
    }

    #[test]
    fn removes_directory_tree() {
        let dir = TempDir::new().unwrap();
        let app = dir.path().join("Old.app");
        fs::create_dir_all(app.join("Contents/MacOS")).unwrap();
        fs::write(app.join("Contents/MacOS/Old"), b"").unwrap();

        assert_eq!(remove_if_present(&app).unwrap(), Removed::Directory);
        assert!(!app.exists());
    }

    #[test]
    fn unlinks_without_touching_target() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("Real.app");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"").unwrap();
        let link = dir.path().join("Shim.app");
        symlink(&target, &link).unwrap();

        assert_eq!(remove_if_present(&link).unwrap(), Removed::Link);
        assert!(fs::symlink_metadata(&link).is_err());
        assert!(target.join("keep").exists());
    }

    #[test]
    fn dangling_link_is_detected() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("Shim.app");
        symlink(dir.path().join("gone"), &link).unwrap();

        assert_eq!(probe(&link).unwrap(), Existing::Link);
        assert_eq!(remove_if_present(&link).unwrap(), Removed::Link);
        assert_eq!(probe(&link).unwrap(), Existing::Absent);
    }
}
