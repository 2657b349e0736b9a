//! Shared plumbing for the file writing steps

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Result of an idempotent step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Written,
    /// The target already held the desired state; nothing was touched
    AlreadyApplied,
}

/// Replace `path` with `contents` unless it already holds exactly that.
///
/// The new content goes to a sibling temp file which is synced and renamed
/// over the target. A symlink whose target exists is written through, so the
/// link itself stays in place; a dangling link is replaced by a regular file.
pub(crate) fn replace_file(path: &Path, contents: &str) -> io::Result<StepOutcome> {
    let target = resolve_symlink(path);
    let path = target.as_path();

    match fs::read(path) {
        Ok(current) if current == contents.as_bytes() => return Ok(StepOutcome::AlreadyApplied),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    write_atomic(path, contents)?;
    Ok(StepOutcome::Written)
}

/// Write a synced sibling temp file and rename it over `path`; the temp file
/// never outlives a failure
fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let temp_path = temp_path_for(path);
    let write_temp = || -> io::Result<()> {
        let mut temp_file = File::create(&temp_path)?;
        temp_file.write_all(contents.as_bytes())?;
        temp_file.sync_all()
    };

    if let Err(e) = write_temp().and_then(|()| fs::rename(&temp_path, path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}

fn resolve_symlink(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_file_creates_and_skips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("target.conf");

        assert_eq!(replace_file(&path, "a\n").unwrap(), StepOutcome::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\n");
        assert_eq!(
            replace_file(&path, "a\n").unwrap(),
            StepOutcome::AlreadyApplied
        );

        assert_eq!(replace_file(&path, "b\n").unwrap(), StepOutcome::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "b\n");
        assert!(!dir.path().join("target.conf.tmp").exists());
    }

    #[test]
    fn test_replace_file_writes_through_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let unit = dir.path().join("systemd-udevd.service");
        let link = dir.path().join("linked.service");
        fs::write(&unit, "old\n").unwrap();
        std::os::unix::fs::symlink(&unit, &link).unwrap();

        assert_eq!(replace_file(&link, "new\n").unwrap(), StepOutcome::Written);
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&unit).unwrap(), "new\n");
        assert_eq!(
            replace_file(&link, "new\n").unwrap(),
            StepOutcome::AlreadyApplied
        );
    }

    #[test]
    fn test_write_atomic_cleans_temp_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at the target makes the rename fail
        let path = dir.path().join("target.conf");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        assert!(write_atomic(&path, "a\n").is_err());
        assert!(!dir.path().join("target.conf.tmp").exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn test_replace_file_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("target.conf");
        assert!(replace_file(&path, "a\n").is_err());
    }
}
