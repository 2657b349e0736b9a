//! systemd-udevd mount propagation override
//!
//! Helpers spawned from udev rules run inside systemd-udevd's mount namespace.
//! The override makes that namespace shared so their mounts reach the host.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::MountFlagsStrategy;
use crate::step::{replace_file, StepOutcome};

#[derive(Debug, thiserror::Error)]
pub enum MountFlagsError {
    #[error("error creating directory {path}: {source}")]
    CreateDirFailed { path: PathBuf, source: io::Error },
    #[error("error reading {path}: {source}")]
    ReadFailed { path: PathBuf, source: io::Error },
    #[error("error writing {path}: {source}")]
    WriteFailed { path: PathBuf, source: io::Error },
}

pub const MOUNT_FLAGS_KEY: &str = "MountFlags=";

pub const MOUNT_FLAGS_DIRECTIVE: &str = "MountFlags=shared";

const SERVICE_SECTION: &str = "[Service]";

/// Full override written by [`MountFlagsStrategy::Overwrite`]
pub const OVERRIDE_BLOCK: &str = "[Service]\nMountFlags=shared\nPrivateMounts=no\n";

/// Make sure the override at `path` configures shared mount propagation
pub fn ensure_mount_flags(
    path: &Path,
    strategy: MountFlagsStrategy,
) -> Result<StepOutcome, MountFlagsError> {
    create_parent_dir(path)?;

    match strategy {
        MountFlagsStrategy::Overwrite => {
            replace_file(path, OVERRIDE_BLOCK).map_err(|source| MountFlagsError::WriteFailed {
                path: path.to_path_buf(),
                source,
            })
        }
        MountFlagsStrategy::Append => append_directive(path),
    }
}

fn append_directive(path: &Path) -> Result<StepOutcome, MountFlagsError> {
    let current = match fs::read_to_string(path) {
        Ok(current) => current,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(MountFlagsError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if has_mount_flags(&current) {
        log::info!("{} already sets {}", path.display(), MOUNT_FLAGS_DIRECTIVE);
        return Ok(StepOutcome::AlreadyApplied);
    }

    let mut addition = String::new();
    if !current.is_empty() && !current.ends_with('\n') {
        addition.push('\n');
    }
    if last_section(&current) != Some(SERVICE_SECTION) {
        addition.push_str(SERVICE_SECTION);
        addition.push('\n');
    }
    addition.push_str(MOUNT_FLAGS_DIRECTIVE);
    addition.push('\n');

    let write = || -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(addition.as_bytes())?;
        file.sync_all()
    };
    write().map_err(|source| MountFlagsError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(StepOutcome::Written)
}

/// True when the effective `MountFlags=` assignment is `shared`.
///
/// systemd applies the last assignment, so an earlier `shared` followed by
/// `slave` does not count.
pub fn has_mount_flags(contents: &str) -> bool {
    contents
        .lines()
        .filter(|line| line.starts_with(MOUNT_FLAGS_KEY))
        .last()
        .map_or(false, |line| line.trim_end() == MOUNT_FLAGS_DIRECTIVE)
}

fn last_section(contents: &str) -> Option<&str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('[') && line.ends_with(']'))
        .last()
}

fn create_parent_dir(path: &Path) -> Result<(), MountFlagsError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|source| MountFlagsError::CreateDirFailed {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
