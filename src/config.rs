//! Configuration for udev_automount
//!
//! Holds the default paths and the start letter shared by the prompt and the
//! rule template.

use std::path::PathBuf;

use crate::environment::OsTarget;

/// First drive letter to automount when the operator accepts the default
pub const START_LETTER: char = 'b';

pub const DEFAULT_RULES_PATH: &str = "/etc/udev/rules.d/99-custom-mount-drives.rules";

pub const DEFAULT_OVERRIDE_PATH: &str =
    "/etc/systemd/system/systemd-udevd.service.d/override.conf";

/// Mount points are created as `<prefix><kernel name>`, e.g. `/mnt/disk-sdb1`
pub const DEFAULT_MOUNT_PREFIX: &str = "/mnt/disk-";

/// How the systemd-udevd override is brought into shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MountFlagsStrategy {
    /// Replace the override with the fixed `[Service]` block
    #[default]
    Overwrite,
    /// Keep the existing file and append `MountFlags=shared` once
    Append,
}

/// Installer configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// When set, the interactive prompt is skipped
    pub start_letter: Option<char>,
    pub default_letter: char,
    pub rules_path: PathBuf,
    pub override_path: PathBuf,
    pub mount_prefix: String,
    pub mount_flags: MountFlagsStrategy,
    /// Host distribution allow-list; `None` disables the check
    pub required_os: Option<OsTarget>,
    pub skip_reload: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_letter: None,
            default_letter: START_LETTER,
            rules_path: PathBuf::from(DEFAULT_RULES_PATH),
            override_path: PathBuf::from(DEFAULT_OVERRIDE_PATH),
            mount_prefix: DEFAULT_MOUNT_PREFIX.to_string(),
            mount_flags: MountFlagsStrategy::Overwrite,
            required_os: None,
            skip_reload: false,
        }
    }
}
