//! # udev_automount
//!
//! udev_automount writes udev rules that mount `/dev/sd[<letter>-z][0-9]`
//! partitions under `/mnt/disk-<name>` as they appear, makes systemd-udevd's
//! mount namespace shared so those mounts are visible system wide, and reloads
//! systemd and udev.
//! # example
//! ```no_run
//! use std::io;
//!
//! use udev_automount::{install, Config, SystemHost};
//!
//! fn main() -> Result<(), udev_automount::Error> {
//!     let stdin = io::stdin();
//!     let summary = install(
//!         &Config::default(),
//!         &SystemHost,
//!         &mut stdin.lock(),
//!         &mut io::stdout(),
//!     )?;
//!     println!("automounting from /dev/sd{}", summary.start_letter);
//!     Ok(())
//! }
//! ```

mod config;
mod environment;
mod error;
mod host;
mod installer;
mod mount_flags;
mod privilege;
mod prompt;
mod reload;
mod rules;
mod step;

pub use config::{
    Config, MountFlagsStrategy, DEFAULT_MOUNT_PREFIX, DEFAULT_OVERRIDE_PATH, DEFAULT_RULES_PATH,
    START_LETTER,
};
pub use environment::{check_environment, EnvironmentError, OsTarget};
pub use error::{Error, FATAL_EXIT_CODE};
pub use host::{Host, OsIdentity, SystemHost};
pub use installer::{install, InstallSummary};
pub use mount_flags::{
    ensure_mount_flags, has_mount_flags, MountFlagsError, MOUNT_FLAGS_DIRECTIVE, OVERRIDE_BLOCK,
};
pub use privilege::{ensure_root, PrivilegeError};
pub use prompt::{ask_for_letter, parse_letter, PromptError};
pub use reload::{reload_all, ReloadCommand, ReloadOutcome, ReloadReport, RELOAD_COMMANDS};
pub use rules::{kernel_pattern, render_rules, write_rules, RulesError};
pub use step::StepOutcome;
