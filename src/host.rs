//! Host inspection and process execution
//!
//! Everything the installer reads from or runs on the machine goes through
//! [`Host`], so the whole procedure can be driven against a fake in tests.

use std::io;
use std::process::{Command, ExitStatus};

use crate::reload::ReloadCommand;

/// Distribution name and version as reported by the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsIdentity {
    pub name: Option<String>,
    pub version: Option<String>,
}

pub trait Host {
    /// Effective user id of the running process
    fn effective_uid(&self) -> u32;

    fn os_identity(&self) -> OsIdentity;

    /// Run a command with inherited stdio and wait for it
    fn run(&self, command: &ReloadCommand) -> io::Result<ExitStatus>;
}

/// The machine this process runs on
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl Host for SystemHost {
    fn effective_uid(&self) -> u32 {
        nix::unistd::geteuid().as_raw()
    }

    fn os_identity(&self) -> OsIdentity {
        OsIdentity {
            name: sysinfo::System::name(),
            version: sysinfo::System::os_version(),
        }
    }

    fn run(&self, command: &ReloadCommand) -> io::Result<ExitStatus> {
        Command::new(command.program).args(command.args).status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_host_missing_program() {
        let command = ReloadCommand {
            program: "/nonexistent/udev-automount-test",
            args: &[],
        };
        assert!(SystemHost.run(&command).is_err());
    }
}
