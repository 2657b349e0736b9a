//! systemd and udev reload sequence

use std::fmt;
use std::io::{self, Write};

use crate::host::Host;

/// An external command with a fixed argument list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadCommand {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

impl fmt::Display for ReloadCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Unit reload, udev daemon restart, udev rules reload, in that order
pub const RELOAD_COMMANDS: [ReloadCommand; 3] = [
    ReloadCommand {
        program: "systemctl",
        args: &["daemon-reload"],
    },
    ReloadCommand {
        program: "systemctl",
        args: &["restart", "systemd-udevd"],
    },
    ReloadCommand {
        program: "udevadm",
        args: &["control", "--reload"],
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    Succeeded,
    /// Exit code, `None` when killed by a signal
    Failed(Option<i32>),
    SpawnFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadReport {
    pub command: ReloadCommand,
    pub outcome: ReloadOutcome,
}

impl ReloadReport {
    pub fn success(&self) -> bool {
        self.outcome == ReloadOutcome::Succeeded
    }
}

/// Run every reload command; a failing command is logged and the rest still run
pub fn reload_all<W: Write>(host: &dyn Host, output: &mut W) -> io::Result<Vec<ReloadReport>> {
    let mut reports = Vec::with_capacity(RELOAD_COMMANDS.len());

    for command in RELOAD_COMMANDS {
        writeln!(output, "Exec '{}'", command)?;
        output.flush()?;

        let outcome = match host.run(&command) {
            Ok(status) if status.success() => ReloadOutcome::Succeeded,
            Ok(status) => {
                log::warn!("'{}' exited with {}", command, status);
                ReloadOutcome::Failed(status.code())
            }
            Err(e) => {
                log::warn!("failed to run '{}': {}", command, e);
                ReloadOutcome::SpawnFailed(e.to_string())
            }
        };

        reports.push(ReloadReport { command, outcome });
    }

    Ok(reports)
}
