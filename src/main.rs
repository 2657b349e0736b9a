use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use udev_automount::{
    install, Config, Error, MountFlagsStrategy, OsTarget, SystemHost, DEFAULT_MOUNT_PREFIX,
    DEFAULT_OVERRIDE_PATH, DEFAULT_RULES_PATH, FATAL_EXIT_CODE,
};

/// Automount removable disks through udev rules and systemd-mount.
#[derive(Parser, Debug)]
#[command(name = "udev-automount", version, about, long_about = None)]
struct Cli {
    /// First drive letter to automount (skips the prompt)
    #[arg(short, long, value_parser = parse_start_letter)]
    letter: Option<char>,

    #[arg(long, default_value = DEFAULT_RULES_PATH)]
    rules_path: PathBuf,

    /// systemd-udevd override (or unit) receiving the mount propagation settings
    #[arg(long, default_value = DEFAULT_OVERRIDE_PATH)]
    override_path: PathBuf,

    #[arg(long, default_value = DEFAULT_MOUNT_PREFIX)]
    mount_prefix: String,

    /// Append MountFlags=shared if missing instead of rewriting the override
    #[arg(long)]
    append_flags: bool,

    /// Refuse to run unless the host is NAME or NAME:VERSION
    #[arg(long, value_name = "NAME[:VERSION]")]
    require_os: Option<OsTarget>,

    /// Write the files without reloading systemd and udev
    #[arg(long)]
    no_reload: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_start_letter(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_lowercase() => Ok(letter),
        _ => Err(format!("{:?} is not a single letter a-z", value)),
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            start_letter: cli.letter,
            rules_path: cli.rules_path,
            override_path: cli.override_path,
            mount_prefix: cli.mount_prefix,
            mount_flags: if cli.append_flags {
                MountFlagsStrategy::Append
            } else {
                MountFlagsStrategy::Overwrite
            },
            required_os: cli.require_os,
            skip_reload: cli.no_reload,
            ..Default::default()
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::from(cli);

    let stdin = io::stdin();
    match install(&config, &SystemHost, &mut stdin.lock(), &mut io::stdout()) {
        Ok(summary) => {
            let failed = summary.reloads.iter().filter(|r| !r.success()).count();
            if failed > 0 {
                log::warn!("{} reload command(s) failed", failed);
            }
            ExitCode::SUCCESS
        }
        Err(e) => ExitCode::from(report(&e, &mut io::stderr())),
    }
}

/// Print a fatal error as `[!] <message>` and return the exit status
fn report<W: Write>(err: &Error, stderr: &mut W) -> u8 {
    // Nothing left to report to if stderr itself is gone
    let _ = writeln!(stderr, "[!] {}", err);
    FATAL_EXIT_CODE
}

#[cfg(test)]
mod tests {
    use super::*;
    use udev_automount::PrivilegeError;

    #[test]
    fn test_report_not_root() {
        let err = Error::from(PrivilegeError::NotRoot(1000));
        let mut stderr = Vec::new();

        assert_eq!(report(&err, &mut stderr), 255);

        let stderr = String::from_utf8(stderr).unwrap();
        assert!(stderr.starts_with("[!] "));
        assert!(stderr.contains("root"));
        assert!(stderr.ends_with('\n'));
        assert_eq!(stderr.lines().count(), 1);
    }

    #[test]
    fn test_parse_start_letter() {
        assert_eq!(parse_start_letter("c"), Ok('c'));
        assert!(parse_start_letter("C").is_err());
        assert!(parse_start_letter("ab").is_err());
        assert!(parse_start_letter("").is_err());
    }
}
