//! End-to-end install procedure
//!
//! Root check, optional distribution check, start letter, systemd-udevd
//! override, udev rules and finally the reload sequence. Every writing step
//! checks whether it is already applied, so a run that failed half way can
//! simply be repeated.

use std::io::{BufRead, Write};

use crate::{
    ask_for_letter, check_environment, ensure_mount_flags, ensure_root, reload_all, write_rules,
    Config, Error, Host, ReloadReport, StepOutcome,
};

/// What a completed run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSummary {
    pub start_letter: char,
    pub mount_flags: StepOutcome,
    pub rules: StepOutcome,
    /// Empty when reloading was skipped
    pub reloads: Vec<ReloadReport>,
}

/// Run the whole procedure against `host`, prompting on `input`/`output`
pub fn install<R, W>(
    config: &Config,
    host: &dyn Host,
    input: &mut R,
    output: &mut W,
) -> Result<InstallSummary, Error>
where
    R: BufRead,
    W: Write,
{
    ensure_root(host)?;

    if let Some(target) = &config.required_os {
        check_environment(host, target)?;
    }

    let start_letter = match config.start_letter {
        Some(letter) => letter,
        None => ask_for_letter(input, output, config.default_letter)?,
    };

    let mount_flags = ensure_mount_flags(&config.override_path, config.mount_flags)?;
    report_step(output, &config.override_path, mount_flags)?;

    let rules = write_rules(&config.rules_path, start_letter, &config.mount_prefix)?;
    report_step(output, &config.rules_path, rules)?;

    let reloads = if config.skip_reload {
        log::info!("skipping systemd and udev reload");
        Vec::new()
    } else {
        reload_all(host, output)?
    };

    Ok(InstallSummary {
        start_letter,
        mount_flags,
        rules,
        reloads,
    })
}

fn report_step<W: Write>(
    output: &mut W,
    path: &std::path::Path,
    outcome: StepOutcome,
) -> std::io::Result<()> {
    match outcome {
        StepOutcome::Written => writeln!(output, "Written file {}", path.display()),
        StepOutcome::AlreadyApplied => writeln!(output, "Unchanged file {}", path.display()),
    }
}
