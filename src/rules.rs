//! udev rules generation
//!
//! Renders the rules that create, mount, unmount and remove a mount point for
//! every `sd[<letter>-z][0-9]` partition, using `systemd-mount` as the mount
//! helper, and writes them to the rules file.

use std::io;
use std::path::{Path, PathBuf};

use crate::step::{replace_file, StepOutcome};

#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("invalid start letter {0:?}, expected a-z")]
    InvalidLetter(char),
    #[error("error writing {path}: {source}")]
    WriteFailed { path: PathBuf, source: io::Error },
}

const RULE_TEMPLATES: [&str; 4] = [
    r#"ACTION=="add", KERNEL=="{kernel}", RUN+="/bin/mkdir -p {mount}""#,
    r#"ACTION=="add", KERNEL=="{kernel}", RUN+="/usr/bin/systemd-mount --no-block --fsck=no /dev/%k {mount}""#,
    r#"ACTION=="remove", KERNEL=="{kernel}", RUN+="/usr/bin/systemd-mount --umount {mount}""#,
    r#"ACTION=="remove", KERNEL=="{kernel}", RUN+="/bin/rmdir {mount}""#,
];

/// Kernel device match for every partition from `/dev/sd<letter>` onwards
pub fn kernel_pattern(start_letter: char) -> String {
    format!("sd[{}-z][0-9]", start_letter)
}

/// Render the rules file contents, one rule per line with a trailing newline
pub fn render_rules(start_letter: char, mount_prefix: &str) -> Result<String, RulesError> {
    if !start_letter.is_ascii_lowercase() {
        return Err(RulesError::InvalidLetter(start_letter));
    }

    let kernel = kernel_pattern(start_letter);
    let mount = format!("{}%k", mount_prefix);

    let mut rendered = String::new();
    for template in RULE_TEMPLATES {
        rendered.push_str(
            &template
                .replace("{kernel}", &kernel)
                .replace("{mount}", &mount),
        );
        rendered.push('\n');
    }

    Ok(rendered)
}

/// Write the rules file, fully replacing any previous content
pub fn write_rules(
    path: &Path,
    start_letter: char,
    mount_prefix: &str,
) -> Result<StepOutcome, RulesError> {
    let rendered = render_rules(start_letter, mount_prefix)?;

    replace_file(path, &rendered).map_err(|source| RulesError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}
