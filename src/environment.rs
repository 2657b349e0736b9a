//! Host distribution allow-list
//!
//! A rigid name/version match against one supported target. It does not probe
//! for the systemd and udev paths the installer actually needs.

use std::fmt;
use std::str::FromStr;

use crate::host::{Host, OsIdentity};

#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    #[error("unsupported system {found}, expected {expected}")]
    Unsupported { found: String, expected: OsTarget },
    #[error("invalid OS target: {0:?}")]
    InvalidTarget(String),
}

/// Supported distribution, written `NAME` or `NAME:VERSION`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsTarget {
    pub name: String,
    pub version: Option<String>,
}

impl OsTarget {
    /// Names compare case-insensitively, versions exactly. Unknown values never match.
    pub fn matches(&self, identity: &OsIdentity) -> bool {
        let name_ok = identity
            .name
            .as_deref()
            .map_or(false, |name| name.trim().eq_ignore_ascii_case(&self.name));

        let version_ok = match &self.version {
            None => true,
            Some(expected) => identity
                .version
                .as_deref()
                .map_or(false, |version| version.trim() == expected),
        };

        name_ok && version_ok
    }
}

impl FromStr for OsTarget {
    type Err = EnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, version) = match s.split_once(':') {
            Some((name, version)) => (name.trim(), Some(version.trim())),
            None => (s.trim(), None),
        };

        if name.is_empty() || version.map_or(false, str::is_empty) {
            return Err(EnvironmentError::InvalidTarget(s.to_string()));
        }

        Ok(OsTarget {
            name: name.to_string(),
            version: version.map(str::to_string),
        })
    }
}

impl fmt::Display for OsTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} {}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Fail unless the host reports the required distribution
pub fn check_environment(host: &dyn Host, target: &OsTarget) -> Result<(), EnvironmentError> {
    let identity = host.os_identity();
    log::debug!(
        "host reports {:?} {:?}",
        identity.name.as_deref(),
        identity.version.as_deref()
    );

    if target.matches(&identity) {
        return Ok(());
    }

    let found = format!(
        "{} {}",
        identity.name.as_deref().unwrap_or("unknown"),
        identity.version.as_deref().unwrap_or("unknown")
    );
    Err(EnvironmentError::Unsupported {
        found,
        expected: target.clone(),
    })
}
