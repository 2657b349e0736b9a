//! Superuser check

use crate::host::Host;

#[derive(Debug, thiserror::Error)]
pub enum PrivilegeError {
    #[error("script shall be executed as root (effective uid {0})")]
    NotRoot(u32),
}

/// Fail unless the effective user is root
pub fn ensure_root(host: &dyn Host) -> Result<(), PrivilegeError> {
    match host.effective_uid() {
        0 => Ok(()),
        uid => Err(PrivilegeError::NotRoot(uid)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::OsIdentity;
    use crate::reload::ReloadCommand;
    use std::io;
    use std::process::ExitStatus;

    struct UidHost(u32);

    impl Host for UidHost {
        fn effective_uid(&self) -> u32 {
            self.0
        }

        fn os_identity(&self) -> OsIdentity {
            OsIdentity::default()
        }

        fn run(&self, _command: &ReloadCommand) -> io::Result<ExitStatus> {
            Err(io::Error::new(io::ErrorKind::Other, "not used"))
        }
    }

    #[test]
    fn test_root_passes() {
        assert!(ensure_root(&UidHost(0)).is_ok());
    }

    #[test]
    fn test_regular_user_rejected() {
        let err = ensure_root(&UidHost(1000)).unwrap_err();
        assert!(matches!(err, PrivilegeError::NotRoot(1000)));
        assert!(err.to_string().contains("root"));
    }
}
