use crate::{EnvironmentError, MountFlagsError, PrivilegeError, PromptError, RulesError};

/// Process exit status for every fatal error
pub const FATAL_EXIT_CODE: u8 = 255;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Privilege(#[from] PrivilegeError),
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    MountFlags(#[from] MountFlagsError),
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error("IO error writing progress: {0}")]
    Output(#[from] std::io::Error),
}
