//! CLI error types.

use acw_config::ConfigError;
use acw_content::ContentError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("check failed with {0} error(s)")]
    CheckFailed(usize),

    #[error("{0}")]
    Validation(String),
}
