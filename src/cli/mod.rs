//! Non-interactive command-line front-end.

pub mod commands;
pub mod format;

use thiserror::Error;

use crate::core::services::ServiceError;
use crate::errors::FinanceError;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Finance(#[from] FinanceError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Unknown command: `{0}` (try `help`)")]
    UnknownCommand(String),
}

pub type CliResult<T> = Result<T, CliError>;
