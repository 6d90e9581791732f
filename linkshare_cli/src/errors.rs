use std::io;
use thiserror::Error;
use linkshare::config::ConfigError;
use linkshare::remote::ClientError;
use linkshare::storage::StorageError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Password cannot be empty.")]
    EmptyPassword,

    #[error("Invalid remote path: {0}")]
    InvalidPath(String),

    #[error("Share was not created: {0}")]
    ShareFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Local cache error: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to set up server connection: {0}")]
    Client(#[from] ClientError),
}
