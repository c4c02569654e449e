use std::io;
use thiserror::Error;

pub type HalResult<T> = Result<T, HalError>;
pub type FastbusterResult<T> = Result<T, FastbusterError>;

#[derive(Error, Debug)]
pub enum HalError {
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Command timed out: {program} after {timeout_secs}s")]
    CommandTimeout { program: String, timeout_secs: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum FastbusterError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid settings file {path}: {reason}")]
    Settings { path: String, reason: String },
}
