//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Parsing itself never fails: malformed log text is handled by policy
//! inside the parser, so there is no parse error type here.

use thiserror::Error;

/// Errors that can occur while loading raw log text
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read log file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Log file is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    #[error("Invalid input path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read file: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
