//! Error types for the shell

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Everything that can stop the shell from coming up
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Browser runtime is not available: {0}")]
    RuntimeUnavailable(String),

    #[error("Failed to create window: {0}")]
    Window(String),

    #[error("Failed to create WebView: {0}")]
    WebView(String),

    #[error("Entry page not found: {0}")]
    EntryNotFound(PathBuf),

    #[error("Invalid entry path: {0}")]
    InvalidEntry(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Native feature not enabled. Build with --features native")]
    NativeDisabled,
}

#[cfg(feature = "native")]
impl From<wry::Error> for ShellError {
    fn from(e: wry::Error) -> Self {
        ShellError::WebView(e.to_string())
    }
}

#[cfg(feature = "native")]
impl From<tao::error::OsError> for ShellError {
    fn from(e: tao::error::OsError) -> Self {
        ShellError::Window(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShellError>;
