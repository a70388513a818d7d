//! webshell - host a local web UI in a native window
//!
//! The page talks to the shell through `window.shell.postMessage`; the shell
//! logs each message and answers with a `pong`.

pub mod bridge;
pub mod config;
pub mod dialog;
pub mod error;
pub mod message;
pub mod paths;
pub mod runtime;
pub mod shell;

pub use config::{ConfigError, ShellConfig};
pub use error::{Result, ShellError};
pub use message::{IncomingMessage, MessageError, OutgoingMessage, Responder};
pub use shell::{run, LaunchPlan};
