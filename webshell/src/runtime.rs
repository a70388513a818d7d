//! Browser runtime presence check

use crate::error::{Result, ShellError};

/// Where to get the WebView2 runtime on Windows
pub const RUNTIME_DOWNLOAD_URL: &str = "https://go.microsoft.com/fwlink/?linkid=2124701";

/// Title of the dialog shown when the runtime is missing
pub const RUNTIME_MISSING_TITLE: &str = "Browser runtime required";

/// Version of the installed browser engine
#[cfg(feature = "native")]
pub fn check_runtime() -> Result<String> {
    let version = wry::webview_version().map_err(|e| ShellError::RuntimeUnavailable(e.to_string()))?;
    tracing::info!(%version, "browser runtime found");
    Ok(version)
}

#[cfg(not(feature = "native"))]
pub fn check_runtime() -> Result<String> {
    Err(ShellError::NativeDisabled)
}

/// Body of the dialog shown when the runtime is missing
pub fn missing_runtime_message() -> String {
    format!(
        "The browser runtime is not installed.\n\nDownload: {}",
        RUNTIME_DOWNLOAD_URL
    )
}
