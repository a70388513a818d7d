//! Native message boxes

/// Message dialog level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// Show a blocking message dialog
#[cfg(feature = "native")]
pub fn show(title: &str, message: &str, level: MessageLevel) {
    let msg_level = match level {
        MessageLevel::Info => rfd::MessageLevel::Info,
        MessageLevel::Warning => rfd::MessageLevel::Warning,
        MessageLevel::Error => rfd::MessageLevel::Error,
    };

    rfd::MessageDialog::new()
        .set_title(title)
        .set_description(message)
        .set_level(msg_level)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

// No windowing without the native feature; the log line is all there is
#[cfg(not(feature = "native"))]
pub fn show(title: &str, message: &str, level: MessageLevel) {
    match level {
        MessageLevel::Info => tracing::info!(%title, "{}", message),
        MessageLevel::Warning => tracing::warn!(%title, "{}", message),
        MessageLevel::Error => tracing::error!(%title, "{}", message),
    }
}
