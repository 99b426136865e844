//! System clipboard access.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Copy text to the system clipboard.
#[cfg(feature = "native")]
pub fn copy_text(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
    log::info!("Copied {} to clipboard", text);
    Ok(())
}

/// Copy text to the system clipboard.
#[cfg(not(feature = "native"))]
pub fn copy_text(_text: &str) -> Result<(), ClipboardError> {
    Err(ClipboardError::Unavailable(
        "native feature not enabled".to_string(),
    ))
}
