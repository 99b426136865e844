//! Keyboard events forwarded by the host.

use serde::{Deserialize, Serialize};

/// Key that clears an uploaded image.
pub const DELETION_KEY: &str = "Backspace";

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

impl KeyEvent {
    pub fn pressed(key: impl Into<String>) -> Self {
        Self::Pressed(key.into())
    }

    /// Whether this is a press of [`DELETION_KEY`].
    pub fn is_deletion(&self) -> bool {
        matches!(self, Self::Pressed(key) if key.eq_ignore_ascii_case(DELETION_KEY))
    }
}
