//! Clipboard integration for the Copy action
//!
//! Uses arboard for cross-platform clipboard access

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to system clipboard
pub fn copy(text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(()); // Nothing to copy
    }

    let mut clipboard = Clipboard::new().context("Clipboard unavailable")?;
    clipboard
        .set_text(text.to_string())
        .context("Failed to write clipboard")?;
    tracing::debug!("Copied {} chars to clipboard", text.chars().count());
    Ok(())
}

/// Best-effort copy. Failures are logged and otherwise ignored.
pub fn copy_quietly(text: &str) {
    if let Err(e) = copy(text) {
        tracing::warn!("Clipboard copy failed: {:#}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires clipboard access, may fail in CI
    fn test_copy_round_trip() {
        let text = "Xy7$abcd";
        copy(text).expect("Copy failed");

        let mut clipboard = Clipboard::new().expect("Clipboard unavailable");
        assert_eq!(clipboard.get_text().expect("Paste failed"), text);
    }

    #[test]
    fn test_empty_copy() {
        // Should not fail on empty string
        assert!(copy("").is_ok());
    }
}
