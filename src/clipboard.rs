//! Clipboard integration for share links
//!
//! Uses arboard for cross-platform clipboard access. A terminal can't open
//! the WhatsApp chat or an image URL directly, so the UI copies them instead.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to system clipboard
pub fn copy(text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(()); // Nothing to copy
    }

    let mut clipboard = Clipboard::new().context("Clipboard is not available")?;
    clipboard
        .set_text(text.to_string())
        .context("Failed to write to clipboard")?;
    tracing::debug!("Copied {} bytes to clipboard", text.len());
    Ok(())
}

/// Copy and describe the outcome for a toast
pub fn copy_for_toast(label: &str, text: &str) -> std::result::Result<String, String> {
    match copy(text) {
        Ok(()) => Ok(format!("{} copied to clipboard", label)),
        Err(e) => {
            tracing::warn!("Clipboard copy of {} failed: {:#}", label, e);
            Err(format!("Could not copy {}: {}", label.to_lowercase(), text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires clipboard access, may fail in CI
    fn test_copy_roundtrip() {
        let link = crate::data::site::whatsapp_link();
        copy(&link).expect("Copy failed");
        let pasted = Clipboard::new().unwrap().get_text().unwrap();
        assert_eq!(pasted, link);
    }

    #[test]
    fn test_empty_copy() {
        // Should not fail on empty string
        assert!(copy("").is_ok());
    }
}
