//! System clipboard access for sharing exported specs.

use anyhow::{Context, Result};

/// Places `text` on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Failed to open clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("Failed to copy to clipboard")?;
    Ok(())
}
