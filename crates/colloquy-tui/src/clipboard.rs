//! System clipboard access.

/// Copy text to the system clipboard.
///
/// A fresh clipboard handle per copy keeps this dependency-free of app
/// state; failures (headless session, missing display server) are returned
/// for the status bar to show, never propagated as fatal.
pub fn copy_text(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())
}
