use anyhow::{Context, Result};
use arboard::Clipboard;

/// Longest URL accepted for copying
const MAX_URL_LEN: usize = 8 * 1024;

/// Clipboard access (mocked in tests)
pub trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// arboard clipboard, opened on first use so headless sessions only fail when copying
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let clipboard = match &mut self.clipboard {
            Some(clipboard) => clipboard,
            slot => slot.insert(Clipboard::new().context("Failed to initialize clipboard")?),
        };
        clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_url(url: &str) -> Result<&str> {
    let url = url.trim();
    if url.is_empty() {
        anyhow::bail!("Documentation URL not found");
    }
    if url.len() > MAX_URL_LEN {
        anyhow::bail!("URL too long to copy ({} bytes, max {})", url.len(), MAX_URL_LEN);
    }
    Ok(url)
}

/// Copy a card URL through `provider`.
///
/// # Errors
/// Returns error if:
/// - The URL is blank
/// - The URL is longer than 8 KiB
/// - The clipboard is unavailable (headless session) or refuses the write
pub fn copy_url(url: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    let url = validate_url(url)?;
    provider.set_text(url)
}
