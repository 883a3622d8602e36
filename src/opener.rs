//! Hand card URLs to the platform's default browser.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Url;
use tracing::{debug, warn};

use crate::catalog::CardSource;

/// Loading state shown on a card before its URL is opened
pub const OPEN_DELAY: Duration = Duration::from_millis(300);

/// Opens a resolved URL (mocked in tests)
pub trait UrlOpener {
    fn open(&self, target: &str) -> Result<()>;
}

/// Opens targets with the `webbrowser` crate
pub struct SystemOpener;

/// Reject targets the browser launcher could misread as options
fn validate_target(target: &str) -> Result<()> {
    if target.trim().is_empty() {
        bail!("Documentation URL not found");
    }
    if target.starts_with('-') {
        bail!("Refusing to open suspicious URL: {}", target);
    }
    if target.chars().any(char::is_control) {
        bail!("Refusing to open URL containing control characters");
    }
    Ok(())
}

impl UrlOpener for SystemOpener {
    fn open(&self, target: &str) -> Result<()> {
        validate_target(target)?;
        webbrowser::open(target).with_context(|| format!("Failed to open {} in the browser", target))?;
        debug!("Opened {}", target);
        Ok(())
    }
}

/// `file://` URL for a local path, made absolute against the working directory
fn file_url(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    match Url::from_file_path(&absolute) {
        Ok(url) => url.to_string(),
        Err(()) => {
            warn!("Could not turn {} into a file URL", absolute.display());
            absolute.display().to_string()
        }
    }
}

/// Resolve a card URL against the place the card configuration came from.
///
/// Absolute URLs pass through. Relative ones are joined onto the configuration URL, or onto
/// the configuration file's directory as a `file://` URL for local sources.
pub fn resolve_target(source: &CardSource, url: &str) -> String {
    let url = url.trim();
    if Url::parse(url).is_ok() {
        return url.to_string();
    }

    match source {
        CardSource::Http(base) => match Url::parse(base).and_then(|b| b.join(url)) {
            Ok(joined) => joined.to_string(),
            Err(e) => {
                warn!("Could not resolve {} against {}: {}", url, base, e);
                url.to_string()
            }
        },
        CardSource::File(path) => {
            let base = path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
            file_url(&base.join(url.trim_start_matches('/')))
        }
    }
}
