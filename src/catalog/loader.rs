use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::parsers::{ParsedCards, parse_cards};

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Where `cards-config.json` comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardSource {
    File(PathBuf),
    Http(String),
}

impl CardSource {
    /// `http://` and `https://` values are URLs, anything else is a path
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Http(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for CardSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Http(url) => f.write_str(url),
        }
    }
}

/// Fetch the raw document.
///
/// With `bypass_cache`, HTTP requests carry a timestamp query parameter so intermediaries
/// hand back the current file.
pub fn fetch_document(source: &CardSource, bypass_cache: bool) -> Result<String> {
    match source {
        CardSource::File(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read cards configuration: {}", path.display())),
        CardSource::Http(url) => {
            let client = reqwest::blocking::Client::builder()
                .timeout(HTTP_TIMEOUT)
                .build()
                .context("Failed to build HTTP client")?;

            let mut request = client.get(url);
            if bypass_cache {
                let stamp = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_millis())
                    .unwrap_or_default();
                request = request.query(&[("t", stamp.to_string())]);
            }

            let response = request
                .send()
                .with_context(|| format!("Failed to fetch cards configuration from {}", url))?;

            let status = response.status();
            if !status.is_success() {
                bail!("Could not load cards configuration: HTTP {}", status);
            }

            response.text().context("Failed to read cards configuration body")
        }
    }
}

/// Fetch and parse the card configuration
pub fn load_cards(source: &CardSource) -> Result<ParsedCards> {
    let document = fetch_document(source, false)?;
    let parsed = parse_cards(&document)?;
    info!("Loaded {} valid cards from {} ({} skipped)", parsed.entries.len(), source, parsed.skipped);
    Ok(parsed)
}

/// Re-fetch on a worker thread and hand the result to `on_done`.
///
/// Fire-and-forget: there is no handle to cancel the fetch.
pub fn spawn_refresh<F>(source: CardSource, on_done: F)
where
    F: FnOnce(Result<ParsedCards>) + Send + 'static,
{
    thread::spawn(move || {
        debug!("Polling {} for card changes", source);
        let result = fetch_document(&source, true).and_then(|doc| parse_cards(&doc));
        on_done(result);
    });
}
