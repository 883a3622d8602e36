use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{CardConfig, CatalogEntry};

/// Outcome of parsing one `cards-config.json` document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCards {
    pub entries: Vec<CatalogEntry>,
    pub skipped: usize,
}

/// Parse a `cards-config.json` document.
///
/// The document must be a JSON array. Each element is validated on its own:
/// cards that fail to deserialize or lack a title, description, url or status
/// are logged and skipped, the rest are returned in document order.
pub fn parse_cards(json: &str) -> Result<ParsedCards> {
    let document: Value =
        serde_json::from_str(json).context("Failed to parse cards configuration JSON")?;

    let Value::Array(items) = document else {
        bail!("Invalid cards configuration: expected a JSON array");
    };

    let mut parsed = ParsedCards::default();

    for (idx, item) in items.into_iter().enumerate() {
        let config = match serde_json::from_value::<CardConfig>(item) {
            Ok(config) => config,
            Err(e) => {
                warn!("Skipping card {}: {}", idx + 1, e);
                parsed.skipped += 1;
                continue;
            }
        };

        match CatalogEntry::try_from(config) {
            Ok(entry) => parsed.entries.push(entry),
            Err(e) => {
                warn!("Skipping card {}: {}", idx + 1, e);
                parsed.skipped += 1;
            }
        }
    }

    debug!("Parsed {} cards ({} skipped)", parsed.entries.len(), parsed.skipped);

    Ok(parsed)
}
