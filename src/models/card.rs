use serde::{Deserialize, Serialize};

use crate::parsers::deserializers::parse_hours;

pub const DEFAULT_CATEGORY: &str = "active";
pub const DEFAULT_LAST_UPDATED: &str = "1h";
pub const DEFAULT_ICON: &str = "📊";

/// Card exactly as it appears in `cards-config.json`.
///
/// Every field is optional so a single sloppy card can be reported and skipped
/// instead of failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_last_updated"
    )]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub models: Option<u32>,
    #[serde(default)]
    pub priority: Option<i64>,
}

/// Reason a card was rejected during validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    #[error("card is missing required field `{0}`")]
    MissingField(&'static str),
}

/// A validated catalog card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub status: String,
    /// Original "Nh" text, kept for display and export
    pub last_updated: String,
    pub last_updated_hours: u32,
    pub model_count: u32,
    pub icon: String,
    pub priority: i64,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, CardError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CardError::MissingField(field)),
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value.filter(|v| !v.trim().is_empty()).unwrap_or_else(|| default.to_string())
}

impl TryFrom<CardConfig> for CatalogEntry {
    type Error = CardError;

    fn try_from(card: CardConfig) -> Result<Self, Self::Error> {
        let title = required(card.title, "title")?;
        let description = required(card.description, "description")?;
        let url = required(card.url, "url")?;
        let status = required(card.status, "status")?;
        let last_updated = or_default(card.last_updated, DEFAULT_LAST_UPDATED);
        let last_updated_hours = parse_hours(&last_updated);

        Ok(Self {
            title,
            description,
            url,
            category: or_default(card.category, DEFAULT_CATEGORY),
            status,
            last_updated,
            last_updated_hours,
            model_count: card.models.unwrap_or(0),
            icon: or_default(card.icon, DEFAULT_ICON),
            priority: card.priority.unwrap_or(0),
        })
    }
}
