use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::catalog::CardSource;

pub const DEFAULT_CARDS: &str = "./static/cards-config.json";
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";
const APP_DIR: &str = "catalog-portal";

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub cards: CardSource,
    pub api_base: String,
    /// Recent projects and TUI logs live here
    pub data_dir: PathBuf,
}

impl PortalConfig {
    /// Build from command-line values; `data_dir` falls back to the platform data directory
    pub fn new(cards: &str, api_base: &str, data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };

        Ok(Self {
            cards: CardSource::parse(cards),
            api_base: api_base.trim().trim_end_matches('/').to_string(),
            data_dir,
        })
    }
}

/// `<platform data dir>/catalog-portal` (e.g. `~/.local/share/catalog-portal`)
pub fn default_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Could not determine the platform data directory")?;
    Ok(base.join(APP_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_values() {
        let config = PortalConfig::new(
            "https://portal.local/static/cards-config.json",
            "http://api.local/api/",
            Some(PathBuf::from("/tmp/portal")),
        )
        .unwrap();

        assert_eq!(
            config.cards,
            CardSource::Http("https://portal.local/static/cards-config.json".to_string())
        );
        assert_eq!(config.api_base, "http://api.local/api");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/portal"));
    }

    #[test]
    fn test_defaults() {
        let config = PortalConfig::new(DEFAULT_CARDS, DEFAULT_API_BASE, Some(PathBuf::from("d"))).unwrap();
        assert_eq!(config.cards, CardSource::File(PathBuf::from(DEFAULT_CARDS)));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_default_data_dir_ends_with_app_dir() {
        if let Ok(dir) = default_data_dir() {
            assert!(dir.ends_with(APP_DIR));
        }
    }
}
