use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::models::CatalogEntry;

/// One exported search result
#[derive(Debug, Serialize)]
struct ExportedCard<'a> {
    title: &'a str,
    description: &'a str,
    category: &'a str,
    updated: &'a str,
    url: &'a str,
}

/// Serialize search results as a pretty JSON array
pub fn export_results(entries: &[&CatalogEntry]) -> Result<String> {
    let cards: Vec<ExportedCard<'_>> = entries
        .iter()
        .map(|e| ExportedCard {
            title: &e.title,
            description: &e.description,
            category: &e.category,
            updated: &e.last_updated,
            url: &e.url,
        })
        .collect();

    serde_json::to_string_pretty(&cards).context("Failed to serialize search results")
}

/// "dbt-search-results-2025-01-31.json"
pub fn default_export_filename(date: NaiveDate) -> String {
    format!("dbt-search-results-{}.json", date.format("%Y-%m-%d"))
}
