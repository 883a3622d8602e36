use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

/// Most projects remembered
pub const MAX_RECENT: usize = 10;
/// File name under the data directory
pub const STORAGE_FILE: &str = "recent_projects.json";

/// Recently used chat projects, most recent first, without duplicates.
///
/// Persisted as a JSON array of project names. A missing or unreadable file starts an
/// empty list rather than failing.
#[derive(Debug, Clone, Default)]
pub struct RecentProjects {
    path: Option<PathBuf>,
    items: Vec<String>,
}

impl RecentProjects {
    /// List that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from `<data_dir>/recent_projects.json`
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(STORAGE_FILE);
        let items = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<Vec<String>>(&json) {
                Ok(mut items) => {
                    let mut seen = HashSet::new();
                    items.retain(|item| seen.insert(item.clone()));
                    items.truncate(MAX_RECENT);
                    items
                }
                Err(e) => {
                    warn!("Ignoring corrupt recent projects file {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Self { path: Some(path), items }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Move `name` to the front, drop anything past [`MAX_RECENT`], persist
    pub fn record(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(());
        }

        self.items.retain(|item| item != name);
        self.items.insert(0, name.to_string());
        self.items.truncate(MAX_RECENT);
        self.save()
    }

    /// Write atomically (temp file + rename)
    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create data directory")?;
        }

        let json = serde_json::to_string(&self.items).context("Failed to serialize recent projects")?;
        let temp = path.with_extension("json.tmp");
        fs::write(&temp, json).context("Failed to write recent projects temp file")?;
        fs::rename(&temp, path).context("Failed to rename recent projects temp file")?;
        Ok(())
    }
}
