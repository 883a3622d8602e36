use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use super::order::sort_entries;
use crate::models::CatalogEntry;

/// How often the card configuration is re-fetched
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// In-memory card list plus the bookkeeping for change polling.
///
/// Entries are kept in display order. The snapshot is the serialized form of the last
/// accepted card list and decides whether a poll result replaces the current one.
#[derive(Debug)]
pub struct CardStore {
    entries: Vec<CatalogEntry>,
    snapshot: String,
    last_poll: Instant,
    poll_requested: bool,
    last_sync: Option<DateTime<Local>>,
}

fn snapshot_of(entries: &[CatalogEntry]) -> String {
    serde_json::to_string(entries).unwrap_or_else(|e| {
        warn!("Failed to serialize card snapshot: {}", e);
        String::new()
    })
}

impl CardStore {
    pub fn new(entries: Vec<CatalogEntry>, now: Instant) -> Self {
        let snapshot = snapshot_of(&entries);
        let mut entries = entries;
        sort_entries(&mut entries);
        Self { entries, snapshot, last_poll: now, poll_requested: false, last_sync: Some(Local::now()) }
    }

    /// Store with no cards yet; the first poll is due immediately
    pub fn empty(now: Instant) -> Self {
        let mut store = Self::new(Vec::new(), now);
        store.poll_requested = true;
        store.last_sync = None;
        store
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_sync(&self) -> Option<DateTime<Local>> {
        self.last_sync
    }

    /// Accept a freshly loaded card list if it differs from the current snapshot.
    /// Returns true when the entries were replaced.
    pub fn replace_if_changed(&mut self, entries: Vec<CatalogEntry>) -> bool {
        self.last_sync = Some(Local::now());

        let snapshot = snapshot_of(&entries);
        if snapshot == self.snapshot {
            debug!("Card configuration unchanged");
            return false;
        }

        let mut entries = entries;
        sort_entries(&mut entries);
        debug!("Card configuration changed: {} → {} cards", self.entries.len(), entries.len());
        self.entries = entries;
        self.snapshot = snapshot;
        true
    }

    /// Ask for a poll on the next tick (terminal regained focus, manual refresh)
    pub fn notify_visible(&mut self) {
        self.poll_requested = true;
    }

    pub fn poll_due(&self, now: Instant) -> bool {
        self.poll_requested || now.duration_since(self.last_poll) >= POLL_INTERVAL
    }

    pub fn mark_polled(&mut self, now: Instant) {
        self.last_poll = now;
        self.poll_requested = false;
    }
}
