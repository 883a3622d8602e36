//! Interactive portal: card browser on the left, project chat on the right
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;
mod timestamps;

use std::sync::Arc;

use anyhow::{Context, Result};
pub use app::{App, BackgroundEvent, Focus, PickerItem, build_picker};
pub use rendering::{message_lines, reply_lines};
use terminal::TerminalManager;
pub use timestamps::{format_sync, format_updated};
use tracing::info;

use crate::chat::{HttpPortalClient, RecentProjects};
use crate::clipboard::SystemClipboard;
use crate::config::PortalConfig;
use crate::opener::SystemOpener;

/// Run the interactive TUI until the user quits
pub fn run_interactive(config: &PortalConfig) -> Result<()> {
    let api = HttpPortalClient::new(config.api_base.clone()).context("Failed to create API client")?;
    let recent = RecentProjects::load(&config.data_dir);
    info!("Starting portal: cards from {}, API at {}", config.cards, config.api_base);

    let mut app = App::new(
        config.cards.clone(),
        Arc::new(api),
        recent,
        Box::new(SystemOpener),
        Box::new(SystemClipboard::new()),
    );

    let mut manager = TerminalManager::new()?;
    let res = app.run(manager.terminal_mut());
    manager.restore()?;

    res
}
