use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Top-level screen split
pub struct AppLayout {
    pub search_area: Rect,
    pub cards_area: Rect,
    pub chat_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// - Search bar: 3 rows (top)
    /// - Cards: 60% width (left)
    /// - Chat: 40% width (right)
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(vertical_chunks[1]);

        Self {
            search_area: vertical_chunks[0],
            cards_area: horizontal_chunks[0],
            chat_area: horizontal_chunks[1],
            status_area: vertical_chunks[2],
        }
    }
}

/// Chat pane split: project picker, conversation, input box
pub struct ChatLayout {
    pub picker_area: Rect,
    pub messages_area: Rect,
    pub input_area: Rect,
}

impl ChatLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(3), Constraint::Length(3)])
            .split(area);

        Self { picker_area: chunks[0], messages_area: chunks[1], input_area: chunks[2] }
    }
}
