use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{Focus, PickerItem};
use super::layout::{AppLayout, ChatLayout};
use super::timestamps::{format_local_sync, format_updated};
use crate::catalog::summarize;
use crate::chat::{Block as ReplyBlock, ChatSession, ChatState, Inline, TextDirection, detect_direction, format_reply};
use crate::filters::apply::{filter_stats_label, search_stats_label};
use crate::filters::{CardVisibility, SearchState, is_no_match};
use crate::models::{CatalogEntry, Role};
use crate::notification::{Notification, NotificationKind};
use crate::utils::{humanize_identifier, sanitize_inline, strip_ansi_codes};

const BRIGHT: Color = Color::Rgb(250, 250, 250);
const MUTED: Color = Color::Rgb(113, 113, 122);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const DANGER: Color = Color::Rgb(239, 68, 68);
const WARNING: Color = Color::Rgb(245, 158, 11);
const SURFACE: Color = Color::Rgb(24, 24, 27);
const CODE: Color = Color::Rgb(167, 243, 208);

/// Everything a frame needs, borrowed from the app
pub struct RenderState<'a> {
    pub focus: Focus,
    pub search_input: &'a str,
    pub search: &'a SearchState,
    pub suggestions: &'a [String],
    pub cards: CardsView<'a>,
    pub chat: ChatView<'a>,
    pub status: Option<&'a Notification>,
    pub last_sync: Option<DateTime<Local>>,
}

pub struct CardsView<'a> {
    pub loaded: bool,
    /// Full entry set in display order
    pub entries: &'a [CatalogEntry],
    /// Parallel to `entries`
    pub visibility: &'a [CardVisibility],
    /// Position within the visible entries
    pub selected_idx: usize,
    /// URL of the card waiting to be opened
    pub opening_url: Option<&'a str>,
}

pub struct ChatView<'a> {
    pub session: &'a ChatSession,
    pub input: &'a str,
    pub picker: &'a [PickerItem],
    pub picker_idx: usize,
    pub projects_loading: bool,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_search_bar(frame, layout.search_area, state);
    render_cards(frame, layout.cards_area, &state.cards, state.search, state.focus == Focus::Cards);
    render_chat(frame, layout.chat_area, &state.chat, state.focus == Focus::Chat);
    render_status_bar(frame, layout.status_area, state);
}

fn panel(title: String, focused: bool) -> Block<'static> {
    let border = if focused { ACCENT } else { MUTED };
    Block::default().borders(Borders::ALL).border_style(Style::default().fg(border)).title(title)
}

fn render_search_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let focused = state.focus == Focus::Cards;
    let title = format!(" Search · Filter: {} (Ctrl+F) ", state.search.category().label());

    let mut spans = vec![Span::styled("🔍 ", Style::default().fg(MUTED))];
    spans.push(Span::styled(sanitize_inline(state.search_input), Style::default().fg(BRIGHT)));
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(ACCENT)));
    }
    if let Some(hint) = state.search.hint() {
        spans.push(Span::styled(format!("   {}", hint), Style::default().fg(WARNING)));
    }
    if !state.suggestions.is_empty() {
        spans.push(Span::styled(
            format!("   Suggestions: {}", state.suggestions.join(", ")),
            Style::default().fg(MUTED),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(panel(title, focused)), area);
}

/// "Recent: 3 projects" with no query, "3 of 12 projects" while searching
fn cards_title(search: &SearchState, visible: usize, total: usize) -> String {
    if search.query().is_empty() {
        format!(" {} ", filter_stats_label(search.category(), visible))
    } else {
        format!(" {} ", search_stats_label(visible, total))
    }
}

fn render_cards(frame: &mut Frame, area: Rect, view: &CardsView, search: &SearchState, focused: bool) {
    let visible: Vec<(&CatalogEntry, CardVisibility)> = view
        .entries
        .iter()
        .zip(view.visibility.iter().copied())
        .filter(|(_, vis)| vis.visible)
        .collect();
    let title = cards_title(search, visible.len(), view.entries.len());

    if !view.loaded {
        let text = Text::from(Line::styled("Loading projects…", Style::default().fg(MUTED)));
        frame.render_widget(Paragraph::new(text).block(panel(title, focused)), area);
        return;
    }

    if visible.is_empty() {
        render_empty_state(frame, area, title, focused, search, view.entries.is_empty());
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|(entry, vis)| {
            let opening = view.opening_url == Some(entry.url.as_str());
            card_item(entry, *vis, search.query(), opening)
        })
        .collect();

    let selected = view.selected_idx.min(items.len() - 1);
    let list = List::new(items)
        .block(panel(title, focused))
        .highlight_style(Style::default().bg(SURFACE).add_modifier(Modifier::BOLD))
        .highlight_symbol("▌");
    let mut list_state = ListState::default().with_selected(Some(selected));

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_empty_state(
    frame: &mut Frame,
    area: Rect,
    title: String,
    focused: bool,
    search: &SearchState,
    no_cards: bool,
) {
    let muted = Style::default().fg(MUTED);
    let heading = Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD);

    let lines = if is_no_match(search, 0) {
        vec![
            Line::styled("No projects found", heading),
            Line::styled(format!("Nothing matches \"{}\"", sanitize_inline(search.query())), muted),
            Line::from(""),
            Line::styled("Press Esc to clear the search", Style::default().fg(ACCENT)),
        ]
    } else if no_cards {
        vec![Line::styled("No projects configured", heading)]
    } else {
        vec![
            Line::styled("No projects in this category", heading),
            Line::from(""),
            Line::styled("Press Esc to show all projects", Style::default().fg(ACCENT)),
        ]
    };

    let paragraph = Paragraph::new(Text::from(lines)).alignment(Alignment::Center).block(panel(title, focused));
    frame.render_widget(paragraph, area);
}

/// Title spans with the matched prefix of the first word emphasized
fn title_spans(title: &str, query: &str, highlighted: bool) -> Vec<Span<'static>> {
    let base = Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD);
    let query_chars = query.chars().count();

    if highlighted && query_chars > 0 && title.to_lowercase().starts_with(query) {
        let split = title.char_indices().nth(query_chars).map(|(i, _)| i).unwrap_or(title.len());
        let (matched, rest) = title.split_at(split);
        return vec![
            Span::styled(matched.to_string(), base.fg(ACCENT).add_modifier(Modifier::UNDERLINED)),
            Span::styled(rest.to_string(), base),
        ];
    }

    vec![Span::styled(title.to_string(), base)]
}

fn status_color(status: &str) -> Color {
    match status.to_lowercase().as_str() {
        "active" | "healthy" | "ok" => ACCENT,
        "warning" | "degraded" | "stale" => WARNING,
        "error" | "failed" | "inactive" => DANGER,
        _ => MUTED,
    }
}

fn card_item(entry: &CatalogEntry, vis: CardVisibility, query: &str, opening: bool) -> ListItem<'static> {
    let title = sanitize_inline(&entry.title);
    let status = sanitize_inline(&entry.status);

    let mut header = vec![Span::raw(format!("{} ", sanitize_inline(&entry.icon)))];
    header.extend(title_spans(&title, query, vis.highlighted));
    header.push(Span::styled(format!("  [{}]", status), Style::default().fg(status_color(&status))));
    if opening {
        header.push(Span::styled("  ⏳ Opening…", Style::default().fg(WARNING)));
    }

    let description = Line::styled(
        format!("   {}", sanitize_inline(&entry.description)),
        Style::default().fg(BRIGHT),
    );
    let meta = Line::styled(
        format!(
            "   {} · {} · 📊 {} models",
            sanitize_inline(&entry.category),
            format_updated(&sanitize_inline(&entry.last_updated)),
            entry.model_count
        ),
        Style::default().fg(MUTED),
    );

    ListItem::new(vec![Line::from(header), description, meta])
}

fn render_chat(frame: &mut Frame, area: Rect, view: &ChatView, focused: bool) {
    let layout = ChatLayout::new(area);

    render_picker(frame, layout.picker_area, view, focused);
    render_messages(frame, layout.messages_area, view.session, focused);
    render_chat_input(frame, layout.input_area, view, focused);
}

fn render_picker(frame: &mut Frame, area: Rect, view: &ChatView, focused: bool) {
    let title = if view.projects_loading { " Projects (loading…) " } else { " Projects " };

    if view.picker.is_empty() {
        let text = Line::styled("No projects available", Style::default().fg(MUTED));
        frame.render_widget(Paragraph::new(text).block(panel(title.to_string(), focused)), area);
        return;
    }

    let current = view.session.project();
    let items: Vec<ListItem> = view
        .picker
        .iter()
        .map(|item| {
            let marker = if current == Some(item.name.as_str()) {
                "● "
            } else if item.recent {
                "↺ "
            } else {
                "  "
            };
            ListItem::new(format!("{}{}", marker, sanitize_inline(&item.label)))
                .style(Style::default().fg(if item.recent { BRIGHT } else { MUTED }))
        })
        .collect();

    let selected = view.picker_idx.min(items.len() - 1);
    let mut list = List::new(items).block(panel(title.to_string(), focused));
    if focused {
        list = list.highlight_style(Style::default().bg(SURFACE).fg(ACCENT).add_modifier(Modifier::BOLD));
    }
    let mut list_state = ListState::default().with_selected(Some(selected));

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn alignment_for(text: &str) -> Alignment {
    match detect_direction(text) {
        TextDirection::Rtl => Alignment::Right,
        TextDirection::Ltr | TextDirection::Auto => Alignment::Left,
    }
}

fn inline_spans(spans: &[Inline], base: Style) -> Vec<Span<'static>> {
    spans
        .iter()
        .map(|span| match span {
            Inline::Text(text) => Span::styled(text.clone(), base),
            Inline::Code(code) => Span::styled(code.clone(), Style::default().fg(CODE).bg(SURFACE)),
        })
        .collect()
}

/// Display lines for a formatted assistant reply
pub fn reply_lines(blocks: &[ReplyBlock], alignment: Alignment) -> Vec<Line<'static>> {
    let text = Style::default().fg(BRIGHT);
    let mut lines = Vec::new();

    for block in blocks {
        match block {
            ReplyBlock::Paragraph(spans) => {
                lines.push(Line::from(inline_spans(spans, text)).alignment(alignment));
            }
            ReplyBlock::Header(spans) => {
                let style = text.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                lines.push(Line::from(inline_spans(spans, style)).alignment(alignment));
            }
            ReplyBlock::List(items) => {
                for item in items {
                    let mut spans = vec![Span::styled("  • ", Style::default().fg(ACCENT))];
                    spans.extend(inline_spans(item, text));
                    lines.push(Line::from(spans).alignment(alignment));
                }
            }
            ReplyBlock::Code { language, code } => {
                if let Some(language) = language {
                    lines.push(Line::styled(format!("  {}", language), Style::default().fg(MUTED)));
                }
                for code_line in code.lines() {
                    lines.push(Line::from(vec![
                        Span::styled("  │ ", Style::default().fg(MUTED)),
                        Span::styled(code_line.to_string(), Style::default().fg(CODE)),
                    ]));
                }
            }
        }
    }

    lines
}

fn user_lines(content: &str) -> Vec<Line<'static>> {
    let alignment = alignment_for(content);
    let mut lines = vec![Line::styled("You", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)).alignment(alignment)];
    for line in strip_ansi_codes(content).lines() {
        lines.push(Line::styled(line.to_string(), Style::default().fg(BRIGHT)).alignment(alignment));
    }
    lines
}

/// Conversation transcript, pending message and error notice
pub fn message_lines(session: &ChatSession) -> Vec<Line<'static>> {
    let muted = Style::default().fg(MUTED);
    let mut lines = Vec::new();

    if session.history().is_empty() && session.pending().is_none() {
        match session.project() {
            None => lines.push(Line::styled("Select a project to start chatting (↑/↓, Enter)", muted)),
            Some(project) => lines.push(Line::styled(
                format!("Ask a question about {}", humanize_identifier(project)),
                muted,
            )),
        }
    }

    for message in session.history() {
        match message.role {
            Role::User => lines.extend(user_lines(&message.content)),
            Role::Assistant => {
                let alignment = alignment_for(&message.content);
                lines.push(
                    Line::styled("Assistant", Style::default().fg(WARNING).add_modifier(Modifier::BOLD))
                        .alignment(alignment),
                );
                lines.extend(reply_lines(&format_reply(&message.content), alignment));
            }
        }
        lines.push(Line::from(""));
    }

    if let Some(pending) = session.pending() {
        lines.extend(user_lines(pending));
        lines.push(Line::styled("Thinking…", muted.add_modifier(Modifier::ITALIC)));
    }

    if let Some(error) = session.error() {
        lines.push(Line::styled(
            format!("✗ {} (Esc to dismiss)", error.text),
            Style::default().fg(DANGER),
        ));
    }

    lines
}

fn render_messages(frame: &mut Frame, area: Rect, session: &ChatSession, focused: bool) {
    let title = match session.project() {
        Some(project) => format!(" Chat · {} ", humanize_identifier(project)),
        None => " Chat ".to_string(),
    };

    let lines = message_lines(session);
    // Keep the newest lines in view; wrapped lines can still push content below the fold
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(inner_height) as u16;

    let paragraph =
        Paragraph::new(Text::from(lines)).block(panel(title, focused)).wrap(Wrap { trim: false }).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_chat_input(frame: &mut Frame, area: Rect, view: &ChatView, focused: bool) {
    let title = " Message · Enter: send · Ctrl+L: new chat ".to_string();

    let line = match view.session.state() {
        ChatState::Idle => Line::styled("Select a project first", Style::default().fg(MUTED)),
        ChatState::Sending => Line::styled("Sending…", Style::default().fg(WARNING)),
        ChatState::Ready => {
            let mut spans = vec![
                Span::styled("> ", Style::default().fg(ACCENT)),
                Span::styled(sanitize_inline(view.input), Style::default().fg(BRIGHT)),
            ];
            if focused {
                spans.push(Span::styled("▏", Style::default().fg(ACCENT)));
            }
            Line::from(spans).alignment(alignment_for(view.input))
        }
    };

    frame.render_widget(Paragraph::new(line).block(panel(title, focused)), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (status_text, style) = if let Some(notification) = state.status {
        let fg = match notification.kind {
            NotificationKind::Success => ACCENT,
            NotificationKind::Info => BRIGHT,
            NotificationKind::Error => DANGER,
        };
        (format!(" {} ", notification.text), Style::default().fg(fg).bg(SURFACE))
    } else {
        let stats = summarize(state.cards.entries);
        let keys = match state.focus {
            Focus::Cards => "Enter: open | Ctrl+Y: copy URL | Ctrl+S: export",
            Focus::Chat => "↑/↓ + Enter: pick project | Esc: back",
        };
        (
            format!(
                " {} projects · {} models | {} | Tab: switch pane | {} | Ctrl+C: quit ",
                stats.projects,
                stats.models,
                format_local_sync(state.last_sync),
                keys
            ),
            Style::default().fg(BRIGHT).bg(SURFACE),
        )
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
