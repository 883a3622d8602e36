//! TUI application state and event handling.
//!
//! `App` is the single composition root of the interactive portal. It owns:
//!
//! - **Card store**: the catalog entries plus change polling (every 30s and on focus gain)
//! - **Search state**: debounced query input and the category facet
//! - **Chat session**: project selection, conversation history, in-flight request
//! - **Recent projects**: persisted most-recently-used project list
//! - **Status messages**: transient feedback for opening, copying and exporting
//!
//! # Architecture
//!
//! Everything runs on the UI thread. Network work (card polling, project listing, chat)
//! runs on short-lived worker threads that post a [`BackgroundEvent`] back over a channel;
//! `tick` drains the channel and fires timers (debounce, open delay, poll interval,
//! notification expiry) once per loop iteration. Timers take `now` as a parameter so tests
//! can drive them without sleeping.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::{debug, error, info, warn};

use super::events::{Action, poll_event};
use super::rendering::{CardsView, ChatView, RenderState, render_ui};
use crate::catalog::{CardSource, CardStore, spawn_refresh};
use crate::chat::{ApiError, ChatSession, PortalApi, RecentProjects, spawn_chat, spawn_project_listing};
use crate::clipboard::{ClipboardProvider, copy_url};
use crate::filters::export::{default_export_filename, export_results};
use crate::filters::matcher::MAX_QUERY_LEN;
use crate::filters::suggestions::suggestions;
use crate::filters::{CardVisibility, CategoryFilter, Debouncer, SEARCH_DEBOUNCE, SearchState, available_filters, evaluate};
use crate::models::{CatalogEntry, ProjectSummary};
use crate::notification::{Notification, NotificationSlot};
use crate::opener::{OPEN_DELAY, UrlOpener, resolve_target};
use crate::parsers::ParsedCards;
use crate::utils::humanize_identifier;

/// Minimum interval between redraws when nothing changed (terminal resize handling)
const IDLE_REDRAW: Duration = Duration::from_millis(100);
const PAGE_SIZE: isize = 10;

/// Results posted by worker threads
pub enum BackgroundEvent {
    Cards(Result<ParsedCards>),
    Projects(Result<Vec<ProjectSummary>, ApiError>),
    Chat(Result<String, ApiError>),
}

/// Pane receiving keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Cards,
    Chat,
}

/// One row of the chat project picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    pub name: String,
    pub label: String,
    pub recent: bool,
}

/// Recent projects first (most recent on top), then the remaining API projects
pub fn build_picker(recent: &[String], projects: &[ProjectSummary]) -> Vec<PickerItem> {
    let mut items: Vec<PickerItem> = recent
        .iter()
        .map(|name| PickerItem { name: name.clone(), label: humanize_identifier(name), recent: true })
        .collect();

    for project in projects {
        if !recent.contains(&project.name) {
            items.push(PickerItem { name: project.name.clone(), label: project.label(), recent: false });
        }
    }

    items
}

/// Card waiting out the open delay
struct PendingOpen {
    url: String,
    target: String,
    title: String,
    due: Instant,
}

pub struct App {
    source: CardSource,
    store: CardStore,
    cards_loaded: bool,
    refresh_in_flight: bool,
    visibility: Vec<CardVisibility>,
    /// Indices into the store's entries that are currently visible
    visible: Vec<usize>,
    search: SearchState,
    search_input: String,
    debouncer: Debouncer<String>,
    suggestions: Vec<String>,
    selected_idx: usize,
    pending_open: Option<PendingOpen>,
    focus: Focus,
    chat: ChatSession,
    chat_input: String,
    projects: Vec<ProjectSummary>,
    projects_loading: bool,
    picker: Vec<PickerItem>,
    picker_idx: usize,
    recent: RecentProjects,
    status: NotificationSlot,
    export_dir: PathBuf,
    api: Arc<dyn PortalApi>,
    opener: Box<dyn UrlOpener>,
    clipboard: Box<dyn ClipboardProvider>,
    events_tx: Sender<BackgroundEvent>,
    events_rx: Receiver<BackgroundEvent>,
    should_quit: bool,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(
        source: CardSource,
        api: Arc<dyn PortalApi>,
        recent: RecentProjects,
        opener: Box<dyn UrlOpener>,
        clipboard: Box<dyn ClipboardProvider>,
    ) -> Self {
        let now = Instant::now();
        let (events_tx, events_rx) = mpsc::channel();
        let picker = build_picker(recent.items(), &[]);

        Self {
            source,
            store: CardStore::empty(now),
            cards_loaded: false,
            refresh_in_flight: false,
            visibility: Vec::new(),
            visible: Vec::new(),
            search: SearchState::new(),
            search_input: String::new(),
            debouncer: Debouncer::new(SEARCH_DEBOUNCE),
            suggestions: Vec::new(),
            selected_idx: 0,
            pending_open: None,
            focus: Focus::Cards,
            chat: ChatSession::new(),
            chat_input: String::new(),
            projects: Vec::new(),
            projects_loading: false,
            picker,
            picker_idx: 0,
            recent,
            status: NotificationSlot::default(),
            export_dir: PathBuf::from("."),
            api,
            opener,
            clipboard,
            events_tx,
            events_rx,
            should_quit: false,
            needs_redraw: true,
            last_draw_time: now,
        }
    }

    /// Directory Ctrl+S writes export files into (default: working directory)
    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = dir;
        self
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.request_projects();

        while !self.should_quit {
            let now = Instant::now();
            if self.tick(now) {
                self.needs_redraw = true;
            }

            if self.needs_redraw || now.duration_since(self.last_draw_time) >= IDLE_REDRAW {
                terminal.draw(|f| render_ui(f, &self.render_state()))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(IDLE_REDRAW)?;
            self.handle_action(action, Instant::now());
        }

        Ok(())
    }

    fn render_state(&self) -> RenderState<'_> {
        RenderState {
            focus: self.focus,
            search_input: &self.search_input,
            search: &self.search,
            suggestions: &self.suggestions,
            cards: CardsView {
                loaded: self.cards_loaded,
                entries: self.store.entries(),
                visibility: &self.visibility,
                selected_idx: self.selected_idx,
                opening_url: self.pending_open.as_ref().map(|p| p.url.as_str()),
            },
            chat: ChatView {
                session: &self.chat,
                input: &self.chat_input,
                picker: &self.picker,
                picker_idx: self.picker_idx,
                projects_loading: self.projects_loading,
            },
            status: self.status.current(),
            last_sync: self.store.last_sync(),
        }
    }

    /// Drain worker results and fire due timers. Returns true if anything visible changed.
    fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_background(event, now);
            changed = true;
        }

        if let Some(raw) = self.debouncer.fire_if_due(now) {
            self.apply_search(&raw);
            changed = true;
        }

        if self.pending_open.as_ref().is_some_and(|p| now >= p.due) {
            self.finish_open(now);
            changed = true;
        }

        if !self.refresh_in_flight && self.store.poll_due(now) {
            self.start_refresh(now);
        }

        changed |= self.status.expire(now);
        changed |= self.chat.expire_error(now);
        changed
    }

    fn start_refresh(&mut self, now: Instant) {
        self.refresh_in_flight = true;
        self.store.mark_polled(now);

        let tx = self.events_tx.clone();
        spawn_refresh(self.source.clone(), move |result| {
            let _ = tx.send(BackgroundEvent::Cards(result));
        });
    }

    fn request_projects(&mut self) {
        self.projects_loading = true;

        let tx = self.events_tx.clone();
        spawn_project_listing(Arc::clone(&self.api), move |result| {
            let _ = tx.send(BackgroundEvent::Projects(result));
        });
    }

    fn handle_background(&mut self, event: BackgroundEvent, now: Instant) {
        match event {
            BackgroundEvent::Cards(result) => {
                self.refresh_in_flight = false;
                let first_load = !self.cards_loaded;
                self.cards_loaded = true;

                match result {
                    Ok(parsed) => {
                        if self.store.replace_if_changed(parsed.entries) || first_load {
                            self.recompute_visibility();
                        }
                    }
                    Err(e) if first_load => {
                        error!("Failed to load cards from {}: {:#}", self.source, e);
                        self.status.show(Notification::error(format!("✗ Could not load projects: {}", e), now));
                        self.recompute_visibility();
                    }
                    Err(e) => debug!("Card poll failed: {:#}", e),
                }
            }
            BackgroundEvent::Projects(result) => {
                self.projects_loading = false;
                match result {
                    Ok(projects) => {
                        info!("Loaded {} chat projects", projects.len());
                        self.projects = projects;
                        self.rebuild_picker();
                    }
                    Err(e) => {
                        warn!("Failed to load projects: {}", e);
                        self.chat.show_error(e.projects_message(), now);
                    }
                }
            }
            BackgroundEvent::Chat(result) => self.chat.complete(result, now),
        }
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::None => return,
            Action::Quit => self.should_quit = true,
            Action::Escape => self.escape(),
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Cards => Focus::Chat,
                    Focus::Chat => Focus::Cards,
                };
            }
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::PageUp => self.move_selection(-PAGE_SIZE),
            Action::PageDown => self.move_selection(PAGE_SIZE),
            Action::Input(c) => self.input_char(c, now),
            Action::DeleteChar => self.delete_char(now),
            Action::Submit => match self.focus {
                Focus::Cards => self.open_selected(now),
                Focus::Chat => self.submit_chat(),
            },
            Action::CopyToClipboard => self.copy_selected(now),
            Action::CycleCategory => self.cycle_category(),
            Action::Refresh => {
                self.store.notify_visible();
                self.request_projects();
                self.status.show(Notification::info("Refreshing…", now));
            }
            Action::FocusGained => self.store.notify_visible(),
            Action::NewChat => {
                self.chat.reset();
                self.chat_input.clear();
            }
            Action::Export => self.export_visible(now),
            Action::Redraw => {}
        }
        self.needs_redraw = true;
    }

    fn escape(&mut self) {
        match self.focus {
            Focus::Cards => {
                let searching = !self.search_input.is_empty()
                    || self.debouncer.is_pending()
                    || *self.search.category() != CategoryFilter::All;
                if searching {
                    self.clear_search();
                } else if !self.status.dismiss() {
                    self.should_quit = true;
                }
            }
            Focus::Chat => {
                if !self.chat.dismiss_error() && self.chat_input.is_empty() {
                    self.focus = Focus::Cards;
                }
                self.chat_input.clear();
            }
        }
    }

    fn clear_search(&mut self) {
        self.search_input.clear();
        self.debouncer.cancel();
        self.search.clear();
        self.suggestions.clear();
        self.recompute_visibility();
    }

    fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.visible.get(self.selected_idx).and_then(|&i| self.store.entries().get(i))
    }

    fn move_selection(&mut self, delta: isize) {
        let (idx, total) = match self.focus {
            Focus::Cards => (&mut self.selected_idx, self.visible.len()),
            Focus::Chat => (&mut self.picker_idx, self.picker.len()),
        };

        if total == 0 {
            *idx = 0;
            return;
        }
        let new_idx = (*idx as isize + delta).max(0) as usize;
        *idx = new_idx.min(total - 1);
    }

    fn input_char(&mut self, c: char, now: Instant) {
        match self.focus {
            Focus::Cards => {
                if self.search_input.chars().count() < MAX_QUERY_LEN {
                    self.search_input.push(c);
                    self.debouncer.call(self.search_input.clone(), now);
                }
            }
            Focus::Chat => {
                if self.chat.input_enabled() {
                    self.chat_input.push(c);
                }
            }
        }
    }

    fn delete_char(&mut self, now: Instant) {
        match self.focus {
            Focus::Cards => {
                if self.search_input.pop().is_some() {
                    self.debouncer.call(self.search_input.clone(), now);
                }
            }
            Focus::Chat => {
                if self.chat.input_enabled() {
                    self.chat_input.pop();
                }
            }
        }
    }

    fn apply_search(&mut self, raw: &str) {
        self.search.set_query(raw);
        self.suggestions = suggestions(self.store.entries(), self.search.query());
        self.selected_idx = 0;
        self.recompute_visibility();
    }

    fn cycle_category(&mut self) {
        let filters = available_filters(self.store.entries());
        let current = filters.iter().position(|f| f == self.search.category()).unwrap_or(0);
        let next = filters[(current + 1) % filters.len()].clone();

        debug!("Category filter: {}", next);
        self.search.set_category(next);
        self.selected_idx = 0;
        self.recompute_visibility();
    }

    fn recompute_visibility(&mut self) {
        self.visibility = evaluate(self.store.entries(), &self.search);
        self.visible = self
            .visibility
            .iter()
            .enumerate()
            .filter_map(|(i, vis)| vis.visible.then_some(i))
            .collect();
        self.selected_idx = self.selected_idx.min(self.visible.len().saturating_sub(1));
    }

    fn open_selected(&mut self, now: Instant) {
        // Enter applies any query still waiting out the debounce
        if let Some(raw) = self.debouncer.flush() {
            self.apply_search(&raw);
        }

        let Some(entry) = self.selected_entry() else {
            return;
        };

        if entry.url.trim().is_empty() {
            self.status.show(Notification::error("Documentation URL not found", now));
            return;
        }

        self.pending_open = Some(PendingOpen {
            url: entry.url.clone(),
            target: resolve_target(&self.source, &entry.url),
            title: entry.title.clone(),
            due: now + OPEN_DELAY,
        });
    }

    fn finish_open(&mut self, now: Instant) {
        let Some(pending) = self.pending_open.take() else {
            return;
        };

        match self.opener.open(&pending.target) {
            Ok(()) => {
                info!("Opened {} ({})", pending.title, pending.target);
                self.status.show(Notification::success(format!("✓ Opened {}", pending.title), now));
            }
            Err(e) => {
                warn!("Failed to open {}: {:#}", pending.target, e);
                self.status.show(Notification::error(format!("✗ Could not open {}: {}", pending.title, e), now));
            }
        }
    }

    fn copy_selected(&mut self, now: Instant) {
        let Some(entry) = self.selected_entry() else {
            self.status.show(Notification::error("✗ No project selected", now));
            return;
        };
        let target = resolve_target(&self.source, &entry.url);

        match copy_url(&target, self.clipboard.as_mut()) {
            Ok(()) => self.status.show(Notification::success("✓ Copied URL to clipboard", now)),
            Err(e) => self.status.show(Notification::error(format!("✗ Clipboard error: {}", e), now)),
        }
    }

    fn export_visible(&mut self, now: Instant) {
        let entries: Vec<&CatalogEntry> =
            self.visible.iter().filter_map(|&i| self.store.entries().get(i)).collect();
        let path = self.export_dir.join(default_export_filename(Local::now().date_naive()));

        let result = export_results(&entries).and_then(|json| {
            fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))
        });

        match result {
            Ok(()) => {
                info!("Exported {} projects to {}", entries.len(), path.display());
                self.status.show(Notification::success(
                    format!("✓ Exported {} projects to {}", entries.len(), path.display()),
                    now,
                ));
            }
            Err(e) => {
                warn!("Export failed: {:#}", e);
                self.status.show(Notification::error(format!("✗ Export failed: {}", e), now));
            }
        }
    }

    fn rebuild_picker(&mut self) {
        self.picker = build_picker(self.recent.items(), &self.projects);
        self.picker_idx = self.picker_idx.min(self.picker.len().saturating_sub(1));
    }

    /// Enter in the chat pane: send the typed message, or pick the highlighted project
    fn submit_chat(&mut self) {
        if self.chat_input.trim().is_empty() {
            self.select_highlighted_project();
            return;
        }

        let Some(request) = self.chat.submit(&self.chat_input) else {
            return;
        };
        self.chat_input.clear();

        let tx = self.events_tx.clone();
        spawn_chat(Arc::clone(&self.api), request, move |result| {
            let _ = tx.send(BackgroundEvent::Chat(result));
        });
    }

    fn select_highlighted_project(&mut self) {
        let Some(item) = self.picker.get(self.picker_idx) else {
            return;
        };
        let name = item.name.clone();

        if !self.chat.select_project(&name) {
            return;
        }
        if let Err(e) = self.recent.record(&name) {
            warn!("Failed to save recent projects: {:#}", e);
            self.status.show(Notification::error(format!("✗ Could not save recent projects: {}", e), Instant::now()));
        }
        self.rebuild_picker();
        self.picker_idx = 0;
    }
}
