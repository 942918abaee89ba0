//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! The [`CatalogView`] borrows the merged records, so it is rebuilt from
//! [`AppState`] whenever it is needed instead of being stored.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent, Direction, Keymap},
    theme::Theme,
    widgets::{
        catalog_list::{CatalogList, CatalogListState},
        command_bar::{CommandBar, CommandBarState},
        detail::DetailPopup,
        filter_bar::FilterBar,
        help::HelpPopup,
        query_bar::{QueryBar, QueryBarState},
        status_bar::{Header, Status, StatusBar},
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use huaming_core::{
    config::Config, selection::QUICK_SEASONS, CatalogView, Dataset, FilterOptions, KeyValueStore,
    PreferenceStore, Record, RecordDetail, Selection,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};

/// Preference store with the backend picked at startup.
pub type Prefs = PreferenceStore<Box<dyn KeyValueStore>>;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    /// `None` when loading failed; the list is then empty.
    pub dataset: Option<Dataset>,
    pub records: Vec<Record>,
    pub options: FilterOptions,
    pub selection: Selection,
    pub prefs: Prefs,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub list: CatalogListState,
    pub query: QueryBarState,
    pub command_bar: CommandBarState,
    pub show_help: bool,
    /// `Some(..)` while the detail popup is open; the inner `None` is a
    /// lookup miss.
    pub detail: Option<Option<RecordDetail>>,
    pub theme: Theme,
    pub config: Config,
    pub keymap: Keymap,
    /// One-shot message shown in the status row until the next key.
    pub notice: Option<String>,
    pub load_error: Option<String>,
    pub quit: bool,
}

impl AppState {
    pub fn view(&self) -> CatalogView<'_> {
        CatalogView::build(&self.records, &self.selection)
    }

    /// Apply `change` to the selection, keep the cursor in range, and persist.
    pub fn update_selection(&mut self, change: impl FnOnce(&mut Selection)) {
        change(&mut self.selection);
        let rows = self.view().filtered;
        self.list.clamp(rows);
        tracing::debug!(summary = %self.selection.summary(), rows, "selection changed");
        if let Err(err) = self.prefs.save(&self.selection) {
            tracing::warn!(%err, "could not save preferences");
        }
    }

    pub fn reset(&mut self) {
        self.query.clear();
        self.list.reset();
        self.update_selection(Selection::reset);
    }

    pub fn clear_keyword(&mut self) {
        self.query.clear();
        self.update_selection(Selection::clear_keyword);
    }

    fn open_detail(&mut self) {
        let name = self
            .view()
            .row(self.list.cursor)
            .map(|row| row.record.name.clone());
        let detail = match (&self.dataset, name) {
            (Some(dataset), Some(name)) => RecordDetail::lookup(dataset, &name),
            _ => None,
        };
        tracing::debug!(found = detail.is_some(), "detail popup opened");
        self.detail = Some(detail);
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    /// Build the shell from a load result. A failed load still starts the
    /// UI, with the failure shown in the status row.
    pub fn new(
        loaded: huaming_core::Result<Dataset>,
        config: Config,
        theme: Theme,
        prefs: Prefs,
    ) -> Self {
        let (dataset, load_error) = match loaded {
            Ok(dataset) => (Some(dataset), None),
            Err(err) => {
                tracing::error!(%err, "dataset failed to load");
                (None, Some(err.load_failure_text()))
            }
        };
        let records = dataset.as_ref().map(Dataset::records).unwrap_or_default();
        let options = FilterOptions::from_records(&records);

        let mut selection = prefs.load_or_default();
        selection.reconcile(&options);
        tracing::debug!(summary = %selection.summary(), "restored selection");

        let state = AppState {
            dataset,
            records,
            options,
            query: QueryBarState::with_input(&selection.keyword),
            selection,
            prefs,
            focus: Focus::List,
            prev_focus: Focus::List,
            list: CatalogListState::default(),
            command_bar: CommandBarState::default(),
            show_help: false,
            detail: None,
            theme,
            keymap: Keymap::from_config(&config.keybindings),
            config,
            notice: None,
            load_error,
            quit: false,
        };

        App { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw, &self.state.keymap)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other, &self.state.keymap) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        if !matches!(event, AppEvent::Resize(..)) {
            s.notice = None;
        }

        // Popups intercept all events; only close keys pass through.
        if s.show_help {
            if matches!(event, AppEvent::Help | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                s.show_help = false;
            }
            return;
        }
        if s.detail.is_some() {
            if matches!(event, AppEvent::Enter | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("detail popup closed");
                s.detail = None;
            }
            return;
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                AppEvent::Enter => {
                    let input = s.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                            execute_command(s, cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                        }
                        Err(msg) => s.command_bar.error = Some(msg),
                    }
                }
                AppEvent::Quit => s.quit = true,
                other => s.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Help => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            AppEvent::CommandMode => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            AppEvent::Escape | AppEvent::Enter if s.focus == Focus::QueryBar => {
                tracing::debug!("focus: QueryBar -> List");
                s.focus = Focus::List;
            }
            AppEvent::Enter => s.open_detail(),
            AppEvent::Escape => {}

            AppEvent::FocusNext => {
                let next = match s.focus {
                    Focus::List => Focus::QueryBar,
                    Focus::QueryBar | Focus::Command => Focus::List,
                };
                tracing::debug!(from = ?s.focus, to = ?next, "focus cycle");
                s.focus = next;
            }

            AppEvent::QueryFocus => {
                tracing::debug!("focus -> QueryBar");
                s.focus = Focus::QueryBar;
            }

            AppEvent::Toggle(toggle) => s.update_selection(|sel| sel.toggle(toggle)),
            AppEvent::QuickSeason(i) => {
                if let Some(season) = QUICK_SEASONS.get(i) {
                    s.update_selection(|sel| sel.toggle_season(season));
                }
            }
            AppEvent::CycleSort => s.update_selection(Selection::cycle_sort),
            AppEvent::CycleGroup => {
                let next = s.options.next_group(&s.selection.group);
                s.update_selection(|sel| sel.set_group(next));
            }
            AppEvent::CycleTier => {
                let next = s.options.next_tier(&s.selection.tier);
                s.update_selection(|sel| sel.set_tier(next));
            }
            AppEvent::Reset => s.reset(),
            AppEvent::ClearKeyword => s.clear_keyword(),

            // The list scrolls from either pane.
            AppEvent::Nav(Direction::Up | Direction::Down) | AppEvent::PageUp | AppEvent::PageDown => {
                let rows = s.view().filtered;
                s.list.handle(&event, rows);
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => {
                if s.focus == Focus::QueryBar && s.query.handle(&other) {
                    let keyword = s.query.input.clone();
                    s.update_selection(|sel| sel.set_keyword(keyword));
                }
            }
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::QueryBar | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: header | keyword bar | filter bar | list | status row
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let view = state.view();
    let status = view.status_text();
    let theme = &state.theme;

    frame.render_widget(Header::new(view.progress, theme), vert[0]);
    frame.render_widget(
        QueryBar::new(&state.query, state.focus == Focus::QueryBar, &status, theme),
        vert[1],
    );
    frame.render_widget(FilterBar::new(&state.selection, theme), vert[2]);
    frame.render_widget(
        CatalogList::new(&view, &state.list, state.focus == Focus::List, theme)
            .show_image_note(state.config.ui.show_image_note)
            .highlight_symbol(&state.config.ui.list_highlight_symbol),
        vert[3],
    );
    frame.render_widget(
        StatusBar::new(
            Status::pick(
                state.load_error.as_deref(),
                state.notice.as_deref(),
                &view.summary,
            ),
            theme,
        ),
        vert[4],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(theme), area);
    }
    if let Some(detail) = &state.detail {
        frame.render_widget(DetailPopup::new(detail.as_ref(), theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(CommandBar::new(&state.command_bar, theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::QueryBar {
        let qb = QueryBar::new(&state.query, true, &status, theme);
        frame.set_cursor_position(qb.cursor_position(vert[1]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
