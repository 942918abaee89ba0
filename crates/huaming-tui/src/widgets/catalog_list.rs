//! Catalog list — the grouped, highlighted record list in the main pane.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one record |
//! | `↓` / `j` | Move cursor down one record |
//! | `PageUp` / `Ctrl+u` | Move up one page |
//! | `PageDown` / `Ctrl+d` | Move down one page |
//! | `Enter` | Open the detail popup (handled by the app shell) |
//!
//! The cursor indexes records across groups in render order
//! ([`CatalogView::rows`]); group headers are never selectable.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use huaming_core::view::{group_title, DecoratedRecord};
use huaming_core::{CatalogView, Segment};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct CatalogListState {
    /// Index of the highlighted record in render order.
    pub cursor: usize,
    /// First visible line, carried between renders so scrolling is stable.
    offset: Cell<usize>,
}

impl CatalogListState {
    /// Handle a navigation event. `rows` is the number of displayed records.
    pub fn handle(&mut self, event: &AppEvent, rows: usize) {
        if rows == 0 {
            self.cursor = 0;
            return;
        }
        let last = rows - 1;
        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.cursor = (self.cursor + 1).min(last),
            AppEvent::PageUp => self.cursor = self.cursor.saturating_sub(PAGE_STEP),
            AppEvent::PageDown => self.cursor = (self.cursor + PAGE_STEP).min(last),
            _ => return,
        }
        tracing::debug!(cursor = self.cursor, rows, "list: cursor moved");
    }

    /// Keep the cursor inside a list that just changed size.
    pub fn clamp(&mut self, rows: usize) {
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }

    /// Back to the top, e.g. after the filters change.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.offset.set(0);
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct CatalogList<'a, 'r> {
    view: &'a CatalogView<'r>,
    state: &'a CatalogListState,
    focused: bool,
    show_image_note: bool,
    highlight_symbol: &'a str,
    theme: &'a Theme,
}

impl<'a, 'r> CatalogList<'a, 'r> {
    pub fn new(
        view: &'a CatalogView<'r>,
        state: &'a CatalogListState,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            view,
            state,
            focused,
            show_image_note: true,
            highlight_symbol: "▶ ",
            theme,
        }
    }

    pub fn show_image_note(mut self, show: bool) -> Self {
        self.show_image_note = show;
        self
    }

    pub fn highlight_symbol(mut self, symbol: &'a str) -> Self {
        self.highlight_symbol = symbol;
        self
    }

    /// List items plus the item index of every record, in render order.
    fn items(&self) -> (Vec<ListItem<'static>>, Vec<usize>) {
        let mut items = Vec::new();
        let mut record_lines = Vec::new();
        for group in &self.view.groups {
            items.push(ListItem::new(Line::from(Span::styled(
                format!(
                    "{} · {}（{}）",
                    group_title(&group.key),
                    group.tier,
                    group.records.len()
                ),
                self.theme.group_header,
            ))));
            for row in &group.records {
                record_lines.push(items.len());
                items.push(ListItem::new(self.record_line(row)));
            }
        }
        (items, record_lines)
    }

    fn record_line(&self, row: &DecoratedRecord<'_>) -> Line<'static> {
        let t = self.theme;
        let r = row.record;
        let mut spans = vec![if row.has_meta {
            Span::styled("● ", t.filled)
        } else {
            Span::styled("○ ", t.unfilled)
        }];
        spans.extend(segment_spans(&row.name, t.name, t));
        spans.push(Span::styled("  别名：", t.label));
        spans.extend(field_spans(&row.alias, r.has_alias(), t));
        spans.push(Span::styled("  花语：", t.label));
        spans.extend(field_spans(&row.meaning, r.has_meaning(), t));
        spans.push(Span::styled("  季节：", t.label));
        spans.extend(field_spans(&row.season, r.has_season(), t));
        if self.show_image_note {
            let style = if r.has_image() { t.filled } else { t.placeholder };
            spans.push(Span::styled(format!("  {}", row.image_note), style));
        }
        Line::from(spans)
    }
}

fn field_spans(segments: &[Segment], present: bool, theme: &Theme) -> Vec<Span<'static>> {
    let base = if present { Style::default() } else { theme.placeholder };
    segment_spans(segments, base, theme)
}

/// One span per segment; highlighted segments get the search style on top.
pub(crate) fn segment_spans(segments: &[Segment], base: Style, theme: &Theme) -> Vec<Span<'static>> {
    segments
        .iter()
        .map(|s| {
            let style = if s.highlight {
                base.patch(theme.search_highlight)
            } else {
                base
            };
            Span::styled(s.text.clone(), style)
        })
        .collect()
}

impl Widget for CatalogList<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(format!(" 花名 {} ", self.view.status_text()))
            .border_style(self.theme.border(self.focused));

        if self.view.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(vec![
                Line::from(Span::styled("没有符合条件的花名。", self.theme.placeholder)),
                Line::from(Span::styled("按 r 重置筛选，或 Ctrl+l 清空关键词。", self.theme.label)),
            ])
            .render(inner, buf);
            return;
        }

        let (items, record_lines) = self.items();
        let selected = record_lines.get(self.state.cursor).copied();

        let list = List::new(items)
            .block(block)
            .highlight_symbol(self.highlight_symbol)
            .highlight_style(self.theme.selected);

        let mut list_state = ListState::default()
            .with_offset(self.state.offset.get())
            .with_selected(selected);
        StatefulWidget::render(list, area, buf, &mut list_state);
        self.state.offset.set(list_state.offset());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
