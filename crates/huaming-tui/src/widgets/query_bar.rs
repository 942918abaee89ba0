//! Keyword bar — single-line text input at the top of the screen.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.
//!
//! The app shell copies [`QueryBarState::input`] into the selection keyword
//! after every edit.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct QueryBarState {
    /// The keyword typed by the user.
    pub input: String,
    /// Byte offset of the cursor within `input`.
    pub cursor: usize,
}

impl QueryBarState {
    /// Start with `keyword`, cursor at the end.
    pub fn with_input(keyword: &str) -> Self {
        Self {
            input: keyword.to_string(),
            cursor: keyword.len(),
        }
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    /// Handle a key event from the app shell. Returns `true` when the text
    /// changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.input.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(keyword = %self.input, cursor = self.cursor, "keyword: char inserted");
                true
            }
            AppEvent::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = self.input[..self.cursor]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                self.input.remove(prev);
                self.cursor = prev;
                tracing::debug!(keyword = %self.input, cursor = self.cursor, "keyword: backspace");
                true
            }
            AppEvent::Nav(Direction::Left) => {
                if self.cursor > 0 {
                    self.cursor = self.input[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
                false
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.input.len() {
                    self.cursor = self.input[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.input.len());
                }
                false
            }
            _ => false,
        }
    }

    /// Display width of the text before the cursor, in terminal cells.
    fn cursor_width(&self) -> u16 {
        u16::try_from(Span::raw(&self.input[..self.cursor]).width()).unwrap_or(u16::MAX)
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    focused: bool,
    /// Right-aligned status, e.g. `已显示 3 / 12 个花名。`.
    status: &'a str,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(state: &'a QueryBarState, focused: bool, status: &'a str, theme: &'a Theme) -> Self {
        Self { state, focused, status, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(self.state.cursor_width())
            .min(area.right().saturating_sub(1));
        (x, area.y + 1)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" 关键词 ")
            .border_style(self.theme.border(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(26)])
            .split(inner);

        let line = if self.state.input.is_empty() && !self.focused {
            Line::from(Span::styled(
                "按 / 搜索花名、别名、花语、拼音",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.input.as_str())
        };
        Paragraph::new(line).render(chunks[0], buf);

        Paragraph::new(Line::from(Span::styled(self.status, self.theme.status_ok)))
            .right_aligned()
            .render(chunks[1], buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
