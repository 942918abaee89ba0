//! Header and status rows.
//!
//! The header carries the title, metadata progress and keybinding hints; the
//! status row shows the load failure, the last notice, or the filter summary,
//! in that order of precedence.

use crate::theme::Theme;
use huaming_core::MetaProgress;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

const HINTS: &str = " q:退出  ?:帮助 ";

pub struct Header<'a> {
    progress: MetaProgress,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(progress: MetaProgress, theme: &'a Theme) -> Self {
        Self { progress, theme }
    }

    fn line(&self) -> Line<'static> {
        let done = self.progress.total > 0 && self.progress.remaining() == 0;
        Line::from(vec![
            Span::styled(" 花名录 ", self.theme.group_header),
            Span::styled(
                format!(" {} ", self.progress.text()),
                if done { self.theme.filled } else { self.theme.label },
            ),
            Span::styled(
                format!("（{}，{:.0}%）", self.progress.detail_text(), self.progress.ratio() * 100.0),
                self.theme.label,
            ),
        ])
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_line(area.x, area.y, &self.line(), area.width);

        let hint_x = area.right().saturating_sub(Span::raw(HINTS).width() as u16);
        buf.set_string(
            hint_x,
            area.y,
            HINTS,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}

/// What the status row currently says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status<'a> {
    Error(&'a str),
    Notice(&'a str),
    Summary(&'a str),
}

impl<'a> Status<'a> {
    pub fn pick(load_error: Option<&'a str>, notice: Option<&'a str>, summary: &'a str) -> Self {
        match (load_error, notice) {
            (Some(e), _) => Status::Error(e),
            (None, Some(n)) => Status::Notice(n),
            (None, None) => Status::Summary(summary),
        }
    }
}

pub struct StatusBar<'a> {
    status: Status<'a>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(status: Status<'a>, theme: &'a Theme) -> Self {
        Self { status, theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let span = match self.status {
            Status::Error(text) => Span::styled(format!(" {text}"), self.theme.status_error),
            Status::Notice(text) => Span::styled(format!(" {text}"), self.theme.status_ok),
            Status::Summary(text) => Span::styled(format!(" {text}"), self.theme.label),
        };
        buf.set_line(area.x, area.y, &Line::from(span), area.width);
    }
}
