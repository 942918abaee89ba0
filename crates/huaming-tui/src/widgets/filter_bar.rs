//! Filter bar — the current toggles, quick seasons, selectors and sort order,
//! each labelled with the key that changes it.

use crate::theme::Theme;
use huaming_core::selection::QUICK_SEASONS;
use huaming_core::{Choice, FilterOptions, Selection, Toggle};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

pub struct FilterBar<'a> {
    selection: &'a Selection,
    theme: &'a Theme,
}

impl<'a> FilterBar<'a> {
    pub fn new(selection: &'a Selection, theme: &'a Theme) -> Self {
        Self { selection, theme }
    }

    fn toggles_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, toggle) in Toggle::ALL.into_iter().enumerate() {
            let on = self.selection.toggle_state(toggle);
            let mark = if on { "■" } else { "□" };
            spans.push(Span::styled(
                format!("[{}]{mark}{}  ", i + 1, toggle.label()),
                self.theme.filter(on),
            ));
        }
        spans.push(Span::styled("季节 ", self.theme.label));
        for (i, season) in QUICK_SEASONS.into_iter().enumerate() {
            let on = self.selection.season.as_value() == Some(season);
            spans.push(Span::styled(
                format!("[{}]{season} ", i + 5),
                self.theme.filter(on),
            ));
        }
        if let Choice::Only(s) = &self.selection.season {
            if !QUICK_SEASONS.contains(&s.as_str()) {
                spans.push(Span::styled(format!("含“{s}”"), self.theme.filter_active));
            }
        }
        Line::from(spans)
    }

    fn selectors_line(&self) -> Line<'static> {
        let s = self.selection;
        let tier = s.tier.as_value().unwrap_or("全部").to_string();
        Line::from(vec![
            Span::styled("分组(g)：", self.theme.label),
            Span::styled(
                format!("{}   ", FilterOptions::group_label(&s.group)),
                self.theme.filter(!s.group.is_all()),
            ),
            Span::styled("等级(t)：", self.theme.label),
            Span::styled(format!("{tier}   "), self.theme.filter(!s.tier.is_all())),
            Span::styled("排序(s)：", self.theme.label),
            Span::styled(
                s.sort.label(),
                self.theme.filter(s.sort != Default::default()),
            ),
            Span::styled("   r 重置", self.theme.label),
        ])
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" 筛选 ")
            .border_style(self.theme.border_unfocused);
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(vec![self.toggles_line(), self.selectors_line()]).render(inner, buf);
    }
}
