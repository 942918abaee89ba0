//! Detail popup — every field of one record, opened with `Enter` on the list.

use crate::theme::Theme;
use crate::widgets::help::centered_rect;
use huaming_core::detail::NOT_FOUND;
use huaming_core::RecordDetail;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};

pub struct DetailPopup<'a> {
    detail: Option<&'a RecordDetail>,
    theme: &'a Theme,
}

impl<'a> DetailPopup<'a> {
    pub fn new(detail: Option<&'a RecordDetail>, theme: &'a Theme) -> Self {
        Self { detail, theme }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let Some(d) = self.detail else {
            return vec![Line::from(Span::styled(NOT_FOUND, self.theme.status_error))];
        };
        let field = |label: &str, value: &str, present: bool| {
            Line::from(vec![
                Span::styled(format!("{label:<6}"), self.theme.label),
                Span::styled(
                    value.to_string(),
                    if present { self.theme.name } else { self.theme.placeholder },
                ),
            ])
        };
        let r = &d.record;
        vec![
            field("分组", &d.group_title(), r.group.is_some()),
            field("等级", &d.tier, !r.tier.trim().is_empty()),
            field("别名", &d.alias, r.has_alias()),
            field("花语", &d.meaning, r.has_meaning()),
            field("季节", &d.season, r.has_season()),
            field("赏花", &d.season_hint, r.has_season()),
            field("拼音", &d.pinyin, !r.pinyin.trim().is_empty()),
            field("首字母", &d.initials, !r.pinyin_initials.trim().is_empty()),
            field("图片", d.image_note, r.has_image()),
        ]
    }
}

impl Widget for DetailPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();
        let popup = centered_rect(60, lines.len() as u16 + 2, area);
        Clear.render(popup, buf);

        let title = match self.detail {
            Some(d) => format!(" {}（Esc 关闭） ", d.record.name),
            None => " 花名详情 ".to_string(),
        };
        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border_focused);

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(popup, buf);
    }
}
