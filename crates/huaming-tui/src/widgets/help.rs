//! Help popup — centred floating overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "退出"),
    ("Tab", "切换焦点：列表 ↔ 关键词"),
    ("/", "输入关键词"),
    ("Ctrl+l", "清空关键词"),
    ("Escape", "返回列表 / 关闭弹窗"),
    ("↑ k  /  ↓ j", "上下移动"),
    ("PageUp / PageDown", "翻页"),
    ("Enter", "查看花名详情"),
    ("1 2 3 4", "仅已补充 / 含别名 / 含花语 / 含季节"),
    ("5 6 7 8", "季节：春 / 夏 / 秋 / 冬（再按取消）"),
    ("s", "切换排序"),
    ("g  /  t", "切换分组 / 等级"),
    ("r", "重置全部筛选"),
    (":", "命令行（group, tier, season, sort, theme …）"),
    ("?", "显示 / 隐藏帮助"),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(72, BINDINGS.len() as u16 + 2, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" 花名 — 快捷键（? 关闭） ")
            .border_style(self.theme.border_focused);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<20}", key),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
