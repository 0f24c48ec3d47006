//! 通用 UI 组件
//!
//! 对话框、输入框、统计卡片等通用组件

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::theme::Theme;

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.background).fg(theme.text));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 带有标题和样式的输入框
pub fn render_input_widget(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    is_focused: bool,
    theme: &Theme,
) {
    let (style, border) = if is_focused {
        (
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            Style::default().fg(theme.accent),
        )
    } else {
        (
            Style::default().fg(theme.muted),
            Style::default().fg(theme.border),
        )
    };

    let text = if is_focused {
        format!("{value}▏")
    } else {
        value.to_string()
    };

    let input = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border),
        );
    frame.render_widget(input, area);
}

/// [组件] 统计卡片
pub fn render_stat_card(frame: &mut Frame, area: Rect, label: &str, value: usize, color: Color) {
    let card = Paragraph::new(vec![
        Line::from(label.to_string()),
        Line::styled(value.to_string(), Style::default().add_modifier(Modifier::BOLD)),
    ])
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::White).bg(color))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)));
    frame.render_widget(card, area);
}
