//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{App, AppMode, InputField, Message};
use super::theme::Theme;
use crate::models::Event;
use crate::storage::EventStore;
use crate::views::DerivedViews;
use components::{render_dialog_framework, render_input_widget, render_stat_card};
use layouts::centered_rect;

/// 渲染 UI
pub fn render<S: EventStore>(frame: &mut Frame, app: &mut App<S>) {
    // 每帧只派生一次，列表行和选中项使用同一份视图
    let views = app.views();
    app.sync_display_list(&views);
    let theme = Theme::for_mode(app.dark_mode);

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.text)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Length(4), // 统计
            Constraint::Length(3), // 搜索
            Constraint::Min(6),    // 事件列表
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_header(frame, app, theme, chunks[0]);
    render_stats(frame, &views, theme, chunks[1]);
    render_search(frame, app, theme, chunks[2]);
    render_events(frame, app, &views, theme, chunks[3]);
    render_help(frame, app, theme, chunks[4]);

    if app.mode == AppMode::AddingEvent {
        render_add_dialog(frame, app, theme);
    }
}

fn render_header<S>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            "Mini Event Manager",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!("[t] {}", Theme::toggle_icon(app.dark_mode)),
            Style::default().fg(theme.accent),
        ),
    ]);
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(header, area);
}

fn render_stats(frame: &mut Frame, views: &DerivedViews, theme: &Theme, area: Rect) {
    let stats = views.stats();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    render_stat_card(frame, cards[0], "Total Events", stats.total, theme.total);
    render_stat_card(frame, cards[1], "Upcoming Events", stats.upcoming, theme.upcoming);
    render_stat_card(frame, cards[2], "Past Events", stats.past, theme.past);
}

fn render_search<S>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let focused = app.mode == AppMode::Searching;
    if app.search.is_empty() && !focused {
        let placeholder = Paragraph::new("Search events...")
            .style(Style::default().fg(theme.muted))
            .block(
                Block::default()
                    .title("🔍")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border)),
            );
        frame.render_widget(placeholder, area);
    } else {
        render_input_widget(frame, area, "🔍", &app.search, focused, theme);
    }
}

fn short_date(event: &Event) -> String {
    event.date.format("%b %-d, %Y").to_string()
}

fn long_date(event: &Event) -> String {
    event.date.format("%B %-d, %Y").to_string()
}

fn render_events<S>(
    frame: &mut Frame,
    app: &App<S>,
    views: &DerivedViews,
    theme: &Theme,
    area: Rect,
) {
    let block = Block::default()
        .title("Events")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    if let Some(empty) = views.empty_state() {
        let prompt = Paragraph::new(empty.message())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(prompt, area);
        return;
    }

    let next = views.next_upcoming(app.upcoming_limit);
    let past = &views.searched_past;
    let header_style = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);

    let mut items = Vec::new();
    let mut row_of = Vec::new(); // 显示序号 -> 列表行

    if !next.is_empty() {
        items.push(ListItem::new(Line::styled("Next Upcoming Events", header_style)));
        for event in next {
            row_of.push(items.len());
            items.push(event_item(event, short_date(event), theme.upcoming, theme));
        }
    }
    if !past.is_empty() {
        items.push(ListItem::new(Line::styled("Past Events", header_style)));
        for event in past {
            row_of.push(items.len());
            items.push(event_item(event, long_date(event), theme.muted, theme));
        }
    }

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(theme.highlight)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default();
    state.select(row_of.get(app.selected_index).copied());

    frame.render_stateful_widget(list, area, &mut state);
}

fn event_item(event: &Event, date: String, date_color: Color, theme: &Theme) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::raw("  "),
        Span::styled(event.name.clone(), Style::default().fg(theme.text)),
        Span::raw("  "),
        Span::styled(date, Style::default().fg(date_color)),
    ]))
}

fn render_help<S>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let help_text = match app.mode {
        AppMode::Normal => "[a] 添加  [/] 搜索  [d] 删除  [t] 主题  [j/k] 导航  [Esc] 清除搜索  [q] 退出",
        AppMode::Searching => "输入关键字实时过滤  [Enter] 完成  [Esc] 清除",
        AppMode::AddingEvent => match app.input_field {
            InputField::Name => "输入名称后按 [Enter] 继续  [Tab] 切换  [Esc] 取消",
            InputField::Date => "输入日期 (YYYY-MM-DD) 后按 [Enter] 添加  [Tab] 切换  [Esc] 取消",
        },
    };

    let mut spans = vec![Span::styled(help_text, Style::default().fg(theme.muted))];
    if let Some(message) = &app.message {
        let color = match message {
            Message::Info(_) => theme.accent,
            Message::Error(_) => theme.error,
        };
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            message.text().to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }

    let help = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );

    frame.render_widget(help, area);
}

fn render_add_dialog<S>(frame: &mut Frame, app: &App<S>, theme: &Theme) {
    let area = centered_rect(60, 50, frame.area());
    let inner = render_dialog_framework(frame, area, "Create New Event", theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    render_input_widget(
        frame,
        chunks[0],
        "Event Name",
        &app.event_name,
        app.input_field == InputField::Name,
        theme,
    );
    render_input_widget(
        frame,
        chunks[1],
        "Date (YYYY-MM-DD)",
        &app.event_date,
        app.input_field == InputField::Date,
        theme,
    );

    let hint = match &app.message {
        Some(Message::Error(text)) => {
            Paragraph::new(text.as_str()).style(Style::default().fg(theme.error))
        }
        _ => Paragraph::new("[Enter] Add Event").style(Style::default().fg(theme.muted)),
    };
    frame.render_widget(hint, chunks[2]);
}
