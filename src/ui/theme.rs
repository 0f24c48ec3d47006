//! 浅色/深色主题配色

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub total: Color,
    pub upcoming: Color,
    pub past: Color,
    pub error: Color,
    pub highlight: Color,
}

pub const LIGHT: Theme = Theme {
    background: Color::Rgb(249, 250, 251),
    text: Color::Rgb(17, 24, 39),
    muted: Color::Rgb(107, 114, 128),
    border: Color::Rgb(209, 213, 219),
    accent: Color::Rgb(37, 99, 235),
    total: Color::Rgb(37, 99, 235),
    upcoming: Color::Rgb(22, 163, 74),
    past: Color::Rgb(220, 38, 38),
    error: Color::Rgb(185, 28, 28),
    highlight: Color::Rgb(219, 234, 254),
};

pub const DARK: Theme = Theme {
    background: Color::Rgb(17, 24, 39),
    text: Color::Rgb(229, 231, 235),
    muted: Color::Rgb(156, 163, 175),
    border: Color::Rgb(55, 65, 81),
    accent: Color::Rgb(96, 165, 250),
    total: Color::Rgb(96, 165, 250),
    upcoming: Color::Rgb(74, 222, 128),
    past: Color::Rgb(248, 113, 113),
    error: Color::Rgb(248, 113, 113),
    highlight: Color::Rgb(29, 78, 216),
};

impl Theme {
    pub fn for_mode(dark_mode: bool) -> &'static Theme {
        if dark_mode { &DARK } else { &LIGHT }
    }

    /// 标题栏里的主题切换图标
    pub fn toggle_icon(dark_mode: bool) -> &'static str {
        if dark_mode { "☀" } else { "☾" }
    }
}
