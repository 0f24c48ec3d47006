//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode};
use crate::storage::EventStore;

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Normal => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Char('a') => Some(Action::StartAddEvent),
            KeyCode::Char('/') => Some(Action::StartSearch),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteSelected),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            KeyCode::Esc => Some(Action::ClearSearch),
            _ => None,
        },
        AppMode::Searching => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        AppMode::AddingEvent => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::NextField),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
    }
}

/// 处理按键事件，返回 true 表示退出
pub fn handle_key_event<S: EventStore>(app: &mut App<S>, key: KeyCode) -> bool {
    match get_action(app.mode, key) {
        Some(action) => app.dispatch(action),
        None => false,
    }
}
