//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种业务处理方法

use super::actions::Action;
use super::state::{App, AppMode, InputField, Message};
use crate::error::EventError;
use crate::storage::EventStore;

impl<S: EventStore> App<S> {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::StartAddEvent => self.start_add_event(),
            Action::StartSearch => self.start_search(),
            Action::DeleteSelected => self.delete_selected(),
            Action::ToggleTheme => self.toggle_theme(),
            Action::ClearSearch => self.clear_search(),

            Action::NextField => self.next_field(),
            Action::Cancel => self.cancel(),

            Action::Submit => match self.mode {
                AppMode::AddingEvent => match self.input_field {
                    InputField::Name => self.input_field = InputField::Date,
                    InputField::Date => self.confirm_add_event(),
                },
                AppMode::Searching => self.mode = AppMode::Normal,
                AppMode::Normal => {}
            },

            Action::Input(c) => {
                if let Some(buffer) = self.active_buffer() {
                    buffer.push(c);
                    self.after_edit();
                }
            }

            Action::DeleteChar => {
                if let Some(buffer) = self.active_buffer() {
                    buffer.pop();
                    self.after_edit();
                }
            }
        }
        false
    }

    /// 当前模式下正在编辑的文本
    fn active_buffer(&mut self) -> Option<&mut String> {
        match (self.mode, self.input_field) {
            (AppMode::Searching, _) => Some(&mut self.search),
            (AppMode::AddingEvent, InputField::Name) => Some(&mut self.event_name),
            (AppMode::AddingEvent, InputField::Date) => Some(&mut self.event_date),
            (AppMode::Normal, _) => None,
        }
    }

    fn after_edit(&mut self) {
        if self.mode == AppMode::Searching {
            self.selected_index = 0;
            self.refresh_display_list();
        }
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.display_list.len() {
            self.selected_index += 1;
        }
    }

    // ============ 添加事件相关 ============

    /// 打开添加表单，保留上次未提交的内容
    pub fn start_add_event(&mut self) {
        self.mode = AppMode::AddingEvent;
        self.input_field = InputField::Name;
        self.message = None;
    }

    pub fn next_field(&mut self) {
        self.input_field = match self.input_field {
            InputField::Name => InputField::Date,
            InputField::Date => InputField::Name,
        };
    }

    /// 提交表单。校验失败时表单保持打开
    pub fn confirm_add_event(&mut self) {
        match self.manager.add_event(&self.event_name, &self.event_date) {
            Ok(_) => {
                self.message = Some(Message::Info(format!(
                    "Added \"{}\"",
                    self.event_name.trim()
                )));
                self.clear_form();
                self.mode = AppMode::Normal;
            }
            Err(EventError::Validation(e)) => {
                self.message = Some(Message::Error(e.to_string()));
            }
            Err(e) => {
                // 事件已加入内存集合，只是写盘失败；清空表单避免重复提交
                tracing::error!("Failed to save events: {e}");
                self.message = Some(Message::Error(format!("Failed to save events: {e}")));
                self.clear_form();
                self.mode = AppMode::Normal;
            }
        }
        self.refresh_display_list();
    }

    fn clear_form(&mut self) {
        self.event_name.clear();
        self.event_date.clear();
        self.input_field = InputField::Name;
    }

    // ============ 删除相关 ============

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_event().map(|e| e.id) else {
            return;
        };

        self.message = match self.manager.delete_event(id) {
            Ok(Some(event)) => Some(Message::Info(format!("Deleted \"{}\"", event.name))),
            Ok(None) => None,
            Err(e) => {
                tracing::error!("Failed to save events: {e}");
                Some(Message::Error(format!("Failed to save events: {e}")))
            }
        };
        self.refresh_display_list();
    }

    // ============ 搜索/主题 ============

    pub fn start_search(&mut self) {
        self.mode = AppMode::Searching;
        self.message = None;
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.selected_index = 0;
        self.refresh_display_list();
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    // ============ 通用操作 ============

    /// 取消当前操作
    pub fn cancel(&mut self) {
        if self.mode == AppMode::Searching {
            self.clear_search();
        }
        self.mode = AppMode::Normal;
        self.message = None;
    }
}
