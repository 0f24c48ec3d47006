//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use chrono::{Local, NaiveDateTime};

use crate::config::Config;
use crate::manager::EventManager;
use crate::models::{Event, EventId};
use crate::storage::EventStore;
use crate::views::DerivedViews;

/// 应用状态
pub struct App<S> {
    pub manager: EventManager<S>,
    pub mode: AppMode,
    pub input_field: InputField,
    pub event_name: String,
    pub event_date: String,
    pub search: String,
    pub dark_mode: bool,
    pub upcoming_limit: usize,
    pub selected_index: usize,
    pub display_list: Vec<EventId>,
    pub message: Option<Message>,
}

/// 应用模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Searching,
    AddingEvent,
}

/// 添加表单的输入字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Name,
    Date,
}

/// 状态栏消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Info(String),
    Error(String),
}

impl Message {
    pub fn text(&self) -> &str {
        match self {
            Message::Info(text) | Message::Error(text) => text,
        }
    }
}

impl<S: EventStore> App<S> {
    /// 创建新的应用实例
    pub fn new(manager: EventManager<S>, config: &Config) -> Self {
        let mut app = Self {
            manager,
            mode: AppMode::Normal,
            input_field: InputField::Name,
            event_name: String::new(),
            event_date: String::new(),
            search: String::new(),
            dark_mode: config.dark_mode,
            upcoming_limit: config.upcoming_limit,
            selected_index: 0,
            display_list: Vec::new(),
            message: None,
        };
        app.refresh_display_list();
        app
    }

    pub fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    /// 按当前搜索词计算派生视图
    pub fn views(&self) -> DerivedViews {
        self.manager.views(self.now(), &self.search)
    }

    /// 刷新显示列表
    pub fn refresh_display_list(&mut self) {
        let views = self.views();
        self.sync_display_list(&views);
    }

    /// 用同一份派生视图更新显示列表，渲染时与列表行保持一致
    pub fn sync_display_list(&mut self, views: &DerivedViews) {
        self.display_list = views
            .displayed(self.upcoming_limit)
            .iter()
            .map(|e| e.id)
            .collect();

        // 确保选中索引有效
        if self.display_list.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.display_list.len() {
            self.selected_index = self.display_list.len() - 1;
        }
    }

    /// 获取当前选中的事件
    pub fn selected_event(&self) -> Option<&Event> {
        self.selected_event_id().and_then(|id| self.manager.get(id))
    }

    pub fn selected_event_id(&self) -> Option<EventId> {
        self.display_list.get(self.selected_index).copied()
    }
}
