use std::collections::HashSet;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// 事件 ID（创建时的毫秒时间戳）
pub type EventId = i64;

/// 事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub date: NaiveDate,
}

impl Event {
    pub fn new(id: EventId, name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            date,
        }
    }

    /// 事件当天 00:00，用于和当前时刻比较
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(NaiveTime::MIN)
    }

    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.starts_at() >= now
    }

    /// 名称是否包含搜索词（不区分大小写）
    pub fn matches(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty() || self.name.to_lowercase().contains(needle_lower)
    }
}

/// 运行时事件集合，按添加顺序保存
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventList {
    events: Vec<Event>,
}

impl EventList {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// 生成新 ID：当前毫秒时间戳，若不大于已有最大 ID 则取 max + 1。
    /// max 已是 i64::MAX 时改为取最小的未占用正整数
    pub fn next_id(&self, now_millis: i64) -> EventId {
        match self.events.iter().map(|e| e.id).max() {
            Some(max) if now_millis <= max => {
                max.checked_add(1).unwrap_or_else(|| self.lowest_free_id())
            }
            _ => now_millis,
        }
    }

    fn lowest_free_id(&self) -> EventId {
        let taken: HashSet<EventId> = self.events.iter().map(|e| e.id).collect();
        // 集合只有 len 个元素，前 len + 1 个候选里必有空位
        (1..=EventId::MAX)
            .find(|id| !taken.contains(id))
            .unwrap_or(EventId::MIN)
    }

    /// 追加新事件，返回其 ID
    pub fn add_event(&mut self, name: String, date: NaiveDate) -> EventId {
        let id = self.next_id(Local::now().timestamp_millis());
        self.events.push(Event::new(id, name, date));
        id
    }

    /// 删除事件，不存在时返回 None
    pub fn delete_event(&mut self, id: EventId) -> Option<Event> {
        let index = self.events.iter().position(|e| e.id == id)?;
        Some(self.events.remove(index))
    }
}
