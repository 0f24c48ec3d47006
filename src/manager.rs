//! 事件列表管理
//!
//! 独占内存中的事件集合，每次修改后同步写回存储

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{EventResult, StorageError, ValidationError};
use crate::models::{Event, EventId, EventList};
use crate::storage::EventStore;
use crate::views::{DerivedViews, derive_views};

pub struct EventManager<S> {
    events: EventList,
    store: S,
}

/// 校验表单输入，返回去掉首尾空白的名称和解析后的日期
pub fn validate(name: &str, date: &str) -> Result<(String, NaiveDate), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let date = date.trim();
    if date.is_empty() {
        return Err(ValidationError::MissingDate);
    }

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))?;

    Ok((name.to_string(), date))
}

impl<S: EventStore> EventManager<S> {
    /// 从存储加载集合。数据损坏时挪开旧数据并从空集合开始
    pub fn open(store: S) -> EventResult<Self> {
        let events = match store.load() {
            Ok(events) => events,
            Err(StorageError::Parse { path, source }) => {
                tracing::warn!(
                    "Stored events at {} are unreadable ({source}), starting empty",
                    path.display()
                );
                store.set_aside_corrupt()?;
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(count = events.len(), "Events loaded");

        Ok(Self {
            events: EventList::from_events(events),
            store,
        })
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// 添加事件。校验失败时集合和存储都不变
    pub fn add_event(&mut self, name: &str, date: &str) -> EventResult<EventId> {
        let (name, date) = validate(name, date)?;
        let id = self.events.add_event(name, date);
        tracing::debug!(id, %date, "Event added");
        self.persist()?;
        Ok(id)
    }

    /// 删除事件；ID 不存在时集合不变，但仍然写回
    pub fn delete_event(&mut self, id: EventId) -> EventResult<Option<Event>> {
        let removed = self.events.delete_event(id);
        match &removed {
            Some(event) => tracing::debug!(id, name = %event.name, "Event deleted"),
            None => tracing::debug!(id, "Delete ignored, no such event"),
        }
        self.persist()?;
        Ok(removed)
    }

    pub fn views(&self, now: NaiveDateTime, search: &str) -> DerivedViews {
        derive_views(self.events(), now, search)
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store.save(self.events())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EventError;
    use crate::storage::{JsonFileStore, MemoryStore};
    use crate::views::EmptyState;
    use chrono::Local;
    use tempfile::TempDir;

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn manager() -> EventManager<MemoryStore> {
        EventManager::open(MemoryStore::default()).unwrap()
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            validate("  Launch ", "2999-01-01"),
            Ok(("Launch".to_string(), NaiveDate::from_ymd_opt(2999, 1, 1).unwrap()))
        );
        assert_eq!(validate("   ", "2999-01-01"), Err(ValidationError::EmptyName));
        assert_eq!(validate("", ""), Err(ValidationError::EmptyName));
        assert_eq!(validate("Launch", ""), Err(ValidationError::MissingDate));
        assert_eq!(
            validate("Launch", "2999-13-01"),
            Err(ValidationError::InvalidDate("2999-13-01".to_string()))
        );
    }

    #[test]
    fn test_invalid_add_leaves_collection_unchanged() {
        let mut manager = manager();
        manager.add_event("Launch", "2999-01-01").unwrap();
        let saves = manager.store().saves.get();

        for (name, date) in [("", "2999-01-01"), ("  \t", "2999-01-01"), ("Party", "")] {
            let err = manager.add_event(name, date).unwrap_err();
            assert!(matches!(err, EventError::Validation(_)));
        }

        assert_eq!(manager.len(), 1);
        assert_eq!(manager.store().saves.get(), saves);
    }

    #[test]
    fn test_count_tracks_adds_and_deletes() {
        let mut manager = manager();
        let ids: Vec<_> = (0..5)
            .map(|i| manager.add_event(&format!("e{i}"), "2030-01-01").unwrap())
            .collect();

        assert!(manager.delete_event(ids[1]).unwrap().is_some());
        assert!(manager.delete_event(ids[3]).unwrap().is_some());
        assert!(manager.delete_event(ids[3]).unwrap().is_none());

        assert_eq!(manager.len(), 3);
    }

    #[test]
    fn test_add_after_loading_max_id() {
        let store = MemoryStore::with_value(
            r#"[{"id":9223372036854775807,"name":"Far","date":"2999-01-01"}]"#,
        );
        let mut manager = EventManager::open(store).unwrap();

        let id = manager.add_event("Launch", "2999-01-01").unwrap();
        assert_ne!(id, i64::MAX);
        assert!(id > 0);
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.get(id).unwrap().name, "Launch");
    }

    #[test]
    fn test_add_trims_and_appends() {
        let mut manager = manager();
        manager.add_event("  Later ", "2999-01-01").unwrap();
        manager.add_event("Sooner", "2998-01-01").unwrap();

        let names: Vec<_> = manager.events().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Later", "Sooner"]);
    }

    #[test]
    fn test_delete_missing_still_writes_same_content() {
        let mut manager = manager();
        manager.add_event("Launch", "2999-01-01").unwrap();
        let before = manager.store().raw();
        let saves = manager.store().saves.get();

        assert!(manager.delete_event(-1).unwrap().is_none());

        assert_eq!(manager.len(), 1);
        assert_eq!(manager.store().saves.get(), saves + 1);
        assert_eq!(manager.store().raw(), before);
    }

    #[test]
    fn test_reload_reproduces_collection() {
        let dir = TempDir::new().unwrap();
        let mut manager = EventManager::open(JsonFileStore::in_dir(dir.path())).unwrap();
        manager.add_event("Launch", "2999-01-01").unwrap();
        manager.add_event("Old Meetup", "2000-01-01").unwrap();
        let expected = manager.events().to_vec();

        let reopened = EventManager::open(JsonFileStore::in_dir(dir.path())).unwrap();
        assert_eq!(reopened.events(), expected.as_slice());
    }

    #[test]
    fn test_open_corrupt_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        std::fs::write(store.path(), "[{\"id\": 1,").unwrap();

        let mut manager = EventManager::open(store).unwrap();
        assert!(manager.is_empty());
        assert!(dir.path().join("events.json.bak").exists());

        manager.add_event("Fresh", "2999-01-01").unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("events.json.bak")).unwrap(),
            "[{\"id\": 1,"
        );
    }

    #[test]
    fn test_open_corrupt_memory_value_is_set_aside() {
        let store = MemoryStore::with_value("not json");
        let manager = EventManager::open(store).unwrap();
        assert!(manager.is_empty());
        assert_eq!(manager.store().raw(), None);
    }

    #[test]
    fn test_dashboard_scenario() {
        let mut manager = manager();

        manager.add_event("Launch", "2999-01-01").unwrap();
        let stats = manager.views(now(), "").stats();
        assert_eq!((stats.total, stats.upcoming, stats.past), (1, 1, 0));
        assert_eq!(manager.views(now(), "").empty_state(), None);

        let old = manager.add_event("Old Meetup", "2000-01-01").unwrap();
        let stats = manager.views(now(), "").stats();
        assert_eq!((stats.total, stats.upcoming, stats.past), (2, 1, 1));

        let searched = manager.views(now(), "launch");
        let names: Vec<_> = searched
            .searched_upcoming
            .iter()
            .chain(&searched.searched_past)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["Launch"]);

        manager.delete_event(old).unwrap();
        let stats = manager.views(now(), "").stats();
        assert_eq!((stats.total, stats.past), (1, 0));

        assert_eq!(
            manager.views(now(), "nothing").empty_state(),
            Some(EmptyState::NoMatches)
        );
    }
}
