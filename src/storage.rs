//! 持久化
//!
//! 整个事件集合以一个 JSON 数组的形式保存在一个位置（默认 events.json）。
//! 启动时读取一次，之后每次修改都整体覆盖写入。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::models::Event;

/// 存储文件名
pub const EVENTS_FILE: &str = "events.json";

/// 事件存储接口
pub trait EventStore {
    /// 读取集合；尚未保存过时返回空集合
    fn load(&self) -> Result<Vec<Event>, StorageError>;

    /// 整体覆盖写入
    fn save(&self, events: &[Event]) -> Result<(), StorageError>;

    /// 把无法解析的数据挪开，避免下一次 save 覆盖掉它
    fn set_aside_corrupt(&self) -> Result<(), StorageError>;
}

/// 基于 JSON 文件的存储
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 数据目录下的 events.json
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(EVENTS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }
}

impl EventStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Event>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        parse_events(&content).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, events: &[Event]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(events).map_err(StorageError::Serialize)?;
        fs::write(&self.path, content)?;
        tracing::debug!(count = events.len(), path = %self.path.display(), "Events saved");
        Ok(())
    }

    fn set_aside_corrupt(&self) -> Result<(), StorageError> {
        let backup = self.backup_path();
        fs::rename(&self.path, &backup)?;
        tracing::warn!("Unreadable event data moved to {}", backup.display());
        Ok(())
    }
}

fn parse_events(content: &str) -> Result<Vec<Event>, serde_json::Error> {
    // 与浏览器版一致：空字符串视为没有存储值
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(content)
}

/// 内存存储，模拟单个键值对
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub value: std::cell::RefCell<Option<String>>,
    pub saves: std::cell::Cell<usize>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: std::cell::RefCell::new(Some(value.to_string())),
            saves: std::cell::Cell::new(0),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

#[cfg(test)]
impl EventStore for MemoryStore {
    fn load(&self) -> Result<Vec<Event>, StorageError> {
        match self.value.borrow().as_deref() {
            None => Ok(Vec::new()),
            Some(content) => parse_events(content).map_err(|source| StorageError::Parse {
                path: PathBuf::from("memory"),
                source,
            }),
        }
    }

    fn save(&self, events: &[Event]) -> Result<(), StorageError> {
        let content = serde_json::to_string(events).map_err(StorageError::Serialize)?;
        *self.value.borrow_mut() = Some(content);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn set_aside_corrupt(&self) -> Result<(), StorageError> {
        *self.value.borrow_mut() = None;
        Ok(())
    }
}

/// 写入总是失败的存储
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FailingStore;

#[cfg(test)]
impl EventStore for FailingStore {
    fn load(&self) -> Result<Vec<Event>, StorageError> {
        Ok(Vec::new())
    }

    fn save(&self, _events: &[Event]) -> Result<(), StorageError> {
        Err(io::Error::other("disk full").into())
    }

    fn set_aside_corrupt(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn events() -> Vec<Event> {
        vec![
            Event::new(1, "Launch", NaiveDate::from_ymd_opt(2999, 1, 1).unwrap()),
            Event::new(2, "Old Meetup", NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()),
        ]
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(&dir.path().join("nested"));
        store.save(&events()).unwrap();

        let reloaded = JsonFileStore::new(store.path()).load().unwrap();
        assert_eq!(reloaded, events());
    }

    #[test]
    fn test_reads_browser_format() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        fs::write(
            store.path(),
            r#"[{"id":1718000000000,"name":"Launch","date":"2999-01-01"}]"#,
        )
        .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 1718000000000);
        assert_eq!(loaded[0].date, NaiveDate::from_ymd_opt(2999, 1, 1).unwrap());
    }

    #[test]
    fn test_malformed_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(store.load(), Err(StorageError::Parse { .. })));

        fs::write(store.path(), r#"[{"id":1,"name":"x","date":"someday"}]"#).unwrap();
        assert!(matches!(store.load(), Err(StorageError::Parse { .. })));
    }

    #[test]
    fn test_set_aside_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        fs::write(store.path(), "garbage").unwrap();

        store.set_aside_corrupt().unwrap();
        assert!(!store.path().exists());
        let backup = dir.path().join("events.json.bak");
        assert_eq!(fs::read_to_string(backup).unwrap(), "garbage");
        assert!(store.load().unwrap().is_empty());
    }
}
