//! 错误类型定义

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 表单校验错误（添加事件时）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Event Name and Date are required.")]
    EmptyName,

    #[error("Event Name and Date are required.")]
    MissingDate,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// 存储层错误
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// 事件操作的统一错误
#[derive(Error, Debug)]
pub enum EventError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type EventResult<T> = Result<T, EventError>;
