use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// 配置文件名
pub const CONFIG_FILE: &str = "config.toml";

/// 默认显示的最近事件数量
pub const DEFAULT_UPCOMING_LIMIT: usize = 3;

/// 用户配置 (data_dir/config.toml)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 启动时使用深色主题
    pub dark_mode: bool,
    /// "Next Upcoming Events" 中最多显示几条
    pub upcoming_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dark_mode: false,
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
        }
    }
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// 加载配置，文件不存在时使用默认值
pub fn load_config(data_dir: &Path) -> Result<Config> {
    let path = config_path(data_dir);
    if !path.exists() {
        return Ok(Config::default());
    }

    let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))?;

    anyhow::ensure!(
        config.upcoming_limit > 0,
        "Invalid config {}: upcoming_limit must be at least 1",
        path.display()
    );

    tracing::info!(?config, "Config loaded");
    Ok(config)
}
