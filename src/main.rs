mod config;
mod error;
mod logging;
mod manager;
mod models;
mod storage;
mod ui;
mod views;

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::config::load_config;
use crate::logging::init_logging;
use crate::manager::EventManager;
use crate::storage::{EventStore, JsonFileStore};
use crate::ui::{App, render};

#[derive(Parser, Debug)]
#[command(name = "mini-events")]
#[command(about = "A terminal dashboard for your upcoming and past events")]
struct Args {
    /// 数据目录 (默认 ~/.local/share/mini-events/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// 日志级别 (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// 以深色主题启动
    #[arg(long)]
    dark: bool,
}

/// 获取数据目录路径 (~/.local/share/mini-events/)
fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .context("Could not determine user data directory")?
        .join("mini-events");
    Ok(data_dir)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => get_data_dir()?,
    };
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;

    init_logging(&data_dir, &args.log_level)?;

    let mut config = load_config(&data_dir)?;
    if args.dark {
        config.dark_mode = true;
    }

    // 启动时读取一次
    let store = JsonFileStore::in_dir(&data_dir);
    tracing::info!("Using event store {}", store.path().display());
    let manager = EventManager::open(store)
        .with_context(|| format!("Failed to load events from {}", data_dir.display()))?;

    let mut app = App::new(manager, &config);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    tracing::info!("Application shutting down");
    result
}

fn run_app<S: EventStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
            if key.kind == crossterm::event::KeyEventKind::Press && ui::handle_key_event(app, key.code)
            {
                break;
            }
        }
    }
    Ok(())
}
