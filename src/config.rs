use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

pub const CANVAS_WIDTH: u32 = 640;
pub const CANVAS_HEIGHT: u32 = 480;
pub const CELL_WIDTH: u32 = 40;
pub const CELL_HEIGHT: u32 = 40;

pub const ROW_NUM: i32 = 16;
pub const COL_NUM: i32 = 16;

/// Cells that actually fit on the canvas, anything beyond is clipped.
pub const CANVAS_COLS: i32 = (CANVAS_WIDTH / CELL_WIDTH) as i32;
pub const CANVAS_ROWS: i32 = (CANVAS_HEIGHT / CELL_HEIGHT) as i32;

pub const FRAME_RATE: u32 = 30;
pub const FRUIT_TOP_UP_INTERVAL: Duration = Duration::from_secs(5);
pub const FRUIT_FLOOR: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub frame_rate: u32,
    pub top_up_interval: Duration,
    pub fruit_floor: usize,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            frame_rate: FRAME_RATE,
            top_up_interval: FRUIT_TOP_UP_INTERVAL,
            fruit_floor: FRUIT_FLOOR,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate
    }
}

#[derive(Parser, Debug)]
#[command(name = "fruit_snake")]
#[command(version, about = "Grid snake that grows by eating fruit")]
pub struct Cli {
    /// Seed for the random source, random if omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frames per second
    #[arg(long, default_value_t = FRAME_RATE)]
    pub fps: u32,

    /// Seconds between fruit top-ups
    #[arg(long, default_value_t = FRUIT_TOP_UP_INTERVAL.as_secs())]
    pub top_up_secs: u64,

    /// File the log is written to
    #[arg(long, default_value = "snake.log")]
    pub log_file: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    pub fn game_config(&self) -> Result<GameConfig> {
        if self.fps == 0 {
            bail!("--fps must be at least 1");
        }
        if self.top_up_secs == 0 {
            bail!("--top-up-secs must be at least 1");
        }

        Ok(GameConfig {
            frame_rate: self.fps,
            top_up_interval: Duration::from_secs(self.top_up_secs),
            seed: self.seed,
            ..GameConfig::default()
        })
    }
}
