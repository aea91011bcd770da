//! Run configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::warn;

use crate::core::GameConfig;
use crate::types::{FRAME_INTERVAL_US, TOP_OUT_PAUSE_US};

/// Which input source drives the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Keyboard,
    Gpio,
}

impl InputKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyboard" | "kbd" => Some(Self::Keyboard),
            "gpio" => Some(Self::Gpio),
            _ => None,
        }
    }
}

/// Everything the binary needs to start a session
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// LED device node; no hardware output when unset
    pub device: Option<PathBuf>,
    /// Mirror frames to the terminal
    pub preview: bool,
    pub input: InputKind,
    pub seed: u32,
    pub frame_interval_us: u64,
    pub top_out_pause_us: u64,
    pub log_path: Option<PathBuf>,
    pub game: GameConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            device: None,
            preview: true,
            input: InputKind::Keyboard,
            seed: time_seed(),
            frame_interval_us: FRAME_INTERVAL_US,
            top_out_pause_us: TOP_OUT_PAUSE_US,
            log_path: None,
            game: GameConfig::default(),
        }
    }
}

impl RunConfig {
    /// Create from `LED_TETRIS_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RunConfig::from_env`] with a custom variable lookup.
    /// Absent or unparsable values fall back to the defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            get(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let device = non_empty("LED_TETRIS_DEVICE").map(PathBuf::from);

        let preview = match non_empty("LED_TETRIS_PREVIEW") {
            Some(v) => parse_flag(&v).unwrap_or_else(|| {
                warn!("[Config] LED_TETRIS_PREVIEW={:?} is not a flag", v);
                device.is_none()
            }),
            None => device.is_none(),
        };

        let input = match non_empty("LED_TETRIS_INPUT") {
            Some(v) => InputKind::parse(&v).unwrap_or_else(|| {
                warn!("[Config] unknown LED_TETRIS_INPUT={:?}, using keyboard", v);
                InputKind::Keyboard
            }),
            None => InputKind::Keyboard,
        };

        let seed = non_empty("LED_TETRIS_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(time_seed);

        let frame_interval_us = non_empty("LED_TETRIS_FRAME_US")
            .and_then(|s| s.parse().ok())
            .filter(|&us: &u64| us > 0)
            .unwrap_or(FRAME_INTERVAL_US);

        let log_path = non_empty("LED_TETRIS_LOG_PATH").map(PathBuf::from);

        Self {
            device,
            preview,
            input,
            seed,
            frame_interval_us,
            top_out_pause_us: TOP_OUT_PAUSE_US,
            log_path,
            game: GameConfig::default(),
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(self.frame_interval_us)
    }

    pub fn top_out_pause(&self) -> Duration {
        Duration::from_micros(self.top_out_pause_us)
    }

    /// True when the keyboard must be read: it is the input, or the preview
    /// holds the terminal in raw mode and the quit keys are the only way out.
    pub fn reads_keyboard(&self) -> bool {
        self.input == InputKind::Keyboard || self.preview
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
