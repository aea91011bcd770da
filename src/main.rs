//! LED Tetris runner (default binary).
//!
//! Streams frames to the LED panel named by `LED_TETRIS_DEVICE` and/or mirrors
//! them in the terminal, reading buttons from sysfs GPIO or the keyboard.
//! See `RunConfig` for the environment variables.

use std::fs::OpenOptions;

use anyhow::{Context, Result};
use crossterm::terminal;
use log::{info, warn};

use led_tetris::core::PieceKind;
use led_tetris::engine::{InputKind, RunConfig, Runner, SystemClock};
use led_tetris::input::{GpioInput, InputSource, KeyboardInput, Merged};
use led_tetris::panel::{open_device, FanOut, PanelLayout, Palette};
use led_tetris::term::TerminalPanel;

fn main() -> Result<()> {
    let config = RunConfig::from_env();
    init_logging(&config)?;

    // Everything that touches the terminal is dropped inside `run`, so the
    // terminal is restored before an error is printed.
    run(&config)
}

fn init_logging(config: &RunConfig) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(path) = &config.log_path {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("can't open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run(config: &RunConfig) -> Result<()> {
    let layout = PanelLayout::default();
    let palette = Palette::standard();
    palette.ensure_covers(PieceKind::ALL.iter().map(|kind| kind.color()))?;

    let mut sinks = FanOut::new();
    if let Some(path) = &config.device {
        sinks.push(Box::new(open_device(path)?));
    }
    if config.preview {
        sinks.push(Box::new(TerminalPanel::open(layout)?));
    }
    if sinks.is_empty() {
        warn!("[Main] no LED device and no preview; frames are discarded");
    }

    // Key events need raw mode even when nothing is drawn.
    let _raw = if config.reads_keyboard() && !config.preview {
        Some(RawMode::enable()?)
    } else {
        None
    };

    // Raw mode swallows Ctrl-C, so GPIO play under the preview keeps the
    // keyboard around for its quit keys.
    let input: Box<dyn InputSource> = match (config.input, config.reads_keyboard()) {
        (InputKind::Keyboard, _) => Box::new(KeyboardInput::open()?),
        (InputKind::Gpio, true) => Box::new(Merged::new(
            KeyboardInput::open()?,
            GpioInput::open_default()?,
        )),
        (InputKind::Gpio, false) => Box::new(GpioInput::open_default()?),
    };

    info!(
        "[Main] seed {}, input {:?}, device {:?}, preview {}",
        config.seed, config.input, config.device, config.preview
    );

    let mut runner = Runner::from_config(config, input, sinks, SystemClock::new())
        .with_layout(layout)
        .with_palette(palette);
    runner.run()
}

/// Raw terminal mode for the lifetime of the guard.
struct RawMode;

impl RawMode {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
