//! Panel controller buttons via the sysfs GPIO interface.
//!
//! Each button is an input pin with a pull-down: `value` reads `1` while the
//! button is held. Pins are exported once at startup, then every poll reads a
//! single byte from each pin's `value` file and rewinds it.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use arrayvec::ArrayVec;
use log::{info, warn};

use crate::edge::EdgeSet;
use crate::types::{Action, InputState};
use crate::InputSource;

/// Sysfs GPIO root
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

/// Controller wiring: `(gpio number, action)`
pub const DEFAULT_PINS: [(u32, Action); 5] = [
    (45, Action::RotateRight),
    (23, Action::RotateLeft),
    (47, Action::MoveLeft),
    (27, Action::MoveRight),
    (22, Action::SoftDrop),
];

#[derive(Debug)]
struct Pin {
    gpio: u32,
    action: Action,
    /// `None` when the value file could not be opened or stopped being readable
    value: Option<File>,
}

impl Pin {
    /// Current level, or `None` if the pin can't be sampled
    fn read_level(&mut self) -> Option<bool> {
        let file = self.value.as_mut()?;
        let mut byte = [0u8; 1];
        let level = match file.read(&mut byte) {
            Ok(n) if n > 0 => match byte[0] {
                b'1' => Some(true),
                b'0' => Some(false),
                _ => None,
            },
            Ok(_) => None,
            Err(e) => {
                warn!("[Gpio] gpio{} unreadable, disabling: {}", self.gpio, e);
                self.value = None;
                return None;
            }
        };
        if let Err(e) = file.seek(SeekFrom::Start(0)) {
            warn!("[Gpio] gpio{} rewind failed, disabling: {}", self.gpio, e);
            self.value = None;
        }
        level
    }
}

#[derive(Debug)]
pub struct GpioInput {
    pins: ArrayVec<Pin, 5>,
    edges: EdgeSet,
}

impl GpioInput {
    /// Export and open the default controller pins under `/sys/class/gpio`.
    pub fn open_default() -> Result<Self> {
        Self::open(SYSFS_GPIO_ROOT, &DEFAULT_PINS)
    }

    /// Export and open `pins` under a sysfs-style `root`.
    ///
    /// Pins that can't be opened are kept but never fire; a missing pin is a
    /// wiring problem, not a reason to stop the game.
    pub fn open(root: impl AsRef<Path>, pins: &[(u32, Action)]) -> Result<Self> {
        let root = root.as_ref();
        let mut opened = ArrayVec::new();

        for &(gpio, action) in pins.iter().take(5) {
            export(root, gpio);
            let path = value_path(root, gpio);
            let value = match File::open(&path) {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!("[Gpio] can't open {}: {}", path.display(), e);
                    None
                }
            };
            opened.push(Pin { gpio, action, value });
        }

        let live = opened.iter().filter(|p| p.value.is_some()).count();
        info!("[Gpio] {} of {} button pins live", live, opened.len());
        Ok(Self {
            pins: opened,
            edges: EdgeSet::new(),
        })
    }

    /// Number of pins that are still being sampled
    pub fn live_pins(&self) -> usize {
        self.pins.iter().filter(|p| p.value.is_some()).count()
    }

    /// Sample every pin once, without waiting. Pins that can't be read
    /// count as released.
    pub fn sample(&mut self) -> InputState {
        let mut levels = InputState::empty();
        for pin in &mut self.pins {
            if pin.read_level() == Some(true) {
                levels |= pin.action.flag();
            }
        }
        self.edges.sample(levels)
    }
}

impl InputSource for GpioInput {
    fn poll(&mut self, timeout: Duration) -> Result<InputState> {
        if !timeout.is_zero() {
            thread::sleep(timeout);
        }
        Ok(self.sample())
    }
}

fn value_path(root: &Path, gpio: u32) -> PathBuf {
    root.join(format!("gpio{}", gpio)).join("value")
}

/// Ask the kernel to expose a pin. Already-exported pins make the write fail,
/// which is harmless.
fn export(root: &Path, gpio: u32) {
    if value_path(root, gpio).exists() {
        return;
    }
    let result = OpenOptions::new()
        .write(true)
        .open(root.join("export"))
        .and_then(|mut f| f.write_all(gpio.to_string().as_bytes()));
    if let Err(e) = result {
        warn!("[Gpio] export gpio{} failed: {}", gpio, e);
    }
}

/// Create a fake sysfs tree with every pin low. Used by tests.
pub fn create_fake_sysfs(root: &Path, pins: &[(u32, Action)]) -> std::io::Result<()> {
    fs::create_dir_all(root)?;
    fs::write(root.join("export"), b"")?;
    for &(gpio, _) in pins {
        let dir = root.join(format!("gpio{}", gpio));
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("value"), b"0\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_root(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "led-tetris-gpio-{}-{}",
            std::process::id(),
            name
        ));
        let _ = fs::remove_dir_all(&root);
        create_fake_sysfs(&root, &DEFAULT_PINS).unwrap();
        root
    }

    fn set_level(root: &Path, gpio: u32, high: bool) {
        let value = if high { b"1\n" } else { b"0\n" };
        fs::write(value_path(root, gpio), value).unwrap();
    }

    #[test]
    fn test_press_fires_once_until_release() {
        let root = fake_root("press");
        let mut input = GpioInput::open(&root, &DEFAULT_PINS).unwrap();
        assert_eq!(input.live_pins(), 5);
        assert_eq!(input.sample(), InputState::empty());

        set_level(&root, 47, true);
        assert_eq!(input.sample(), InputState::MOVE_LEFT);
        assert_eq!(input.sample(), InputState::empty());

        set_level(&root, 47, false);
        assert_eq!(input.sample(), InputState::empty());
        set_level(&root, 47, true);
        assert_eq!(input.poll(Duration::ZERO).unwrap(), InputState::MOVE_LEFT);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_simultaneous_presses_share_one_poll() {
        let root = fake_root("chord");
        let mut input = GpioInput::open(&root, &DEFAULT_PINS).unwrap();

        set_level(&root, 45, true);
        set_level(&root, 22, true);
        assert_eq!(
            input.sample(),
            InputState::ROTATE_RIGHT | InputState::SOFT_DROP
        );

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_missing_pin_is_skipped() {
        let root = fake_root("missing");
        fs::remove_dir_all(root.join("gpio23")).unwrap();
        // Export is a plain file here, so the pin never appears.
        let input = GpioInput::open(&root, &DEFAULT_PINS).unwrap();
        assert_eq!(input.live_pins(), 4);

        let _ = fs::remove_dir_all(&root);
    }
}
