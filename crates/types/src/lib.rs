//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the game core, the panel mapper,
//! the input sources and the terminal preview alike.
//!
//! # Grid and Panel Dimensions
//!
//! The playfield is 12 columns by 25 rows. Row 0 is the **bottom** row and
//! pieces spawn at the top (`GRID_HEIGHT - 1`), centered at `GRID_WIDTH / 2`.
//!
//! The LED panel is wired as 25 panel rows of 50 pixels each. With an
//! expansion factor of 2 every logical cell covers a 2x2 block of pixels, so a
//! panel row maps to a grid column and a panel column maps to a grid row.
//!
//! # Timing Constants
//!
//! Timing values are in microseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `START_DROP_INTERVAL_US` | 600 000 | Gravity cadence at the start of a session |
//! | `DROP_INTERVAL_DECREMENT_US` | 30 000 | Speed-up applied after a lock that clears rows |
//! | `MIN_DROP_INTERVAL_US` | 30 000 | Fastest gravity cadence |
//! | `FRAME_INTERVAL_US` | 2 000 | Input sampling / frame push interval |
//! | `TOP_OUT_PAUSE_US` | 5 000 000 | Pause before a restart after a top-out |

use bitflags::bitflags;

/// Playfield dimensions (logical cells)
pub const GRID_WIDTH: usize = 12;
pub const GRID_HEIGHT: usize = 25;

/// Physical panel geometry
pub const PANEL_ROWS: usize = 25;
pub const PANEL_COLS: usize = 50;
pub const PANEL_LEDS: usize = PANEL_ROWS * PANEL_COLS;
pub const EXPAND_FACTOR: usize = 2;

/// Gravity timing (microseconds)
pub const START_DROP_INTERVAL_US: u64 = 600_000;
pub const DROP_INTERVAL_DECREMENT_US: u64 = 30_000;
pub const MIN_DROP_INTERVAL_US: u64 = 30_000;

/// Loop pacing (microseconds)
pub const FRAME_INTERVAL_US: u64 = 2_000;
pub const TOP_OUT_PAUSE_US: u64 = 5_000_000;

/// SPI device the panel is wired to on the reference board.
pub const DEFAULT_SPI_DEVICE: &str = "/dev/spidev2.0";

/// Single-character color tag stored in every grid cell.
///
/// Tags are resolved to real colors by a color lookup at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorTag(pub char);

impl ColorTag {
    /// Unoccupied cell (renders black)
    pub const EMPTY: ColorTag = ColorTag('x');
    pub const CYAN: ColorTag = ColorTag('c');
    pub const BLUE: ColorTag = ColorTag('b');
    pub const ORANGE: ColorTag = ColorTag('o');
    pub const YELLOW: ColorTag = ColorTag('y');
    pub const GREEN: ColorTag = ColorTag('g');
    pub const PURPLE: ColorTag = ColorTag('p');
    pub const RED: ColorTag = ColorTag('r');

    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl Default for ColorTag {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// 24-bit RGB color of one physical LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

bitflags! {
    /// Edge-triggered actions reported by one input poll.
    ///
    /// Bit positions match the controller wiring: one bit per button.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InputState: u8 {
        const ROTATE_RIGHT = 1 << 0;
        const ROTATE_LEFT = 1 << 1;
        const MOVE_LEFT = 1 << 2;
        const MOVE_RIGHT = 1 << 3;
        const SOFT_DROP = 1 << 4;
    }
}

/// A single player action, resolved from an [`InputState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    RotateRight,
    RotateLeft,
    MoveRight,
    MoveLeft,
    SoftDrop,
}

impl Action {
    /// Dispatch priority: when several bits are set in one poll only the
    /// first action in this list is applied.
    pub const PRIORITY: [Action; 5] = [
        Action::RotateRight,
        Action::RotateLeft,
        Action::MoveRight,
        Action::MoveLeft,
        Action::SoftDrop,
    ];

    /// Position in [`Action::PRIORITY`], usable as an array slot.
    pub fn index(self) -> usize {
        match self {
            Action::RotateRight => 0,
            Action::RotateLeft => 1,
            Action::MoveRight => 2,
            Action::MoveLeft => 3,
            Action::SoftDrop => 4,
        }
    }

    pub fn flag(self) -> InputState {
        match self {
            Action::RotateRight => InputState::ROTATE_RIGHT,
            Action::RotateLeft => InputState::ROTATE_LEFT,
            Action::MoveRight => InputState::MOVE_RIGHT,
            Action::MoveLeft => InputState::MOVE_LEFT,
            Action::SoftDrop => InputState::SOFT_DROP,
        }
    }
}

impl InputState {
    /// The single action this poll dispatches, if any.
    pub fn primary_action(self) -> Option<Action> {
        Action::PRIORITY
            .into_iter()
            .find(|action| self.contains(action.flag()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_action_follows_priority() {
        let both = InputState::MOVE_LEFT | InputState::ROTATE_LEFT;
        assert_eq!(both.primary_action(), Some(Action::RotateLeft));

        let lateral = InputState::MOVE_LEFT | InputState::MOVE_RIGHT;
        assert_eq!(lateral.primary_action(), Some(Action::MoveRight));

        assert_eq!(InputState::empty().primary_action(), None);
    }

    #[test]
    fn test_action_flags_are_distinct() {
        let mut all = InputState::empty();
        for action in Action::PRIORITY {
            assert!(!all.contains(action.flag()));
            all |= action.flag();
        }
        assert_eq!(all, InputState::all());
    }

    #[test]
    fn test_index_matches_priority_position() {
        for (i, action) in Action::PRIORITY.into_iter().enumerate() {
            assert_eq!(action.index(), i);
        }
    }

    #[test]
    fn test_panel_covers_grid() {
        assert_eq!(PANEL_LEDS, 1250);
        assert!(PANEL_ROWS.div_ceil(EXPAND_FACTOR) >= GRID_WIDTH);
        assert_eq!(PANEL_COLS / EXPAND_FACTOR, GRID_HEIGHT);
    }
}
