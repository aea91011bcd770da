//! Player input sources.
//!
//! Every source reports edge-triggered actions as an
//! [`InputState`](crate::types::InputState) bitmask: a button held down fires
//! once, not on every poll. Polling is also the loop's only suspension point,
//! so [`InputSource::poll`] waits up to the given timeout before returning.
//!
//! - [`keyboard`]: crossterm key presses (development and terminal play)
//! - [`gpio`]: sysfs GPIO buttons wired to the panel controller
//! - [`edge`]: the armed/disarmed trigger GPIO sampling uses
//!
//! [`Merged`] runs two sources as one, e.g. GPIO buttons plus the keyboard's
//! quit keys while the terminal preview holds raw mode.

pub mod edge;
pub mod gpio;
pub mod keyboard;
pub mod map;

use std::time::Duration;

use anyhow::Result;

pub use led_tetris_types as types;

pub use edge::{EdgeSet, EdgeTrigger};
pub use gpio::{GpioInput, DEFAULT_PINS};
pub use keyboard::{KeyboardInput, DEFAULT_KEY_RELEASE_TIMEOUT};
pub use map::{action_for_key, should_quit};

use crate::types::InputState;

pub trait InputSource {
    /// Wait at most `timeout`, then report the actions that fired.
    fn poll(&mut self, timeout: Duration) -> Result<InputState>;

    /// True once the player asked to leave.
    fn quit_requested(&self) -> bool {
        false
    }
}

impl<S: InputSource + ?Sized> InputSource for Box<S> {
    fn poll(&mut self, timeout: Duration) -> Result<InputState> {
        (**self).poll(timeout)
    }

    fn quit_requested(&self) -> bool {
        (**self).quit_requested()
    }
}

/// Two sources polled as one. `primary` does the waiting and `secondary` is
/// sampled right after it without waiting. Either one can request quit.
#[derive(Debug)]
pub struct Merged<A, B> {
    primary: A,
    secondary: B,
}

impl<A: InputSource, B: InputSource> Merged<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }
}

impl<A: InputSource, B: InputSource> InputSource for Merged<A, B> {
    fn poll(&mut self, timeout: Duration) -> Result<InputState> {
        let fired = self.primary.poll(timeout)?;
        Ok(fired | self.secondary.poll(Duration::ZERO)?)
    }

    fn quit_requested(&self) -> bool {
        self.primary.quit_requested() || self.secondary.quit_requested()
    }
}
