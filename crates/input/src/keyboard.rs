//! Keyboard input through crossterm.
//!
//! A held key behaves like a held panel button: one action per press. Most
//! terminals send auto-repeat as more press events and never send releases,
//! so each action keeps a held-key record that only re-arms on a release
//! event or after [`DEFAULT_KEY_RELEASE_TIMEOUT`] without any event for it.
//! Terminals that support the keyboard enhancement protocol are asked to
//! report releases, which makes the timeout unnecessary.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use log::info;

use crate::map::{action_for_key, should_quit};
use crate::types::{Action, InputState};
use crate::InputSource;

// Longer than the usual auto-repeat delay (250-500 ms), so a held key has
// started repeating before its record expires.
pub const DEFAULT_KEY_RELEASE_TIMEOUT: Duration = Duration::from_millis(600);

#[derive(Debug)]
pub struct KeyboardInput {
    /// Last press or repeat seen per action, `None` once released
    held: [Option<Instant>; Action::PRIORITY.len()],
    release_timeout: Duration,
    /// Set after the first release event; holds then last until released
    reports_release: bool,
    enhanced: bool,
    quit: bool,
}

impl Default for KeyboardInput {
    fn default() -> Self {
        Self {
            held: Default::default(),
            release_timeout: DEFAULT_KEY_RELEASE_TIMEOUT,
            reports_release: false,
            enhanced: false,
            quit: false,
        }
    }
}

impl KeyboardInput {
    /// Keyboard source that leaves the terminal's key reporting alone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyboard source that also asks the terminal for release events when it
    /// supports them. The request is undone on drop.
    pub fn open() -> Result<Self> {
        let mut input = Self::new();
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            input.enhanced = true;
            info!("[Keyboard] terminal reports key releases");
        }
        Ok(input)
    }

    pub fn with_release_timeout(mut self, timeout: Duration) -> Self {
        self.release_timeout = timeout;
        self
    }

    /// Fold one key event, seen at `now`, into `fired`.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant, fired: &mut InputState) {
        if key.kind == KeyEventKind::Release {
            self.reports_release = true;
            if let Some(action) = action_for_key(key) {
                self.held[action.index()] = None;
            }
            return;
        }
        if key.kind == KeyEventKind::Press && should_quit(key) {
            self.quit = true;
            return;
        }
        let Some(action) = action_for_key(key) else {
            return;
        };

        let still_held = match self.held[action.index()] {
            Some(last) => {
                self.reports_release
                    || now.saturating_duration_since(last) < self.release_timeout
            }
            None => false,
        };
        self.held[action.index()] = Some(now);
        if !still_held && key.kind == KeyEventKind::Press {
            *fired |= action.flag();
        }
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self, timeout: Duration) -> Result<InputState> {
        let mut fired = InputState::empty();
        if !event::poll(timeout)? {
            return Ok(fired);
        }

        // Drain everything already queued so a burst lands in one poll.
        loop {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key, Instant::now(), &mut fired);
            }
            if !event::poll(Duration::ZERO)? {
                break;
            }
        }
        Ok(fired)
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

impl Drop for KeyboardInput {
    fn drop(&mut self) {
        if self.enhanced {
            let mut stdout = io::stdout();
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
            let _ = stdout.flush();
        }
    }
}
