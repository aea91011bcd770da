//! Scripted input for headless runs and tests.

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;

use crate::clock::{Clock, ManualClock};
use crate::input::InputSource;
use crate::types::InputState;

/// Replays a fixed list of input states, one per poll, on a [`ManualClock`].
///
/// Each poll advances the clock by the full timeout, as a real source that saw
/// nothing would. Once the script runs out, polls report no input.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    clock: ManualClock,
    script: VecDeque<InputState>,
    polls: usize,
    quit_after: Option<usize>,
}

impl ScriptedInput {
    pub fn new(clock: ManualClock, script: impl IntoIterator<Item = InputState>) -> Self {
        Self {
            clock,
            script: script.into_iter().collect(),
            polls: 0,
            quit_after: None,
        }
    }

    /// Request quit once `polls` polls have happened.
    pub fn quit_after(mut self, polls: usize) -> Self {
        self.quit_after = Some(polls);
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, timeout: Duration) -> Result<InputState> {
        self.clock.advance(timeout);
        self.polls += 1;
        Ok(self.script.pop_front().unwrap_or_else(InputState::empty))
    }

    fn quit_requested(&self) -> bool {
        self.quit_after.is_some_and(|limit| self.polls >= limit)
    }
}
