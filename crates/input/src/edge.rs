//! Press detection for level-sampled buttons.

use crate::types::{Action, InputState};

/// One button's armed/disarmed state.
///
/// A high sample fires only while armed and disarms the trigger; a low sample
/// re-arms it. Holding a button therefore fires exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeTrigger {
    armed: bool,
}

impl Default for EdgeTrigger {
    fn default() -> Self {
        Self { armed: true }
    }
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Feed one level sample; true on a press edge.
    pub fn sample(&mut self, high: bool) -> bool {
        if !high {
            self.armed = true;
            false
        } else if self.armed {
            self.armed = false;
            true
        } else {
            false
        }
    }
}

/// One trigger per action
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    triggers: [EdgeTrigger; Action::PRIORITY.len()],
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a whole set of levels (bit set = button down) and get the edges.
    pub fn sample(&mut self, levels: InputState) -> InputState {
        let mut fired = InputState::empty();
        for action in Action::PRIORITY {
            if self.triggers[action.index()].sample(levels.contains(action.flag())) {
                fired |= action.flag();
            }
        }
        fired
    }
}
