//! Real-time loop: poll input, push frames, fire gravity on cadence.
//!
//! One call to [`Runner::run_period`] covers one gravity period:
//!
//! ```text
//! spawn if needed
//! while elapsed < drop interval:
//!     poll input (bounded by the frame interval)
//!     soft drop -> stop waiting
//!     otherwise  -> compose, map, send one frame
//! gravity tick (top-out -> pause)
//! ```
//!
//! The loop owns everything it touches. Frame transmission and input errors
//! are returned to the caller; there is no retry here.

use std::time::Duration;

use anyhow::Result;
use log::info;

use crate::clock::Clock;
use crate::config::RunConfig;
use crate::core::{GameState, InputOutcome, TickOutcome};
use crate::input::InputSource;
use crate::panel::{render_into, FrameSink, PanelLayout, Palette};
use crate::types::{Rgb, FRAME_INTERVAL_US, TOP_OUT_PAUSE_US};

/// How a gravity period ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Tick(TickOutcome),
    /// The input source asked to stop
    Quit,
}

pub struct Runner<I, S, C> {
    game: GameState,
    layout: PanelLayout,
    palette: Palette,
    input: I,
    sink: S,
    clock: C,
    frame_interval: Duration,
    top_out_pause: Duration,
    pixels: Vec<Rgb>,
    last_tick: Duration,
    frames_sent: u64,
}

impl<I: InputSource, S: FrameSink, C: Clock> Runner<I, S, C> {
    /// Runner with the panel's default layout and the standard palette.
    pub fn new(game: GameState, input: I, sink: S, clock: C) -> Self {
        let layout = PanelLayout::default();
        let last_tick = clock.now();
        Self {
            game,
            layout,
            palette: Palette::standard(),
            input,
            sink,
            clock,
            frame_interval: Duration::from_micros(FRAME_INTERVAL_US),
            top_out_pause: Duration::from_micros(TOP_OUT_PAUSE_US),
            pixels: Vec::with_capacity(layout.len()),
            last_tick,
            frames_sent: 0,
        }
    }

    /// Build a runner from a [`RunConfig`]: game tunables, seed and pacing.
    pub fn from_config(config: &RunConfig, input: I, sink: S, clock: C) -> Self {
        let game = GameState::with_config(config.game, config.seed);
        Self::new(game, input, sink, clock)
            .with_frame_interval(config.frame_interval())
            .with_top_out_pause(config.top_out_pause())
    }

    pub fn with_layout(mut self, layout: PanelLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval.max(Duration::from_micros(1));
        self
    }

    pub fn with_top_out_pause(mut self, pause: Duration) -> Self {
        self.top_out_pause = pause;
        self
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    /// Run until the input source asks to quit or an error occurs.
    pub fn run(&mut self) -> Result<()> {
        info!(
            "[Runner] starting: {}x{} grid, {} pixels, frame every {:?}",
            self.game.config().width,
            self.game.config().height,
            self.layout.len(),
            self.frame_interval
        );
        loop {
            if let Step::Quit = self.run_period()? {
                info!(
                    "[Runner] quit after {} frame(s); session: {} piece(s), {} row(s)",
                    self.frames_sent,
                    self.game.pieces_locked(),
                    self.game.rows_cleared()
                );
                return Ok(());
            }
        }
    }

    /// Run one gravity period and its tick.
    pub fn run_period(&mut self) -> Result<Step> {
        self.game.ensure_piece();

        loop {
            let interval = Duration::from_micros(self.game.drop_interval_us());
            let elapsed = self.clock.now().saturating_sub(self.last_tick);
            if elapsed >= interval {
                break;
            }

            let fired = self.input.poll((interval - elapsed).min(self.frame_interval))?;
            if self.input.quit_requested() {
                return Ok(Step::Quit);
            }
            if let InputOutcome::SoftDrop = self.game.apply_input(fired) {
                break;
            }
            self.push_frame()?;
        }

        self.last_tick = self.clock.now();
        let outcome = self.game.gravity_tick();
        if outcome == TickOutcome::ToppedOut {
            info!("[Runner] top-out, pausing {:?}", self.top_out_pause);
            self.clock.sleep(self.top_out_pause);
            self.last_tick = self.clock.now();
        }
        Ok(Step::Tick(outcome))
    }

    /// Compose the current picture and send it.
    pub fn push_frame(&mut self) -> Result<()> {
        let grid = self.game.compose();
        render_into(grid, &self.layout, &self.palette, &mut self.pixels);
        self.sink.send(&self.pixels)?;
        self.frames_sent += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::core::{GameConfig, Grid, PieceKind};
    use crate::panel::{ColorLookup, RecordingSink};
    use crate::script::ScriptedInput;
    use crate::types::{ColorTag, InputState, START_DROP_INTERVAL_US};

    fn small_game() -> GameState {
        GameState::with_config(
            GameConfig {
                width: 6,
                height: 8,
                ..GameConfig::default()
            },
            7,
        )
    }

    fn runner(
        script: Vec<InputState>,
    ) -> (Runner<ScriptedInput, RecordingSink, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let input = ScriptedInput::new(clock.clone(), script);
        let runner = Runner::new(small_game(), input, RecordingSink::new(), clock.clone())
            .with_layout(PanelLayout::new(12, 16, 2));
        (runner, clock)
    }

    #[test]
    fn test_period_pushes_one_frame_per_poll() {
        let (mut runner, clock) = runner(vec![]);
        let step = runner.run_period().unwrap();

        assert_eq!(step, Step::Tick(TickOutcome::Fell));
        assert_eq!(clock.now(), Duration::from_micros(START_DROP_INTERVAL_US));
        let polls = START_DROP_INTERVAL_US / FRAME_INTERVAL_US;
        assert_eq!(runner.frames_sent(), polls);
        assert_eq!(runner.sink().frames().len() as u64, polls);
        assert!(runner.sink().frames().iter().all(|f| f.len() == 192));
    }

    #[test]
    fn test_soft_drop_ends_wait_without_frame() {
        let (mut runner, clock) = runner(vec![InputState::SOFT_DROP]);
        runner.game_mut().spawn_kind(PieceKind::T);
        let y = runner.game().active().unwrap().y;

        assert_eq!(runner.run_period().unwrap(), Step::Tick(TickOutcome::Fell));
        assert_eq!(clock.now(), Duration::from_micros(FRAME_INTERVAL_US));
        assert_eq!(runner.frames_sent(), 0);
        assert_eq!(runner.game().active().unwrap().y, y - 1);
    }

    #[test]
    fn test_moves_show_up_in_the_next_frame() {
        let (mut runner, _clock) = runner(vec![InputState::MOVE_LEFT]);
        runner.game_mut().spawn_kind(PieceKind::O);
        runner.run_period().unwrap();

        // O spawns at x 3..=4; after the move it covers x 2..=3 on row 7.
        let frame = &runner.sink().frames()[0];
        let layout = PanelLayout::new(12, 16, 2);
        let yellow = Palette::standard().lookup(ColorTag::YELLOW).unwrap();
        for (i, (row, col)) in layout.positions().enumerate() {
            let (x, y) = layout.cell_of(row, col);
            let lit = (x == 2 || x == 3) && (y == 7);
            assert_eq!(frame[i] == yellow, lit, "pixel {} at cell ({}, {})", i, x, y);
        }
    }

    #[test]
    fn test_top_out_pauses_and_restarts() {
        let (mut runner, clock) = runner(vec![]);
        runner = runner.with_top_out_pause(Duration::from_secs(5));
        *runner.game_mut().grid_mut() = Grid::from_rows(&[
            "......",
            "rrrrr.",
            "......",
            "......",
            "......",
            "......",
            "......",
            "......",
        ]);
        runner.game_mut().spawn_kind(PieceKind::I);

        let step = runner.run_period().unwrap();
        assert_eq!(step, Step::Tick(TickOutcome::ToppedOut));
        assert!(runner.game().grid().is_empty());
        assert!(runner.game().new_piece_required());
        assert_eq!(
            clock.now(),
            Duration::from_micros(START_DROP_INTERVAL_US) + Duration::from_secs(5)
        );

        // Play resumes with a fresh piece and a full period.
        assert_eq!(runner.run_period().unwrap(), Step::Tick(TickOutcome::Fell));
    }

    #[test]
    fn test_quit_stops_run() {
        let clock = ManualClock::new();
        let input = ScriptedInput::new(clock.clone(), vec![]).quit_after(10);
        let mut runner = Runner::new(small_game(), input, RecordingSink::new(), clock);
        runner.run().unwrap();
        assert_eq!(runner.frames_sent(), 9);
    }
}
