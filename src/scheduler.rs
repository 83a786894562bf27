//! Fixed-step driver
//!
//! Turns variable frame time into whole simulation ticks, forwards player
//! orders, and hands each published snapshot to a presenter.

use glam::Vec2;

use crate::clamp_to_arena;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameState, Snapshot, TickInput, tick};

/// Consumer of published snapshots (renderer, HUD, recorder)
pub trait Presenter {
    fn render(&mut self, snapshot: &Snapshot);
}

/// Accumulator-based fixed timestep runner
#[derive(Debug, Default)]
pub struct FixedStepScheduler {
    accumulator: f32,
    input: TickInput,
    stopped: bool,
}

impl FixedStepScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a move order from a pointer position (arena-local), clamped
    /// into the arena. Applied on the next tick.
    pub fn queue_move_order(&mut self, state: &GameState, pointer: Vec2) {
        let target = clamp_to_arena(pointer, state.config.arena_width, state.config.arena_height);
        self.input.move_order = Some(target);
    }

    /// Whether the run reached an outcome and ticking stopped
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Run as many ticks as `frame_dt` seconds cover (capped per frame).
    /// Returns the number of ticks run.
    pub fn advance(
        &mut self,
        state: &mut GameState,
        frame_dt: f32,
        presenter: &mut impl Presenter,
    ) -> u32 {
        if self.stopped {
            return 0;
        }

        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // Clear one-shot inputs after processing
            let input = std::mem::take(&mut self.input);
            let snapshot = tick(state, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            presenter.render(&snapshot);

            if snapshot.outcome.is_over() {
                self.stopped = true;
                self.accumulator = 0.0;
                log::info!("Scheduler stopped: {:?}", snapshot.outcome);
                break;
            }
        }

        // Drop backlog we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Start a fresh run on the same state
    pub fn restart(&mut self, state: &mut GameState) {
        state.reset();
        self.accumulator = 0.0;
        self.input = TickInput::default();
        self.stopped = false;
    }
}
