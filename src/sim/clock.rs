//! Frame clock
//!
//! `Simulation` owns the single `GameState` of a run and drives it one frame
//! at a time. The host calls [`Simulation::frame`] from its display-synced
//! callback and schedules the next callback only while the result is
//! [`FrameOutcome::Continue`], so frames never overlap and none run after
//! game over.

use super::state::{GamePhase, GameState};
use super::tick::{TickInput, TickOutcome, resolve_tick, spawn_step};
use crate::consts::GAME_OVER_MESSAGE;
use crate::tuning::Tuning;
use crate::view::{HudReadout, Presenter, RenderSnapshot};

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Not running (not started yet, or already over); nothing happened
    Idle,
    /// Schedule the next frame
    Continue,
    /// The run just ended; stop scheduling
    GameOver,
}

/// A run plus its running gate
#[derive(Debug)]
pub struct Simulation {
    state: GameState,
    running: bool,
}

impl Simulation {
    pub fn new(seed: u64, width: f32, height: f32, tuning: Tuning) -> Self {
        log::info!(
            "New run: seed {}, field {}x{}",
            seed,
            width as u32,
            height as u32
        );
        Self {
            state: GameState::new(seed, width, height, tuning),
            running: false,
        }
    }

    /// Read-only view of the current run
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin the run; returns `false` if it was already started or is over
    pub fn start(&mut self) -> bool {
        if self.state.phase != GamePhase::Ready {
            return false;
        }
        self.state.phase = GamePhase::Running;
        self.running = true;
        log::info!("Run started");
        true
    }

    /// Run one frame: resolve, present, then roll the spawn
    pub fn frame<P: Presenter + ?Sized>(
        &mut self,
        input: &TickInput,
        presenter: &mut P,
    ) -> FrameOutcome {
        if !self.running {
            return FrameOutcome::Idle;
        }

        match resolve_tick(&mut self.state, input) {
            TickOutcome::Continue => {}
            TickOutcome::GameOver => {
                self.running = false;
                presenter.refresh_hud(&HudReadout::capture(&self.state));
                presenter.game_over(GAME_OVER_MESSAGE);
                return FrameOutcome::GameOver;
            }
            TickOutcome::Skipped => {
                self.running = false;
                return FrameOutcome::Idle;
            }
        }

        presenter.render(&RenderSnapshot::capture(&self.state));
        presenter.refresh_hud(&HudReadout::capture(&self.state));
        spawn_step(&mut self.state);
        FrameOutcome::Continue
    }

    /// Throw the run away and begin a fresh one (not started)
    pub fn restart(&mut self, seed: u64) {
        let (width, height) = (self.state.width, self.state.height);
        let tuning = self.state.tuning.clone();
        *self = Self::new(seed, width, height, tuning);
    }
}
