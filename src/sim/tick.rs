//! Simulation tick
//!
//! One tick advances the run by one display frame. It is split in two so
//! the frame clock can hand the resolved state to the presenter before the
//! spawn roll, keeping the frame order move → shoot → resolve → render →
//! HUD → spawn.

use glam::Vec2;

use super::combat::{
    enemy_actions, maybe_spawn_enemy, shoot_bullet, update_bullets, update_enemy_bullets,
};
use super::movement::{MoveKeys, move_player};
use super::state::GameState;
use crate::aim_angle;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement keys held right now
    pub keys: MoveKeys,
    /// Pointer position in playfield coordinates
    pub pointer: Vec2,
    /// Pointer button held (auto-fire)
    pub pointer_down: bool,
    /// Pointer was pressed since the previous tick, even if already released
    pub fire_pressed: bool,
    /// Monotonic timestamp in milliseconds (drives the shot cooldown)
    pub now_ms: f64,
}

/// How a tick ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// State was not running; nothing changed
    Skipped,
    /// Keep scheduling ticks
    Continue,
    /// Player died this tick; no further ticks may run
    GameOver,
}

/// Movement, shooting and hit resolution for one tick
///
/// On `GameOver` the remaining steps are skipped so nothing changes after
/// the lethal hit.
pub fn resolve_tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if !state.is_running() {
        return TickOutcome::Skipped;
    }

    state.events.clear();
    state.time_ticks += 1;

    let bounds = state.bounds();
    move_player(&mut state.player, input.keys, bounds);
    state.aim_angle = aim_angle(state.player.pos, input.pointer);

    if input.pointer_down || input.fire_pressed {
        shoot_bullet(state, input.pointer, input.now_ms);
    }

    update_bullets(state);
    if update_enemy_bullets(state) {
        return TickOutcome::GameOver;
    }

    enemy_actions(state);
    TickOutcome::Continue
}

/// End-of-tick spawn roll
pub fn spawn_step(state: &mut GameState) {
    if state.is_running() {
        maybe_spawn_enemy(state);
    }
}

/// Advance the state by one full tick (no presentation in between)
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    let outcome = resolve_tick(state, input);
    if outcome == TickOutcome::Continue {
        spawn_step(state);
    }
    outcome
}
