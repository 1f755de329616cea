//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One tick per display frame, never overlapping
//! - Seeded RNG only
//! - Time enters only through `TickInput::now_ms`

pub mod clock;
pub mod collision;
pub mod combat;
pub mod movement;
pub mod progression;
pub mod state;
pub mod tick;
pub mod weapons;

pub use clock::{FrameOutcome, Simulation};
pub use collision::{circles_overlap, clamp_circle, out_of_bounds};
pub use combat::{
    enemy_actions, maybe_spawn_enemy, shoot_bullet, shoot_enemy_bullet, spawn_enemy,
    update_bullets, update_enemy_bullets,
};
pub use movement::{MoveKeys, move_enemy_toward, move_player};
pub use progression::{LevelUp, award_xp, xp_to_next_level};
pub use state::{Bullet, Enemy, GameEvent, GamePhase, GameState, Player};
pub use tick::{TickInput, TickOutcome, resolve_tick, spawn_step, tick};
pub use weapons::{TIER_COUNT, WEAPONS, Weapon, weapon_for_level};
