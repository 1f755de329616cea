//! Arena Blaster - A top-down arena shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, combat, progression, frame clock)
//! - `tuning`: Data-driven game balance
//! - `view`: Render and HUD snapshots handed to the presentation layer
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod view;

pub use tuning::{Tuning, TuningError};
pub use view::{HudReadout, Presenter, RenderSnapshot};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal display refresh the balance numbers were tuned against
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HP: u32 = 150;

    /// Ammo is a plain counter that doubles as a percentage
    pub const MAX_AMMO: u32 = 100;
    /// Minimum wall-clock gap between two player shots
    pub const SHOT_COOLDOWN_MS: f64 = 200.0;

    /// Bullets (both pools)
    pub const BULLET_RADIUS: f32 = 6.0;
    pub const ENEMY_BULLET_SPEED: f32 = 5.0;
    pub const ENEMY_BULLET_DAMAGE: u32 = 15;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_BASE_HP: u32 = 30;
    pub const ENEMY_HP_PER_LEVEL: u32 = 5;
    pub const ENEMY_FIRE_RATE: f32 = 0.01;
    pub const ENEMY_BASE_SPEED: f32 = 1.0;
    pub const ENEMY_SPEED_PER_LEVEL: f32 = 0.05;
    /// Chance per tick that a new enemy appears (~every 50 frames at 60 Hz)
    pub const ENEMY_SPAWN_CHANCE: f32 = 0.02;

    /// Kill rewards
    pub const KILL_HEAL: u32 = 3;
    pub const KILL_AMMO: u32 = 3;
    pub const KILL_XP: u32 = 10;

    /// Progression
    pub const XP_PER_LEVEL: u32 = 20;
    pub const LEVELS_PER_WEAPON_UNLOCK: u32 = 5;

    /// Gun barrel drawn past the player's edge
    pub const GUN_BARREL_EXTRA: f32 = 20.0;
    pub const GUN_BARREL_WIDTH: f32 = 10.0;

    /// Shown by the host when the run ends
    pub const GAME_OVER_MESSAGE: &str = "Game Over!";
}

/// Named RGBA colors used by entities and the renderer
pub mod colors {
    pub type Rgba = [f32; 4];

    pub const BACKGROUND: Rgba = [0.118, 0.118, 0.118, 1.0]; // #1e1e1e
    pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];
    pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];
    pub const RED: Rgba = [1.0, 0.0, 0.0, 1.0];
    pub const GREEN: Rgba = [0.0, 0.5, 0.0, 1.0];
    pub const LIME: Rgba = [0.0, 1.0, 0.0, 1.0];
    pub const BLUE: Rgba = [0.0, 0.0, 1.0, 1.0];
    pub const CYAN: Rgba = [0.0, 1.0, 1.0, 1.0];
    pub const LIGHT_BLUE: Rgba = [0.678, 0.847, 0.902, 1.0];
    pub const YELLOW: Rgba = [1.0, 1.0, 0.0, 1.0];
    pub const GOLD: Rgba = [1.0, 0.843, 0.0, 1.0];
    pub const ORANGE: Rgba = [1.0, 0.647, 0.0, 1.0];
    pub const GRAY: Rgba = [0.5, 0.5, 0.5, 1.0];
    pub const PURPLE: Rgba = [0.5, 0.0, 0.5, 1.0];
    pub const MAGENTA: Rgba = [1.0, 0.0, 1.0, 1.0];

    pub const PLAYER: Rgba = YELLOW;
    pub const ENEMY: Rgba = RED;
    pub const ENEMY_BULLET: Rgba = RED;
    pub const HP_BAR_BACK: Rgba = BLACK;
    pub const HP_BAR_FILL: Rgba = GREEN;
}

/// Angle (radians) of the direction from `from` toward `to`
///
/// Coincident points give 0 (aiming along +x), same as `atan2(0, 0)`.
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector pointing along `angle`
#[inline]
pub fn unit_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
