//! Presentation contract
//!
//! Once per frame the simulation clock hands a read-only [`RenderSnapshot`]
//! and a [`HudReadout`] to a [`Presenter`]. Nothing on the presentation side
//! ever holds a reference into the live `GameState`.

use glam::Vec2;
use serde::Serialize;

use crate::colors::Rgba;
use crate::sim::progression::xp_to_next_level;
use crate::sim::state::{Bullet, GameState};

/// Receives everything the host needs to draw a frame and update its widgets
pub trait Presenter {
    fn render(&mut self, snapshot: &RenderSnapshot);
    fn refresh_hud(&mut self, hud: &HudReadout);
    /// Called exactly once, when the run ends
    fn game_over(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: f32,
    pub color: Rgba,
    pub hp: u32,
    pub max_hp: u32,
    pub ammo: u32,
    /// Barrel color of the equipped weapon
    pub gun_color: Rgba,
    /// Barrel direction (radians)
    pub aim_angle: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub size: f32,
    pub color: Rgba,
    pub hp: u32,
    pub max_hp: u32,
}

impl EnemyView {
    /// Fill fraction for the health bar above the enemy
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.hp as f32 / self.max_hp as f32
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub size: f32,
    pub color: Rgba,
}

impl From<&Bullet> for BulletView {
    fn from(b: &Bullet) -> Self {
        Self {
            pos: b.pos,
            size: b.radius,
            color: b.color,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub width: f32,
    pub height: f32,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub player_bullets: Vec<BulletView>,
    pub enemy_bullets: Vec<BulletView>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let p = &state.player;
        Self {
            width: state.width,
            height: state.height,
            player: PlayerView {
                pos: p.pos,
                size: p.size,
                color: p.color,
                hp: p.hp,
                max_hp: p.max_hp,
                ammo: p.ammo,
                gun_color: p.weapon().color,
                aim_angle: state.aim_angle,
            },
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    pos: e.pos,
                    size: e.size,
                    color: e.color,
                    hp: e.hp,
                    max_hp: e.max_hp,
                })
                .collect(),
            player_bullets: state.player_bullets.iter().map(BulletView::from).collect(),
            enemy_bullets: state.enemy_bullets.iter().map(BulletView::from).collect(),
        }
    }
}

/// Values for the DOM HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudReadout {
    /// Width of the health bar, 0..=100
    pub hp_percent: f32,
    /// "hp/maxHp"
    pub hp_text: String,
    /// Ammo count; also the ammo bar width in percent
    pub ammo: u32,
    pub ammo_text: String,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub weapon_name: &'static str,
}

impl HudReadout {
    pub fn capture(state: &GameState) -> Self {
        let p = &state.player;
        Self {
            hp_percent: p.hp_fraction() * 100.0,
            hp_text: format!("{}/{}", p.hp, p.max_hp),
            ammo: p.ammo,
            ammo_text: p.ammo.to_string(),
            level: p.level,
            xp: p.xp,
            xp_to_next: xp_to_next_level(p, &state.tuning),
            weapon_name: p.weapon().name,
        }
    }
}
