//! Player and enemy movement

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::clamp_circle;
use super::state::{Enemy, Player};

/// Movement keys held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Step the player by `speed` per held key, then keep it inside the field
///
/// Diagonals are not normalized: two keys move `speed * sqrt(2)`.
pub fn move_player(player: &mut Player, keys: MoveKeys, bounds: Vec2) {
    if keys.up {
        player.pos.y -= player.speed;
    }
    if keys.down {
        player.pos.y += player.speed;
    }
    if keys.left {
        player.pos.x -= player.speed;
    }
    if keys.right {
        player.pos.x += player.speed;
    }
    player.pos = clamp_circle(player.pos, player.size, bounds);
}

/// Move an enemy straight at `target`, `speed` pixels this tick
///
/// An enemy already on the target stays put.
pub fn move_enemy_toward(enemy: &mut Enemy, target: Vec2, speed: f32) {
    let to_target = target - enemy.pos;
    let dist = to_target.length();
    if dist > 0.0 {
        enemy.pos += to_target / dist * speed;
    }
}
