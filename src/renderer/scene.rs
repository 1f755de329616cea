//! Turns a render snapshot into triangles
//!
//! Draw order (back to front): player, gun barrel, player bullets, enemies
//! with their health bars, enemy bullets.

use glam::Vec2;

use super::shapes::{bar, circle, rect};
use super::vertex::Vertex;
use crate::colors;
use crate::consts::{GUN_BARREL_EXTRA, GUN_BARREL_WIDTH};
use crate::view::RenderSnapshot;

/// Health bar height and gap above an enemy
const HP_BAR_HEIGHT: f32 = 5.0;
const HP_BAR_OFFSET: f32 = 10.0;

/// Build the full vertex list for a frame, in playfield pixels
pub fn build_scene(snapshot: &RenderSnapshot) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(
        512 + (snapshot.enemies.len() + snapshot.player_bullets.len()) * 64,
    );

    let player = &snapshot.player;
    circle(&mut out, player.pos, player.size, player.color);
    bar(
        &mut out,
        player.pos,
        player.aim_angle,
        player.size + GUN_BARREL_EXTRA,
        GUN_BARREL_WIDTH,
        player.gun_color,
    );

    for b in &snapshot.player_bullets {
        circle(&mut out, b.pos, b.size, b.color);
    }

    for e in &snapshot.enemies {
        circle(&mut out, e.pos, e.size, e.color);

        let bar_min = e.pos - Vec2::new(e.size, e.size + HP_BAR_OFFSET);
        let full = e.size * 2.0;
        rect(
            &mut out,
            bar_min,
            Vec2::new(full, HP_BAR_HEIGHT),
            colors::HP_BAR_BACK,
        );
        rect(
            &mut out,
            bar_min,
            Vec2::new(full * e.hp_fraction(), HP_BAR_HEIGHT),
            colors::HP_BAR_FILL,
        );
    }

    for b in &snapshot.enemy_bullets {
        circle(&mut out, b.pos, b.size, b.color);
    }

    out
}
