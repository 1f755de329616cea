//! Demo autopilot
//!
//! Plays the game without a human: aims at the closest enemy, holds fire
//! while anything is on screen, and backs away from whatever is closest.
//! Used by the native headless runner and by long-running tests.

use glam::Vec2;

use crate::sim::{GameState, MoveKeys, TickInput};

/// Enemies closer than this push the pilot away
const ENEMY_KEEP_AWAY: f32 = 200.0;
/// Enemy bullets closer than this push the pilot away
const BULLET_KEEP_AWAY: f32 = 120.0;
/// With nothing threatening, drift back once this far from the center
const CENTER_SLACK: f32 = 100.0;

/// Synthetic input source driven by a fixed frame clock
#[derive(Debug, Clone)]
pub struct Autopilot {
    frame_ms: f64,
    frame: u64,
}

impl Autopilot {
    pub fn new(frame_ms: f64) -> Self {
        Self { frame_ms, frame: 0 }
    }

    /// Decide the input for the next frame from the current state
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        let now_ms = self.frame as f64 * self.frame_ms;
        self.frame += 1;

        let me = state.player.pos;
        let target = nearest_to(me, state.enemies.iter().map(|e| e.pos));
        let incoming = nearest_to(me, state.enemy_bullets.iter().map(|b| b.pos));

        let threat = match (incoming, target) {
            (Some(b), _) if b.distance(me) < BULLET_KEEP_AWAY => Some(b),
            (_, Some(e)) if e.distance(me) < ENEMY_KEEP_AWAY => Some(e),
            _ => None,
        };

        let steer = match threat {
            Some(t) => me - t,
            None => {
                let to_center = state.bounds() / 2.0 - me;
                if to_center.length() > CENTER_SLACK {
                    to_center
                } else {
                    Vec2::ZERO
                }
            }
        };

        TickInput {
            keys: keys_toward(steer),
            pointer: target.unwrap_or(me + Vec2::X),
            pointer_down: target.is_some(),
            fire_pressed: false,
            now_ms,
        }
    }
}

fn nearest_to(me: Vec2, points: impl Iterator<Item = Vec2>) -> Option<Vec2> {
    points.min_by(|a, b| {
        a.distance_squared(me)
            .partial_cmp(&b.distance_squared(me))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Held keys approximating a movement direction
fn keys_toward(dir: Vec2) -> MoveKeys {
    const DEADZONE: f32 = 1.0;
    MoveKeys {
        up: dir.y < -DEADZONE,
        down: dir.y > DEADZONE,
        left: dir.x < -DEADZONE,
        right: dir.x > DEADZONE,
    }
}
