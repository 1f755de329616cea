//! Input collection
//!
//! Browser event handlers write into an `InputCollector` whenever an event
//! arrives; the frame loop reads one [`TickInput`] snapshot at the start of
//! each frame.

use glam::Vec2;

use crate::sim::{MoveKeys, TickInput};

/// A logical movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a `KeyboardEvent.key` value (WASD or arrows, any case)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" | "arrowup" => Some(Direction::Up),
            "s" | "arrowdown" => Some(Direction::Down),
            "a" | "arrowleft" => Some(Direction::Left),
            "d" | "arrowright" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Most recent input state, as reported by the host's event handlers
#[derive(Debug, Clone, Default)]
pub struct InputCollector {
    keys: MoveKeys,
    pointer: Vec2,
    pointer_down: bool,
    /// Set on press, cleared once a snapshot has seen it
    fire_pressed: bool,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the key is a movement key
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set_key(key, true)
    }

    /// Returns `true` if the key is a movement key
    pub fn key_up(&mut self, key: &str) -> bool {
        self.set_key(key, false)
    }

    fn set_key(&mut self, key: &str, held: bool) -> bool {
        let Some(dir) = Direction::from_key(key) else {
            return false;
        };
        match dir {
            Direction::Up => self.keys.up = held,
            Direction::Down => self.keys.down = held,
            Direction::Left => self.keys.left = held,
            Direction::Right => self.keys.right = held,
        }
        true
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    pub fn pointer_pressed(&mut self) {
        self.pointer_down = true;
        self.fire_pressed = true;
    }

    pub fn pointer_released(&mut self) {
        self.pointer_down = false;
    }

    /// Forget a click that has not reached a snapshot yet
    ///
    /// Hosts call this when a run starts so the press on the start button
    /// does not become the first shot.
    pub fn discard_pending_fire(&mut self) {
        self.fire_pressed = false;
    }

    pub fn keys(&self) -> MoveKeys {
        self.keys
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Input for the next tick; consumes a pending click
    pub fn snapshot(&mut self, now_ms: f64) -> TickInput {
        let input = TickInput {
            keys: self.keys,
            pointer: self.pointer,
            pointer_down: self.pointer_down,
            fire_pressed: self.fire_pressed,
            now_ms,
        };
        self.fire_pressed = false;
        input
    }
}
