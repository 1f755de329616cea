//! Game state and core simulation types
//!
//! One `GameState` holds everything a run needs. It is created when the
//! page loads and replaced wholesale after a game over; nothing in it is
//! reset piecemeal.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::weapons::{Weapon, weapon_for_level};
use crate::colors::{self, Rgba};
use crate::consts::MAX_AMMO;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start button
    Ready,
    /// Active gameplay
    Running,
    /// Player died; terminal for this state
    GameOver,
}

/// Things that happened during the last tick (for logging and HUD effects)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    EnemySpawned { pos: Vec2, hp: u32 },
    PlayerFired { weapon_level: usize },
    EnemyHit { damage: u32, remaining_hp: u32 },
    EnemyKilled { pos: Vec2 },
    EnemyFired { pos: Vec2 },
    PlayerHit { damage: u32, remaining_hp: u32 },
    LevelUp { level: u32 },
    WeaponUnlocked { weapon_level: usize },
    GameOver,
}

/// The player's avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Collision radius
    pub size: f32,
    /// Pixels per tick per held key
    pub speed: f32,
    pub hp: u32,
    pub max_hp: u32,
    /// 0..=MAX_AMMO
    pub ammo: u32,
    pub xp: u32,
    /// Starts at 1
    pub level: u32,
    /// 1-based index into the weapon table
    pub weapon_level: usize,
    pub color: Rgba,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            size: tuning.player_size,
            speed: tuning.player_speed,
            hp: tuning.player_max_hp,
            max_hp: tuning.player_max_hp,
            ammo: MAX_AMMO,
            xp: 0,
            level: 1,
            weapon_level: 1,
            color: colors::PLAYER,
        }
    }

    /// The currently equipped weapon tier
    pub fn weapon(&self) -> &'static Weapon {
        weapon_for_level(self.weapon_level)
    }

    /// Restore hp up to `max_hp`; returns the amount actually healed
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hp - self.hp.min(self.max_hp));
        self.hp += healed;
        healed
    }

    /// Refill ammo up to `MAX_AMMO`; returns the amount actually added
    pub fn add_ammo(&mut self, amount: u32) -> u32 {
        let added = amount.min(MAX_AMMO - self.ammo.min(MAX_AMMO));
        self.ammo += added;
        added
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    /// hp / max_hp in [0, 1]
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.hp as f32 / self.max_hp as f32
        }
    }
}

/// A hostile that homes in on the player and shoots at it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    /// Collision radius
    pub size: f32,
    pub hp: u32,
    pub max_hp: u32,
    /// Chance per tick of firing at the player
    pub fire_rate: f32,
    pub color: Rgba,
}

impl Enemy {
    pub fn new(pos: Vec2, hp: u32, tuning: &Tuning) -> Self {
        Self {
            pos,
            size: tuning.enemy_size,
            hp,
            max_hp: hp,
            fire_rate: tuning.enemy_fire_rate,
            color: colors::ENEMY,
        }
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }
}

/// A projectile; the same type serves both the player and enemy pools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
    pub damage: u32,
    pub color: Rgba,
}

impl Bullet {
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Playfield is [0, width] x [0, height], +y down
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    /// Direction from player to pointer, refreshed every tick
    pub aim_angle: f32,
    /// Timestamp (ms) of the last successful player shot
    pub last_shot_ms: Option<f64>,
    pub tuning: Tuning,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create a new run with the player centered in a `width` x `height` field
    pub fn new(seed: u64, width: f32, height: f32, tuning: Tuning) -> Self {
        let player = Player::new(Vec2::new(width / 2.0, height / 2.0), &tuning);
        Self {
            seed,
            width,
            height,
            phase: GamePhase::Ready,
            time_ticks: 0,
            player,
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            aim_angle: 0.0,
            last_shot_ms: None,
            tuning,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// The run's deterministic random source
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Playfield extent as a vector (width, height)
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7, 800.0, 600.0, Tuning::default());
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.hp, 150);
        assert_eq!(state.player.max_hp, 150);
        assert_eq!(state.player.ammo, MAX_AMMO);
        assert_eq!(state.player.level, 1);
        assert_eq!(state.player.weapon_level, 1);
        assert!(state.enemies.is_empty());
        assert!(state.player_bullets.is_empty());
        assert!(state.enemy_bullets.is_empty());
    }

    #[test]
    fn test_heal_and_ammo_cap() {
        let mut player = Player::new(Vec2::ZERO, &Tuning::default());
        player.hp = 149;
        assert_eq!(player.heal(3), 1);
        assert_eq!(player.hp, 150);

        player.ammo = 99;
        assert_eq!(player.add_ammo(3), 1);
        assert_eq!(player.ammo, MAX_AMMO);

        player.ammo = 10;
        assert_eq!(player.add_ammo(3), 3);
        assert_eq!(player.ammo, 13);
    }

    #[test]
    fn test_damage_saturates() {
        let mut player = Player::new(Vec2::ZERO, &Tuning::default());
        player.hp = 10;
        player.take_damage(15);
        assert_eq!(player.hp, 0);
        assert!(player.is_dead());

        let mut enemy = Enemy::new(Vec2::ZERO, 35, &Tuning::default());
        enemy.take_damage(15);
        assert_eq!(enemy.hp, 20);
        assert!(!enemy.is_dead());
        enemy.take_damage(25);
        assert!(enemy.is_dead());
        assert_eq!(enemy.max_hp, 35);
    }
}
