//! Spawning, shooting, bullet advancement and hit resolution
//!
//! Removal during a pass is mark-and-compact: bullets are filtered with
//! `retain_mut` on a detached pool, and killed enemies stay in place (hp 0,
//! ignored as targets) until the pass finishes. Every live entry is visited
//! exactly once per tick no matter what gets removed.

use glam::Vec2;
use rand::Rng;

use super::collision::{circles_overlap, out_of_bounds};
use super::progression::award_xp;
use super::state::{Bullet, Enemy, GameEvent, GamePhase, GameState};
use super::weapons::weapon_for_level;
use crate::colors;
use crate::{aim_angle, unit_from_angle};

/// Add one enemy at a uniformly random point in the playfield
///
/// Its hit points scale with the player's level at this moment.
pub fn spawn_enemy(state: &mut GameState) {
    let (width, height) = (state.width, state.height);
    let x = state.rng().random::<f32>() * width;
    let y = state.rng().random::<f32>() * height;
    let pos = Vec2::new(x, y);

    let hp = state.tuning.enemy_hp_for_level(state.player.level);
    state.enemies.push(Enemy::new(pos, hp, &state.tuning));
    log::debug!("Enemy spawned at ({:.0}, {:.0}) with {} hp", x, y, hp);
    state.emit(GameEvent::EnemySpawned { pos, hp });
}

/// Roll the per-tick spawn chance; returns whether an enemy appeared
pub fn maybe_spawn_enemy(state: &mut GameState) -> bool {
    let roll: f32 = state.rng().random();
    if roll < state.tuning.enemy_spawn_chance {
        spawn_enemy(state);
        true
    } else {
        false
    }
}

/// Fire the player's weapon toward `pointer`
///
/// Silently does nothing unless the run is active, the cooldown has elapsed
/// since the last shot (measured on the caller's clock, `now_ms`) and there
/// is ammo left. Returns whether a bullet was fired.
pub fn shoot_bullet(state: &mut GameState, pointer: Vec2, now_ms: f64) -> bool {
    if !state.is_running() {
        return false;
    }
    let cooldown = state.tuning.shot_cooldown_ms;
    if state.last_shot_ms.is_some_and(|last| now_ms - last < cooldown) {
        return false;
    }
    if state.player.ammo == 0 {
        return false;
    }

    state.player.ammo -= 1;
    state.last_shot_ms = Some(now_ms);

    let player = &state.player;
    let weapon = player.weapon();
    let angle = aim_angle(player.pos, pointer);
    let dir = unit_from_angle(angle);
    let bullet = Bullet {
        // Leave from the muzzle, not the player's center
        pos: player.pos + dir * player.size,
        vel: dir * weapon.speed,
        radius: state.tuning.bullet_radius,
        damage: weapon.damage,
        color: weapon.bullet_color,
    };
    log::trace!(
        "{} fired at {:.2} rad, ammo left {}",
        weapon.name,
        angle,
        player.ammo
    );

    let weapon_level = player.weapon_level;
    state.aim_angle = angle;
    state.player_bullets.push(bullet);
    state.emit(GameEvent::PlayerFired { weapon_level });
    true
}

/// Fire one bullet from `from` straight at the player's current position
pub fn shoot_enemy_bullet(state: &mut GameState, from: Vec2) {
    let dir = unit_from_angle(aim_angle(from, state.player.pos));
    state.enemy_bullets.push(Bullet {
        pos: from,
        vel: dir * state.tuning.enemy_bullet_speed,
        radius: state.tuning.bullet_radius,
        damage: state.tuning.enemy_bullet_damage,
        color: colors::ENEMY_BULLET,
    });
    state.emit(GameEvent::EnemyFired { pos: from });
}

/// Advance player bullets and resolve their hits on enemies
///
/// A bullet that leaves the field is dropped before any hit test. Otherwise
/// it damages the first live enemy it overlaps (in enemy order) and is
/// consumed, so one bullet hits at most one enemy per tick.
pub fn update_bullets(state: &mut GameState) {
    let bounds = state.bounds();
    let mut bullets = std::mem::take(&mut state.player_bullets);

    bullets.retain_mut(|bullet| {
        bullet.advance();
        if out_of_bounds(bullet.pos, bounds) {
            return false;
        }

        let Some(target) = state
            .enemies
            .iter()
            .position(|e| !e.is_dead() && circles_overlap(bullet.pos, bullet.radius, e.pos, e.size))
        else {
            return true;
        };

        let enemy = &mut state.enemies[target];
        enemy.take_damage(bullet.damage);
        let (remaining_hp, enemy_pos) = (enemy.hp, enemy.pos);
        state.emit(GameEvent::EnemyHit {
            damage: bullet.damage,
            remaining_hp,
        });
        if remaining_hp == 0 {
            resolve_kill(state, enemy_pos);
        }
        false
    });

    state.enemies.retain(|e| !e.is_dead());
    state.player_bullets = bullets;
}

/// Pay out a kill: heal, ammo, XP (and whatever the XP unlocks)
fn resolve_kill(state: &mut GameState, enemy_pos: Vec2) {
    state.player.heal(state.tuning.kill_heal);
    state.player.add_ammo(state.tuning.kill_ammo);
    let level_up = award_xp(&mut state.player, state.tuning.kill_xp, &state.tuning);
    state.emit(GameEvent::EnemyKilled { pos: enemy_pos });

    if level_up.levels_gained > 0 {
        let level = state.player.level;
        log::info!("Level up! Now level {}", level);
        state.emit(GameEvent::LevelUp { level });
    }
    if let Some(weapon_level) = level_up.new_weapon_level {
        log::info!("Weapon unlocked: {}", weapon_for_level(weapon_level).name);
        state.emit(GameEvent::WeaponUnlocked { weapon_level });
    }
}

/// Advance enemy bullets and resolve their hits on the player
///
/// Returns `true` when a hit drops the player to 0 hp. The phase moves to
/// `GameOver`, a single `GameEvent::GameOver` is raised, and the bullets not
/// yet processed this tick are left exactly as they were.
pub fn update_enemy_bullets(state: &mut GameState) -> bool {
    let bounds = state.bounds();
    let mut bullets = std::mem::take(&mut state.enemy_bullets);
    let mut game_over = false;

    bullets.retain_mut(|bullet| {
        if game_over {
            return true;
        }
        bullet.advance();
        if out_of_bounds(bullet.pos, bounds) {
            return false;
        }
        if !circles_overlap(bullet.pos, bullet.radius, state.player.pos, state.player.size) {
            return true;
        }

        state.player.take_damage(bullet.damage);
        let remaining_hp = state.player.hp;
        state.emit(GameEvent::PlayerHit {
            damage: bullet.damage,
            remaining_hp,
        });
        if state.player.is_dead() {
            game_over = true;
            state.phase = GamePhase::GameOver;
            log::info!(
                "Game over at level {} after {} ticks",
                state.player.level,
                state.time_ticks
            );
            state.emit(GameEvent::GameOver);
        }
        false
    });

    state.enemy_bullets = bullets;
    game_over
}

/// Enemies close in on the player, then each may fire
pub fn enemy_actions(state: &mut GameState) {
    let target = state.player.pos;
    let speed = state.tuning.enemy_speed_for_level(state.player.level);
    for enemy in &mut state.enemies {
        super::movement::move_enemy_toward(enemy, target, speed);
    }

    let mut shooters = Vec::new();
    for i in 0..state.enemies.len() {
        let roll: f32 = state.rng().random();
        let enemy = &state.enemies[i];
        if roll < enemy.fire_rate {
            shooters.push(enemy.pos);
        }
    }
    for from in shooters {
        shoot_enemy_bullet(state, from);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_AMMO;
    use crate::sim::weapons::TIER_COUNT;
    use crate::tuning::Tuning;

    fn running_state() -> GameState {
        let mut state = GameState::new(1234, 800.0, 600.0, Tuning::default());
        state.phase = GamePhase::Running;
        state
    }

    fn bullet_at(pos: Vec2, vel: Vec2, damage: u32) -> Bullet {
        Bullet {
            pos,
            vel,
            radius: 6.0,
            damage,
            color: colors::ORANGE,
        }
    }

    #[test]
    fn test_spawn_enemy_scales_with_level() {
        let mut state = running_state();
        state.player.level = 3;
        spawn_enemy(&mut state);

        let enemy = &state.enemies[0];
        assert_eq!(enemy.hp, 45);
        assert_eq!(enemy.max_hp, 45);
        assert_eq!(enemy.size, 30.0);
        assert_eq!(enemy.fire_rate, 0.01);
        assert!((0.0..=800.0).contains(&enemy.pos.x));
        assert!((0.0..=600.0).contains(&enemy.pos.y));
        assert!(matches!(state.events[0], GameEvent::EnemySpawned { hp: 45, .. }));
    }

    #[test]
    fn test_spawn_chance_extremes() {
        let mut state = running_state();
        state.tuning.enemy_spawn_chance = 0.0;
        for _ in 0..100 {
            assert!(!maybe_spawn_enemy(&mut state));
        }
        state.tuning.enemy_spawn_chance = 1.0;
        assert!(maybe_spawn_enemy(&mut state));
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_shoot_right_with_basic_gun() {
        let mut state = running_state();
        let pointer = state.player.pos + Vec2::new(100.0, 0.0);

        assert!(shoot_bullet(&mut state, pointer, 0.0));
        let bullet = &state.player_bullets[0];
        assert_eq!(bullet.vel, Vec2::new(10.0, 0.0));
        assert_eq!(bullet.damage, 15);
        assert_eq!(bullet.radius, 6.0);
        assert_eq!(bullet.color, colors::ORANGE);
        assert_eq!(bullet.pos, Vec2::new(440.0, 300.0));
        assert_eq!(state.player.ammo, MAX_AMMO - 1);
    }

    #[test]
    fn test_shoot_uses_current_tier() {
        let mut state = running_state();
        state.player.weapon_level = TIER_COUNT;
        let pointer = state.player.pos + Vec2::new(0.0, 50.0);
        assert!(shoot_bullet(&mut state, pointer, 0.0));
        let bullet = &state.player_bullets[0];
        assert_eq!(bullet.damage, 100);
        assert!((bullet.vel - Vec2::new(0.0, 20.0)).length() < 1e-4);
    }

    #[test]
    fn test_shoot_requires_ammo() {
        let mut state = running_state();
        state.player.ammo = 0;
        assert!(!shoot_bullet(&mut state, Vec2::ZERO, 0.0));
        assert!(state.player_bullets.is_empty());
        assert_eq!(state.player.ammo, 0);
        assert_eq!(state.last_shot_ms, None);
    }

    #[test]
    fn test_shoot_requires_running() {
        let mut state = GameState::new(1, 800.0, 600.0, Tuning::default());
        assert!(!shoot_bullet(&mut state, Vec2::ZERO, 0.0));
        assert!(state.player_bullets.is_empty());
        assert_eq!(state.player.ammo, MAX_AMMO);
    }

    #[test]
    fn test_shoot_cooldown() {
        let mut state = running_state();
        let pointer = Vec2::new(800.0, 300.0);
        assert!(shoot_bullet(&mut state, pointer, 1_000.0));
        assert!(!shoot_bullet(&mut state, pointer, 1_199.9));
        assert_eq!(state.player_bullets.len(), 1);
        assert_eq!(state.player.ammo, MAX_AMMO - 1);
        assert!(shoot_bullet(&mut state, pointer, 1_200.0));
        assert_eq!(state.player_bullets.len(), 2);
    }

    #[test]
    fn test_enemy_bullet_aims_at_player() {
        let mut state = running_state();
        let from = state.player.pos - Vec2::new(0.0, 200.0);
        shoot_enemy_bullet(&mut state, from);
        let bullet = &state.enemy_bullets[0];
        assert_eq!(bullet.pos, from);
        assert!((bullet.vel - Vec2::new(0.0, 5.0)).length() < 1e-4);
        assert_eq!(bullet.damage, 15);
        assert_eq!(bullet.radius, 6.0);
    }

    #[test]
    fn test_bullet_leaving_field_is_removed() {
        let mut state = running_state();
        state
            .player_bullets
            .push(bullet_at(Vec2::new(795.0, 300.0), Vec2::new(10.0, 0.0), 15));
        state
            .player_bullets
            .push(bullet_at(Vec2::new(400.0, 5.0), Vec2::new(0.0, -10.0), 15));
        state
            .player_bullets
            .push(bullet_at(Vec2::new(100.0, 100.0), Vec2::new(10.0, 0.0), 15));
        update_bullets(&mut state);
        assert_eq!(state.player_bullets.len(), 1);
        assert_eq!(state.player_bullets[0].pos, Vec2::new(110.0, 100.0));
    }

    #[test]
    fn test_hit_damages_one_enemy() {
        let mut state = running_state();
        let tuning = state.tuning.clone();
        // Two enemies stacked on the same spot
        state.enemies.push(Enemy::new(Vec2::new(200.0, 200.0), 35, &tuning));
        state.enemies.push(Enemy::new(Vec2::new(200.0, 200.0), 35, &tuning));
        state
            .player_bullets
            .push(bullet_at(Vec2::new(190.0, 200.0), Vec2::new(10.0, 0.0), 15));

        update_bullets(&mut state);
        assert!(state.player_bullets.is_empty());
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.enemies[0].hp, 20);
        assert_eq!(state.enemies[1].hp, 35);
    }

    #[test]
    fn test_kill_pays_rewards() {
        let mut state = running_state();
        let tuning = state.tuning.clone();
        state.player.hp = 100;
        state.player.ammo = 50;
        state.enemies.push(Enemy::new(Vec2::new(200.0, 200.0), 15, &tuning));
        state
            .player_bullets
            .push(bullet_at(Vec2::new(190.0, 200.0), Vec2::new(10.0, 0.0), 15));

        update_bullets(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.hp, 103);
        assert_eq!(state.player.ammo, 53);
        assert_eq!(state.player.xp, 10);
        assert!(state.events.contains(&GameEvent::EnemyKilled {
            pos: Vec2::new(200.0, 200.0)
        }));
    }

    #[test]
    fn test_kill_rewards_are_capped() {
        let mut state = running_state();
        let tuning = state.tuning.clone();
        state.player.hp = 149;
        state.player.ammo = 99;
        state.enemies.push(Enemy::new(Vec2::new(200.0, 200.0), 10, &tuning));
        state
            .player_bullets
            .push(bullet_at(Vec2::new(190.0, 200.0), Vec2::new(10.0, 0.0), 15));

        update_bullets(&mut state);
        assert_eq!(state.player.hp, 150);
        assert_eq!(state.player.ammo, MAX_AMMO);
    }

    #[test]
    fn test_dead_enemy_absorbs_no_more_bullets() {
        let mut state = running_state();
        let tuning = state.tuning.clone();
        state.enemies.push(Enemy::new(Vec2::new(200.0, 200.0), 15, &tuning));
        state.enemies.push(Enemy::new(Vec2::new(200.0, 200.0), 35, &tuning));
        for _ in 0..2 {
            state
                .player_bullets
                .push(bullet_at(Vec2::new(190.0, 200.0), Vec2::new(10.0, 0.0), 15));
        }

        update_bullets(&mut state);
        // First bullet kills enemy 0, second moves on to enemy 1
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].hp, 20);
        assert_eq!(state.player.xp, 10);
        assert!(state.player_bullets.is_empty());
    }

    #[test]
    fn test_enemy_bullet_hits_player() {
        let mut state = running_state();
        let pos = state.player.pos;
        state
            .enemy_bullets
            .push(bullet_at(pos - Vec2::new(50.0, 0.0), Vec2::new(5.0, 0.0), 15));
        assert!(!update_enemy_bullets(&mut state));
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.player.hp, 135);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_lethal_hit_raises_game_over_once() {
        let mut state = running_state();
        state.player.hp = 20;
        let pos = state.player.pos;
        for _ in 0..3 {
            state.enemy_bullets.push(bullet_at(pos, Vec2::ZERO, 15));
        }
        let untouched = bullet_at(Vec2::new(10.0, 10.0), Vec2::new(1.0, 1.0), 15);
        state.enemy_bullets.push(untouched.clone());

        assert!(update_enemy_bullets(&mut state));
        assert_eq!(state.player.hp, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let game_overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver))
            .count();
        assert_eq!(game_overs, 1);
        // The third lethal-range bullet and the far one were never processed
        assert_eq!(state.enemy_bullets.len(), 2);
        assert_eq!(state.enemy_bullets[1], untouched);
    }

    #[test]
    fn test_enemy_actions_move_and_fire() {
        let mut state = running_state();
        let tuning = state.tuning.clone();
        state.enemies.push(Enemy::new(Vec2::new(100.0, 300.0), 35, &tuning));
        state.enemies[0].fire_rate = 1.0;

        enemy_actions(&mut state);
        let speed = tuning.enemy_speed_for_level(1);
        assert!((state.enemies[0].pos.x - (100.0 + speed)).abs() < 1e-4);
        assert_eq!(state.enemy_bullets.len(), 1);
        assert_eq!(state.enemy_bullets[0].pos, state.enemies[0].pos);
    }
}
