//! XP, levels and weapon unlocks

use super::state::Player;
use super::weapons::TIER_COUNT;
use crate::tuning::Tuning;

/// What a single XP award changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelUp {
    /// Levels gained by this award
    pub levels_gained: u32,
    /// Set when the award moved the player to a new weapon tier
    pub new_weapon_level: Option<usize>,
}

/// Add XP and apply every level-up it earns
///
/// Crossing a threshold resets XP to zero. Each level that lands on a
/// multiple of `levels_per_weapon_unlock` moves the weapon up one tier,
/// capped at the last tier.
pub fn award_xp(player: &mut Player, amount: u32, tuning: &Tuning) -> LevelUp {
    let mut result = LevelUp::default();
    player.xp = player.xp.saturating_add(amount);

    while player.xp >= tuning.xp_threshold(player.level) {
        player.xp = 0;
        player.level += 1;
        result.levels_gained += 1;

        if player.level.is_multiple_of(tuning.levels_per_weapon_unlock) {
            let next = (player.weapon_level + 1).min(TIER_COUNT);
            if next != player.weapon_level {
                player.weapon_level = next;
                result.new_weapon_level = Some(next);
            }
        }
    }

    result
}

/// XP still missing before the next level
pub fn xp_to_next_level(player: &Player, tuning: &Tuning) -> u32 {
    tuning.xp_threshold(player.level).saturating_sub(player.xp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn fresh_player(tuning: &Tuning) -> Player {
        Player::new(Vec2::ZERO, tuning)
    }

    #[test]
    fn test_two_kills_reach_level_two() {
        let tuning = Tuning::default();
        let mut player = fresh_player(&tuning);

        let first = award_xp(&mut player, 10, &tuning);
        assert_eq!(first.levels_gained, 0);
        assert_eq!((player.level, player.xp), (1, 10));

        let second = award_xp(&mut player, 10, &tuning);
        assert_eq!(second.levels_gained, 1);
        assert_eq!((player.level, player.xp), (2, 0));
    }

    #[test]
    fn test_weapon_unlocks_on_fifth_level() {
        let tuning = Tuning::default();
        let mut player = fresh_player(&tuning);
        player.level = 4;
        player.xp = 70;

        let result = award_xp(&mut player, 10, &tuning);
        assert_eq!(player.level, 5);
        assert_eq!(player.weapon_level, 2);
        assert_eq!(result.new_weapon_level, Some(2));
    }

    #[test]
    fn test_non_multiple_level_keeps_weapon() {
        let tuning = Tuning::default();
        let mut player = fresh_player(&tuning);
        player.level = 5;
        player.weapon_level = 2;
        player.xp = 90;

        let result = award_xp(&mut player, 10, &tuning);
        assert_eq!(player.level, 6);
        assert_eq!(player.weapon_level, 2);
        assert_eq!(result.new_weapon_level, None);
    }

    #[test]
    fn test_weapon_level_caps_at_tier_count() {
        let tuning = Tuning::default();
        let mut player = fresh_player(&tuning);
        player.level = 39;
        player.weapon_level = TIER_COUNT;
        player.xp = tuning.xp_threshold(39) - 10;

        let result = award_xp(&mut player, 10, &tuning);
        assert_eq!(player.level, 40);
        assert_eq!(player.weapon_level, TIER_COUNT);
        assert_eq!(result.new_weapon_level, None);
    }

    #[test]
    fn test_large_award_resets_xp() {
        let tuning = Tuning::default();
        let mut player = fresh_player(&tuning);
        let result = award_xp(&mut player, 1_000, &tuning);
        assert_eq!(result.levels_gained, 1);
        assert_eq!((player.level, player.xp), (2, 0));
    }

    #[test]
    fn test_xp_to_next_level() {
        let tuning = Tuning::default();
        let mut player = fresh_player(&tuning);
        assert_eq!(xp_to_next_level(&player, &tuning), 20);
        player.xp = 15;
        assert_eq!(xp_to_next_level(&player, &tuning), 5);
    }
}
