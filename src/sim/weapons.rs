//! Weapon tiers
//!
//! Static, ordered power curve. `Player::weapon_level` is a 1-based index
//! into [`WEAPONS`].

use serde::Serialize;

use crate::colors::{self, Rgba};

/// One tier of the weapon table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weapon {
    pub name: &'static str,
    pub damage: u32,
    /// Projectile speed in pixels per tick
    pub speed: f32,
    /// Gun barrel color
    pub color: Rgba,
    pub bullet_color: Rgba,
}

pub const WEAPONS: [Weapon; 6] = [
    Weapon {
        name: "Basic Gun",
        damage: 15,
        speed: 10.0,
        color: colors::GRAY,
        bullet_color: colors::ORANGE,
    },
    Weapon {
        name: "Blaster",
        damage: 25,
        speed: 12.0,
        color: colors::BLUE,
        bullet_color: colors::CYAN,
    },
    Weapon {
        name: "Pulse Rifle",
        damage: 40,
        speed: 14.0,
        color: colors::GREEN,
        bullet_color: colors::LIME,
    },
    Weapon {
        name: "Plasma Cannon",
        damage: 55,
        speed: 16.0,
        color: colors::PURPLE,
        bullet_color: colors::MAGENTA,
    },
    Weapon {
        name: "Quantum Gun",
        damage: 75,
        speed: 18.0,
        color: colors::GOLD,
        bullet_color: colors::YELLOW,
    },
    Weapon {
        name: "Divine Blaster",
        damage: 100,
        speed: 20.0,
        color: colors::WHITE,
        bullet_color: colors::LIGHT_BLUE,
    },
];

/// Number of tiers; the highest valid `weapon_level`
pub const TIER_COUNT: usize = WEAPONS.len();

/// Look up a tier by 1-based level, clamping out-of-range levels
pub fn weapon_for_level(weapon_level: usize) -> &'static Weapon {
    &WEAPONS[weapon_level.clamp(1, TIER_COUNT) - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_strictly_increase() {
        for pair in WEAPONS.windows(2) {
            assert!(pair[1].damage > pair[0].damage, "{} -> {}", pair[0].name, pair[1].name);
            assert!(pair[1].speed > pair[0].speed, "{} -> {}", pair[0].name, pair[1].name);
        }
    }

    #[test]
    fn test_lookup_is_one_based_and_clamped() {
        assert_eq!(weapon_for_level(1).name, "Basic Gun");
        assert_eq!(weapon_for_level(TIER_COUNT).name, "Divine Blaster");
        assert_eq!(weapon_for_level(0).name, "Basic Gun");
        assert_eq!(weapon_for_level(99).name, "Divine Blaster");
    }
}
