//! Player bullet patterns by weapon level

use glam::Vec2;

use crate::consts::{MAX_WEAPON_LEVEL, WEAPON_LEVEL_SCORE_STEP};

const SINGLE: &[Vec2] = &[Vec2::new(0.0, -1.0)];
const DOUBLE: &[Vec2] = &[Vec2::new(-0.2, -1.0), Vec2::new(0.2, -1.0)];
const TRIPLE: &[Vec2] = &[
    Vec2::new(-0.3, -1.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(0.3, -1.0),
];
const QUAD: &[Vec2] = &[
    Vec2::new(-0.4, -1.0),
    Vec2::new(-0.2, -1.0),
    Vec2::new(0.2, -1.0),
    Vec2::new(0.4, -1.0),
];
const FAN: &[Vec2] = &[
    Vec2::new(-0.5, -1.0),
    Vec2::new(-0.25, -1.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(0.25, -1.0),
    Vec2::new(0.5, -1.0),
];

/// Direction offsets for a weapon level, left to right.
///
/// Offsets are multiplied by the bullet speed when fired. Levels outside
/// `1..=MAX_WEAPON_LEVEL` clamp to the nearest defined level.
pub fn pattern_for(level: u32) -> &'static [Vec2] {
    match level.clamp(1, MAX_WEAPON_LEVEL) {
        1 => SINGLE,
        2 => DOUBLE,
        3 => TRIPLE,
        4 => QUAD,
        _ => FAN,
    }
}

/// `min(MAX, score / 500 + 1)`
pub fn weapon_level(score: u64) -> u32 {
    (score / WEAPON_LEVEL_SCORE_STEP + 1).min(MAX_WEAPON_LEVEL as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pattern_sizes() {
        for level in 1..=MAX_WEAPON_LEVEL {
            assert_eq!(pattern_for(level).len(), level as usize);
        }
    }

    #[test]
    fn test_patterns_symmetric() {
        for level in 1..=MAX_WEAPON_LEVEL {
            let offsets = pattern_for(level);
            let sum: f32 = offsets.iter().map(|o| o.x).sum();
            assert!(sum.abs() < 1e-6, "level {level} not symmetric");
            assert!(offsets.iter().all(|o| o.y == -1.0));
        }
    }

    #[test]
    fn test_out_of_range_clamps() {
        assert_eq!(pattern_for(0), pattern_for(1));
        assert_eq!(pattern_for(99), pattern_for(MAX_WEAPON_LEVEL));
    }

    #[test]
    fn test_weapon_level_boundaries() {
        assert_eq!(weapon_level(0), 1);
        assert_eq!(weapon_level(499), 1);
        assert_eq!(weapon_level(500), 2);
        assert_eq!(weapon_level(1999), 4);
        assert_eq!(weapon_level(2000), 5);
        assert_eq!(weapon_level(u64::MAX), MAX_WEAPON_LEVEL);
    }

    proptest! {
        #[test]
        fn prop_pattern_never_empty(level in any::<u32>()) {
            let offsets = pattern_for(level);
            prop_assert!(!offsets.is_empty());
            prop_assert!(offsets.len() <= MAX_WEAPON_LEVEL as usize);
        }

        #[test]
        fn prop_weapon_level_monotonic(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(weapon_level(lo) <= weapon_level(hi));
            prop_assert!((1..=MAX_WEAPON_LEVEL).contains(&weapon_level(hi)));
        }
    }
}
