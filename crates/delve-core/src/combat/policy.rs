//! Tunable combat curves
//!
//! Strike chance falls as dodge rises and damage falls as armor or
//! resistance rises. The shapes are policy, not physics; they are kept here
//! so balance changes touch one file.

/// Strike chance, in percent, against a defender with no dodge.
pub const BASE_STRIKE_CHANCE: i32 = 80;

/// A strike always has at least this chance to land...
pub const MIN_STRIKE_CHANCE: i32 = 5;

/// ...and at least `100 - MAX_STRIKE_CHANCE` chance to miss.
pub const MAX_STRIKE_CHANCE: i32 = 95;

/// Dodge at which half of the possible penalty is reached.
pub const DODGE_SCALE: i32 = 50;

/// Armor at which half of the damage is absorbed.
pub const ARMOR_SCALE: i32 = 40;

/// Strike penalty per point of dazzle intensity, and its cap.
pub const DAZZLE_STRIKE_PENALTY: i32 = 10;
pub const MAX_DAZZLE_STRIKE_PENALTY: i32 = 60;

/// Percentage points of strike chance removed by `dodge`.
///
/// Grows quickly at first and approaches 100 without reaching it.
pub fn dodge_penalty(dodge: i32) -> i32 {
    if dodge <= 0 {
        return 0;
    }
    100 * dodge / (dodge + DODGE_SCALE)
}

/// Chance, in percent, that a strike with `strike_bonus` lands against `dodge`.
pub fn strike_chance(strike_bonus: i32, dodge: i32) -> i32 {
    (BASE_STRIKE_CHANCE + strike_bonus - dodge_penalty(dodge))
        .clamp(MIN_STRIKE_CHANCE, MAX_STRIKE_CHANCE)
}

/// Damage absorbed from a `raw` hit by `armor`.
pub fn armor_mitigation(raw: f64, armor: i32) -> f64 {
    if armor <= 0 || raw <= 0.0 {
        return 0.0;
    }
    raw * armor as f64 / (armor + ARMOR_SCALE) as f64
}

/// Multiplier applied to damage of an element the defender resists.
pub fn resistance_factor(resistance: i32) -> f64 {
    1.0 / (1.0 + resistance.max(0) as f64)
}

/// Strike penalty for an attacker whose vision is impaired.
pub fn dazzle_penalty(intensity: i32) -> i32 {
    (intensity.max(0) * DAZZLE_STRIKE_PENALTY).min(MAX_DAZZLE_STRIKE_PENALTY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dodge_penalty_monotonic() {
        let mut last = dodge_penalty(0);
        assert_eq!(last, 0);
        for dodge in 1..500 {
            let penalty = dodge_penalty(dodge);
            assert!(penalty >= last);
            assert!(penalty < 100);
            last = penalty;
        }
        assert_eq!(dodge_penalty(50), 50);
    }

    #[test]
    fn test_strike_chance_clamped() {
        assert_eq!(strike_chance(0, 0), 80);
        assert_eq!(strike_chance(100, 0), MAX_STRIKE_CHANCE);
        assert_eq!(strike_chance(-200, 0), MIN_STRIKE_CHANCE);
        assert!(strike_chance(0, 20) < strike_chance(0, 10));
    }

    #[test]
    fn test_armor_mitigation_monotonic() {
        assert_eq!(armor_mitigation(10.0, 0), 0.0);
        assert_eq!(armor_mitigation(10.0, 40), 5.0);
        let mut last = 0.0;
        for armor in 0..200 {
            let absorbed = armor_mitigation(20.0, armor);
            assert!(absorbed >= last && absorbed < 20.0);
            last = absorbed;
        }
    }

    #[test]
    fn test_resistance_factor() {
        assert_eq!(resistance_factor(0), 1.0);
        assert_eq!(resistance_factor(1), 0.5);
        assert_eq!(resistance_factor(-3), 1.0);
    }

    #[test]
    fn test_dazzle_penalty_capped() {
        assert_eq!(dazzle_penalty(0), 0);
        assert_eq!(dazzle_penalty(2), 20);
        assert_eq!(dazzle_penalty(50), MAX_DAZZLE_STRIKE_PENALTY);
    }
}
