//! Attack profiles
//!
//! An [`AttackProfile`] describes a strike that has not happened yet. It is a
//! plain value: every modifier returns a new profile and leaves its operands
//! alone, so an attacker's base attack, a weapon enchantment and the
//! defender's armor can be layered in any order.

use serde::{Deserialize, Serialize};

use super::{Element, policy};
use crate::actor::Actor;
use crate::rng::RandomSource;

fn unit_multiplier() -> f64 {
    1.0
}

fn is_unit(value: &f64) -> bool {
    *value == 1.0
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

/// Everything that goes into one potential hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackProfile {
    /// Verb used when narrating the hit ("bites", "slashes")
    #[serde(default)]
    verb: String,
    #[serde(rename = "damage", default)]
    base_damage: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    damage_bonus: i32,
    #[serde(default = "unit_multiplier", skip_serializing_if = "is_unit")]
    damage_multiplier: f64,
    #[serde(default)]
    element: Element,
    #[serde(default, skip_serializing_if = "is_zero")]
    strike_bonus: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    armor: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    resistance: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    armor_pierce: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    resistance_pierce: i32,
    /// Maximum king-move distance; 0 for melee
    #[serde(default)]
    range: i32,
}

/// Outcome of resolving a profile against a defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Miss,
    Hit { damage: i32, element: Element },
}

impl Resolution {
    pub const fn is_hit(&self) -> bool {
        matches!(self, Resolution::Hit { .. })
    }

    pub const fn damage(&self) -> i32 {
        match self {
            Resolution::Miss => 0,
            Resolution::Hit { damage, .. } => *damage,
        }
    }
}

impl Default for AttackProfile {
    fn default() -> Self {
        Self::modifier()
    }
}

impl AttackProfile {
    /// A melee attack dealing `base_damage`.
    pub fn new(verb: impl Into<String>, base_damage: i32) -> Self {
        Self {
            verb: verb.into(),
            base_damage,
            ..Self::modifier()
        }
    }

    /// A profile with no damage of its own, for use as the right-hand side
    /// of [`combine`](Self::combine).
    pub fn modifier() -> Self {
        Self {
            verb: String::new(),
            base_damage: 0,
            damage_bonus: 0,
            damage_multiplier: 1.0,
            element: Element::None,
            strike_bonus: 0,
            armor: 0,
            resistance: 0,
            armor_pierce: 0,
            resistance_pierce: 0,
            range: 0,
        }
    }

    pub fn verb(&self) -> &str {
        &self.verb
    }

    pub const fn base_damage(&self) -> i32 {
        self.base_damage
    }

    pub const fn damage_bonus(&self) -> i32 {
        self.damage_bonus
    }

    pub const fn damage_multiplier(&self) -> f64 {
        self.damage_multiplier
    }

    pub const fn element(&self) -> Element {
        self.element
    }

    pub const fn strike_bonus(&self) -> i32 {
        self.strike_bonus
    }

    pub const fn armor(&self) -> i32 {
        self.armor
    }

    pub const fn resistance(&self) -> i32 {
        self.resistance
    }

    pub const fn armor_pierce(&self) -> i32 {
        self.armor_pierce
    }

    pub const fn resistance_pierce(&self) -> i32 {
        self.resistance_pierce
    }

    pub const fn range(&self) -> i32 {
        self.range
    }

    pub const fn is_ranged(&self) -> bool {
        self.range > 0
    }

    /// Merge two profiles.
    ///
    /// Additive terms add and multipliers multiply. The left operand's verb
    /// and element win unless unset, and the longer range is kept, so the
    /// operation is associative.
    #[must_use]
    pub fn combine(&self, other: &AttackProfile) -> AttackProfile {
        AttackProfile {
            verb: if self.verb.is_empty() {
                other.verb.clone()
            } else {
                self.verb.clone()
            },
            base_damage: self.base_damage + other.base_damage,
            damage_bonus: self.damage_bonus + other.damage_bonus,
            damage_multiplier: self.damage_multiplier * other.damage_multiplier,
            element: if self.element.is_none() {
                other.element
            } else {
                self.element
            },
            strike_bonus: self.strike_bonus + other.strike_bonus,
            armor: self.armor + other.armor,
            resistance: self.resistance + other.resistance,
            armor_pierce: self.armor_pierce + other.armor_pierce,
            resistance_pierce: self.resistance_pierce + other.resistance_pierce,
            range: self.range.max(other.range),
        }
    }

    #[must_use]
    pub fn add_damage(&self, bonus: i32) -> AttackProfile {
        AttackProfile {
            damage_bonus: self.damage_bonus + bonus,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn multiply_damage(&self, factor: f64) -> AttackProfile {
        AttackProfile {
            damage_multiplier: self.damage_multiplier * factor,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn add_strike(&self, bonus: i32) -> AttackProfile {
        AttackProfile {
            strike_bonus: self.strike_bonus + bonus,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn add_armor(&self, armor: i32) -> AttackProfile {
        AttackProfile {
            armor: self.armor + armor,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn add_resistance(&self, resistance: i32) -> AttackProfile {
        AttackProfile {
            resistance: self.resistance + resistance,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn pierce_armor(&self, pierce: i32) -> AttackProfile {
        AttackProfile {
            armor_pierce: self.armor_pierce + pierce,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn pierce_resistance(&self, pierce: i32) -> AttackProfile {
        AttackProfile {
            resistance_pierce: self.resistance_pierce + pierce,
            ..self.clone()
        }
    }

    /// Replace the element, whatever it was.
    #[must_use]
    pub fn brand(&self, element: Element) -> AttackProfile {
        AttackProfile {
            element,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_range(&self, range: i32) -> AttackProfile {
        AttackProfile {
            range: range.max(0),
            ..self.clone()
        }
    }

    /// Damage before armor and resistance.
    pub fn average_damage(&self) -> f64 {
        (self.base_damage + self.damage_bonus) as f64 * self.damage_multiplier
    }

    pub fn effective_armor(&self) -> i32 {
        (self.armor - self.armor_pierce).max(0)
    }

    pub fn effective_resistance(&self) -> i32 {
        (self.resistance - self.resistance_pierce).max(0)
    }

    /// Damage this profile deals if it lands, after resistance and armor.
    pub fn final_damage(&self) -> i32 {
        let raw = self.average_damage() * policy::resistance_factor(self.effective_resistance());
        let dealt = raw - policy::armor_mitigation(raw, self.effective_armor());
        dealt.max(0.0).round() as i32
    }

    /// Resolve this profile against `defender`.
    ///
    /// The defender shapes the profile first (resistances, armor), then one
    /// percentile roll decides whether the strike lands.
    pub fn resolve(&self, defender: &Actor, rng: &mut dyn RandomSource) -> Resolution {
        let defended = defender.defend(self);
        let chance = policy::strike_chance(defended.strike_bonus, defender.dodge());
        if rng.inclusive(1, 100) > chance {
            return Resolution::Miss;
        }

        Resolution::Hit {
            damage: defended.final_damage(),
            element: defended.element,
        }
    }
}
