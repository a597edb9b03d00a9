//! Tuning constants for scheduling, combat and monster behavior.

/// Energy an actor must bank before it can take an action.
pub const ACTION_COST: i32 = 240;

/// Index into [`ENERGY_GAINS`] for an actor with no speed modifiers.
pub const NORMAL_SPEED: i32 = 6;

/// Energy gained per tick, indexed by speed tier.
///
/// The fastest tier gains a full action every tick, the slowest needs
/// sixteen ticks.
pub const ENERGY_GAINS: [i32; 13] = [15, 20, 25, 30, 40, 50, 60, 80, 100, 120, 150, 180, 240];

/// Maximum king-move distance at which a monster notices what happens to another.
pub const WITNESS_RADIUS: i32 = 20;

/// How far the hero can see, in king moves.
pub const HERO_SIGHT_RANGE: i32 = 12;

/// Frighten thresholds are drawn from `[FRIGHTEN_MIN, FRIGHTEN_MAX)` at spawn.
pub const FRIGHTEN_MIN: i32 = 60;
pub const FRIGHTEN_MAX: i32 = 200;

/// Threshold multiplier for cowardly breeds.
pub const COWARDLY_SCALE: f64 = 0.7;

/// Berzerk monsters get angrier, and more so, instead of afraid.
pub const BERZERK_SCALE: f64 = -3.0;

/// Share of a victim's fear felt by a monster watching it get hurt.
pub const WITNESS_DAMAGE_SCALE: f64 = 0.5;

/// Share of an attacker's confidence picked up by a monster watching it land a hit.
pub const WITNESS_ATTACK_SCALE: f64 = 0.75;

/// Protective breeds turn the fear of watching their own kind get hurt into anger.
pub const PROTECTIVE_SCALE: f64 = -2.0;

/// Upper bound, as a multiple of the move's rate, of the recharge added on use.
pub const MOVE_RECHARGE_JITTER: f64 = 1.3;

/// Default health for a freshly created hero.
pub const HERO_MAX_HEALTH: i32 = 40;
