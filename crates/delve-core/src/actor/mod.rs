//! Actors
//!
//! Anything that takes turns: the hero and every monster. The shared part
//! (health, energy, conditions, the attack/defend contract) lives on
//! [`Actor`]; what differs lives in [`ActorKind`].

mod condition;
mod energy;
mod hero;

use core::fmt;

use serde::{Deserialize, Serialize};

pub use condition::{
    CONDITION_COUNT, Condition, ConditionHooks, ConditionKind, ConditionSet, ConditionTick,
    UpdateHook,
};
pub use energy::EnergyClock;
pub use hero::Hero;

use crate::StatRange;
use crate::combat::{AttackProfile, policy};
use crate::dungeon::Pos;
use crate::monster::Monster;
use crate::rng::RandomSource;

/// Unique identifier for actors in a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor #{}", self.0)
    }
}

/// The specialization an actor carries.
#[derive(Debug, Clone)]
pub enum ActorKind {
    Hero(Hero),
    Monster(Monster),
}

/// An entity that takes turns.
#[derive(Debug, Clone)]
pub struct Actor {
    id: ActorId,
    pub pos: Pos,
    health: StatRange,
    pub energy: EnergyClock,
    conditions: ConditionSet,
    kind: ActorKind,
}

impl Actor {
    /// Create an actor at full health with its conditions bound to it.
    pub fn new(id: ActorId, pos: Pos, max_health: i32, energy: EnergyClock, kind: ActorKind) -> Self {
        let mut conditions = ConditionSet::new();
        conditions.bind(id);
        Self {
            id,
            pos,
            health: StatRange::new(max_health),
            energy,
            conditions,
            kind,
        }
    }

    pub const fn id(&self) -> ActorId {
        self.id
    }

    pub const fn health(&self) -> &StatRange {
        &self.health
    }

    pub(crate) fn health_mut(&mut self) -> &mut StatRange {
        &mut self.health
    }

    pub const fn is_alive(&self) -> bool {
        self.health.current() > 0
    }

    pub const fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    pub fn conditions_mut(&mut self) -> &mut ConditionSet {
        &mut self.conditions
    }

    pub const fn kind(&self) -> &ActorKind {
        &self.kind
    }

    pub const fn is_hero(&self) -> bool {
        matches!(self.kind, ActorKind::Hero(_))
    }

    pub fn as_hero(&self) -> Option<&Hero> {
        match &self.kind {
            ActorKind::Hero(hero) => Some(hero),
            ActorKind::Monster(_) => None,
        }
    }

    pub fn as_hero_mut(&mut self) -> Option<&mut Hero> {
        match &mut self.kind {
            ActorKind::Hero(hero) => Some(hero),
            ActorKind::Monster(_) => None,
        }
    }

    pub fn as_monster(&self) -> Option<&Monster> {
        match &self.kind {
            ActorKind::Monster(monster) => Some(monster),
            ActorKind::Hero(_) => None,
        }
    }

    pub fn as_monster_mut(&mut self) -> Option<&mut Monster> {
        match &mut self.kind {
            ActorKind::Monster(monster) => Some(monster),
            ActorKind::Hero(_) => None,
        }
    }

    /// Name for diagnostics.
    pub fn name(&self) -> &str {
        match &self.kind {
            ActorKind::Hero(hero) => &hero.name,
            ActorKind::Monster(monster) => &monster.breed().name,
        }
    }

    /// Speed tier offset before conditions.
    pub fn base_speed(&self) -> i32 {
        match &self.kind {
            ActorKind::Hero(_) => 0,
            ActorKind::Monster(monster) => monster.breed().speed,
        }
    }

    /// Speed tier offset after haste and cold.
    pub fn speed(&self) -> i32 {
        self.base_speed() + self.conditions.speed_offset()
    }

    /// Chance-to-be-hit reduction fed to the strike roll.
    pub fn dodge(&self) -> i32 {
        match &self.kind {
            ActorKind::Hero(hero) => hero.dodge,
            ActorKind::Monster(monster) => monster.breed().dodge,
        }
    }

    fn armor(&self) -> i32 {
        match &self.kind {
            ActorKind::Hero(hero) => hero.armor,
            ActorKind::Monster(monster) => monster.breed().armor,
        }
    }

    /// The kind-specific melee attack before universal penalties.
    fn base_attack(&self, rng: &mut dyn RandomSource) -> AttackProfile {
        match &self.kind {
            ActorKind::Hero(hero) => hero.attack().clone(),
            ActorKind::Monster(monster) => {
                let attacks = &monster.breed().attacks;
                // Breeds are validated to have at least one attack at load time.
                let index = rng.choose_index(attacks.len()).unwrap_or_default();
                attacks[index].clone()
            }
        }
    }

    /// The melee attack this actor makes this turn.
    pub fn get_attack(&self, rng: &mut dyn RandomSource) -> AttackProfile {
        assert!(self.is_alive(), "{} ({}) cannot attack while dead", self.name(), self.id);
        self.apply_penalties(&self.base_attack(rng))
    }

    /// Penalties every outgoing attack suffers, whatever its source.
    pub fn apply_penalties(&self, attack: &AttackProfile) -> AttackProfile {
        let dazzle = self.conditions.active_intensity(ConditionKind::Dazzle);
        if dazzle > 0 {
            attack.add_strike(-policy::dazzle_penalty(dazzle))
        } else {
            attack.clone()
        }
    }

    /// Shape an incoming attack with this actor's resistances and armor.
    pub fn defend(&self, incoming: &AttackProfile) -> AttackProfile {
        let resistance = self.conditions.resistance(incoming.element());
        let defended = if resistance > 0 {
            incoming.add_resistance(resistance)
        } else {
            incoming.clone()
        };

        let armor = self.armor();
        if armor > 0 {
            defended.add_armor(armor)
        } else {
            defended
        }
    }

    /// Lower health by `amount`, clamped at zero. Returns true if this killed the actor.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        assert!(
            self.is_alive(),
            "{} ({}) took damage after dying",
            self.name(),
            self.id
        );
        self.health.damage(amount);
        !self.is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedRng;
    use crate::combat::{Element, Resolution};

    fn hero_with_health(health: i32) -> Actor {
        Actor::new(
            ActorId(1),
            Pos::new(1, 1),
            health,
            EnergyClock::new().preloaded(),
            ActorKind::Hero(Hero::new("Tamsin").with_dodge(0)),
        )
    }

    #[test]
    fn test_conditions_bound_at_construction() {
        let actor = hero_with_health(10);
        assert!(actor.conditions().iter().all(|c| c.owner() == Some(ActorId(1))));
    }

    #[test]
    fn test_lethal_damage_clamps_and_reports_death() {
        let mut actor = hero_with_health(8);
        assert!(actor.apply_damage(10));
        assert_eq!(actor.health().current(), 0);
        assert!(!actor.is_alive());
    }

    #[test]
    #[should_panic(expected = "after dying")]
    fn test_damaging_the_dead_panics() {
        let mut actor = hero_with_health(8);
        actor.apply_damage(10);
        actor.apply_damage(1);
    }

    #[test]
    fn test_dazzle_lowers_strike() {
        let mut actor = hero_with_health(10);
        let mut rng = ScriptedRng::new();
        assert_eq!(actor.get_attack(&mut rng).strike_bonus(), 0);

        actor.conditions_mut().get_mut(ConditionKind::Dazzle).activate(3, 2);
        assert_eq!(actor.get_attack(&mut rng).strike_bonus(), -20);
    }

    #[test]
    fn test_defend_applies_matching_resistance_and_armor() {
        let mut actor = hero_with_health(10);
        if let Some(hero) = actor.as_hero_mut() {
            hero.armor = 5;
        }
        actor
            .conditions_mut()
            .get_mut(ConditionKind::Resist(Element::Fire))
            .activate(4, 2);

        let fire = actor.defend(&AttackProfile::new("burns", 6).brand(Element::Fire));
        assert_eq!(fire.resistance(), 2);
        assert_eq!(fire.armor(), 5);

        let plain = actor.defend(&AttackProfile::new("hits", 6));
        assert_eq!(plain.resistance(), 0);
        assert_eq!(plain.armor(), 5);
    }

    #[test]
    fn test_resolve_with_fixed_roll() {
        let defender = hero_with_health(20);
        let attack = AttackProfile::new("hits", 5)
            .combine(&AttackProfile::modifier().add_damage(3).multiply_damage(1.2));

        for _ in 0..5 {
            let mut rng = ScriptedRng::new().with_ints([10]);
            assert_eq!(
                attack.resolve(&defender, &mut rng),
                Resolution::Hit {
                    damage: 10,
                    element: Element::None
                }
            );
        }

        let mut rng = ScriptedRng::new().with_ints([100]);
        assert_eq!(attack.resolve(&defender, &mut rng), Resolution::Miss);
    }

    #[test]
    fn test_speed_includes_conditions() {
        let mut actor = hero_with_health(10);
        assert_eq!(actor.speed(), 0);
        actor.conditions_mut().get_mut(ConditionKind::Haste).activate(2, 2);
        assert_eq!(actor.speed(), 2);
    }
}
