//! Temporary conditions
//!
//! A [`Condition`] is a timed modifier owned by exactly one actor: haste,
//! cold, poison, dazzle, or resistance to one element. All kinds share one
//! lifecycle; what differs per kind (a per-turn effect, the narration when it
//! wears off) is looked up in [`ConditionKind::hooks`].

use core::fmt;

use serde::{Deserialize, Serialize};
use strum::EnumCount;

use super::ActorId;
use crate::combat::Element;
use crate::world::World;

/// What a condition does to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// Speed boost; intensity is the number of speed tiers gained
    Haste,
    /// Speed penalty; intensity is the number of speed tiers lost
    Cold,
    /// Damage over time; intensity is damage per turn
    Poison,
    /// Impaired vision; intensity scales the strike penalty
    Dazzle,
    /// Resistance to one element; intensity is the resistance level
    Resist(Element),
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionKind::Haste => f.write_str("haste"),
            ConditionKind::Cold => f.write_str("cold"),
            ConditionKind::Poison => f.write_str("poison"),
            ConditionKind::Dazzle => f.write_str("dazzle"),
            ConditionKind::Resist(element) => write!(f, "resist {element}"),
        }
    }
}

/// Per-turn effect run while a condition stays active: `(world, owner, intensity)`.
pub type UpdateHook = fn(&mut World, ActorId, i32);

/// Kind-specific behavior plugged into the shared lifecycle.
#[derive(Debug, Clone, Copy)]
pub struct ConditionHooks {
    pub on_update: Option<UpdateHook>,
    /// Log template narrating the condition taking hold
    pub apply_template: &'static str,
    /// Log template narrating the condition wearing off
    pub expire_template: &'static str,
}

impl ConditionKind {
    /// Dispatch table for the kind-specific hooks.
    pub fn hooks(self) -> ConditionHooks {
        match self {
            ConditionKind::Haste => ConditionHooks {
                on_update: None,
                apply_template: "{1} start[s] moving faster.",
                expire_template: "{1} slow[s] back down.",
            },
            ConditionKind::Cold => ConditionHooks {
                on_update: None,
                apply_template: "{1} [are|is] frozen!",
                expire_template: "{1} warm[s] back up.",
            },
            ConditionKind::Poison => ConditionHooks {
                on_update: Some(poison_tick),
                apply_template: "{1} [are|is] poisoned!",
                expire_template: "{1} [are|is] no longer poisoned.",
            },
            ConditionKind::Dazzle => ConditionHooks {
                on_update: None,
                apply_template: "{1} [are|is] dazzled by the light!",
                expire_template: "{1} can see clearly again.",
            },
            ConditionKind::Resist(_) => ConditionHooks {
                on_update: None,
                apply_template: "{1} feel[s] resistant.",
                expire_template: "{1} feel[s] susceptible again.",
            },
        }
    }
}

fn poison_tick(world: &mut World, owner: ActorId, intensity: i32) {
    world.take_damage(owner, intensity, "poison", None);
}

/// What one call to [`Condition::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionTick {
    /// The condition was not active
    Idle,
    /// Still active; the per-turn effect should run at this intensity
    Continued { intensity: i32 },
    /// Just wore off
    Expired,
}

/// A timed modifier bound to one actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    kind: ConditionKind,
    owner: Option<ActorId>,
    intensity: i32,
    turns_remaining: i32,
}

impl Condition {
    pub const fn new(kind: ConditionKind) -> Self {
        Self {
            kind,
            owner: None,
            intensity: 0,
            turns_remaining: 0,
        }
    }

    /// Attach the condition to its owner. A condition is bound exactly once.
    pub fn bind(&mut self, owner: ActorId) {
        if let Some(existing) = self.owner {
            panic!("{} condition is already bound to {existing}, cannot rebind to {owner}", self.kind);
        }
        self.owner = Some(owner);
    }

    pub const fn kind(&self) -> ConditionKind {
        self.kind
    }

    pub const fn owner(&self) -> Option<ActorId> {
        self.owner
    }

    /// Strength of the effect; only meaningful while active.
    pub const fn intensity(&self) -> i32 {
        self.intensity
    }

    /// Turns left before the condition wears off.
    pub const fn duration(&self) -> i32 {
        self.turns_remaining
    }

    pub const fn is_active(&self) -> bool {
        self.turns_remaining > 0
    }

    /// Start the condition, replacing whatever was active before.
    ///
    /// A zero-length activation leaves the condition inactive with no intensity.
    pub fn activate(&mut self, duration: i32, intensity: i32) {
        self.turns_remaining = duration.max(0);
        self.intensity = if self.is_active() { intensity } else { 0 };
    }

    /// Keep the condition going longer at its current intensity.
    pub fn extend(&mut self, duration: i32) {
        self.turns_remaining += duration.max(0);
    }

    /// Advance one of the owner's turns.
    pub fn update(&mut self) -> ConditionTick {
        if !self.is_active() {
            return ConditionTick::Idle;
        }

        self.turns_remaining -= 1;
        if self.is_active() {
            ConditionTick::Continued {
                intensity: self.intensity,
            }
        } else {
            self.intensity = 0;
            ConditionTick::Expired
        }
    }

    /// End the condition now, without the wearing-off narration.
    pub fn cancel(&mut self) {
        self.turns_remaining = 0;
    }
}

/// The fixed set of conditions every actor carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionSet {
    haste: Condition,
    cold: Condition,
    poison: Condition,
    dazzle: Condition,
    /// One per resistible element, in element order
    resistances: Vec<Condition>,
}

impl Default for ConditionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionSet {
    pub fn new() -> Self {
        Self {
            haste: Condition::new(ConditionKind::Haste),
            cold: Condition::new(ConditionKind::Cold),
            poison: Condition::new(ConditionKind::Poison),
            dazzle: Condition::new(ConditionKind::Dazzle),
            resistances: Element::resistible()
                .map(|element| Condition::new(ConditionKind::Resist(element)))
                .collect(),
        }
    }

    /// Bind every condition in the set to `owner`.
    pub fn bind(&mut self, owner: ActorId) {
        for condition in self.iter_mut() {
            condition.bind(owner);
        }
    }

    fn resistance_slot(element: Element) -> usize {
        assert!(!element.is_none(), "there is no resistance to plain damage");
        element as usize - 1
    }

    pub fn get(&self, kind: ConditionKind) -> &Condition {
        match kind {
            ConditionKind::Haste => &self.haste,
            ConditionKind::Cold => &self.cold,
            ConditionKind::Poison => &self.poison,
            ConditionKind::Dazzle => &self.dazzle,
            ConditionKind::Resist(element) => &self.resistances[Self::resistance_slot(element)],
        }
    }

    pub fn get_mut(&mut self, kind: ConditionKind) -> &mut Condition {
        match kind {
            ConditionKind::Haste => &mut self.haste,
            ConditionKind::Cold => &mut self.cold,
            ConditionKind::Poison => &mut self.poison,
            ConditionKind::Dazzle => &mut self.dazzle,
            ConditionKind::Resist(element) => {
                &mut self.resistances[Self::resistance_slot(element)]
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Condition> {
        [&self.haste, &self.cold, &self.poison, &self.dazzle]
            .into_iter()
            .chain(self.resistances.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Condition> {
        [&mut self.haste, &mut self.cold, &mut self.poison, &mut self.dazzle]
            .into_iter()
            .chain(self.resistances.iter_mut())
    }

    /// Every kind in the set, in update order.
    pub fn kinds(&self) -> Vec<ConditionKind> {
        self.iter().map(Condition::kind).collect()
    }

    /// Active intensity of `kind`, 0 when inactive.
    pub fn active_intensity(&self, kind: ConditionKind) -> i32 {
        let condition = self.get(kind);
        if condition.is_active() {
            condition.intensity()
        } else {
            0
        }
    }

    /// Resistance level against `element`; plain damage is never resisted.
    pub fn resistance(&self, element: Element) -> i32 {
        if element.is_none() {
            return 0;
        }
        self.active_intensity(ConditionKind::Resist(element))
    }

    /// Net speed tiers from haste and cold.
    pub fn speed_offset(&self) -> i32 {
        self.active_intensity(ConditionKind::Haste) - self.active_intensity(ConditionKind::Cold)
    }
}

/// Number of conditions in every [`ConditionSet`].
pub const CONDITION_COUNT: usize = 4 + Element::COUNT - 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_then_expire() {
        let mut condition = Condition::new(ConditionKind::Haste);
        condition.activate(3, 5);
        assert!(condition.is_active());
        assert_eq!(condition.duration(), 3);

        let ticks: Vec<_> = (0..3).map(|_| condition.update()).collect();
        assert_eq!(
            ticks,
            vec![
                ConditionTick::Continued { intensity: 5 },
                ConditionTick::Continued { intensity: 5 },
                ConditionTick::Expired,
            ]
        );
        assert!(!condition.is_active());
        assert_eq!(condition.intensity(), 0);
        assert_eq!(condition.update(), ConditionTick::Idle);
    }

    #[test]
    fn test_reactivate_overwrites() {
        let mut condition = Condition::new(ConditionKind::Cold);
        condition.activate(4, 2);
        condition.activate(4, 2);
        assert_eq!(condition.duration(), 4);
        assert_eq!(condition.intensity(), 2);

        condition.activate(1, 7);
        assert_eq!(condition.duration(), 1);
        assert_eq!(condition.intensity(), 7);
    }

    #[test]
    fn test_zero_length_activation_stays_inert() {
        let mut condition = Condition::new(ConditionKind::Haste);
        condition.activate(0, 4);
        assert!(!condition.is_active());
        assert_eq!(condition.intensity(), 0);

        condition.activate(3, 2);
        condition.activate(-2, 6);
        assert!(!condition.is_active());
        assert_eq!(condition.intensity(), 0);
        assert_eq!(condition.update(), ConditionTick::Idle);
    }

    #[test]
    fn test_extend_keeps_intensity() {
        let mut condition = Condition::new(ConditionKind::Poison);
        condition.activate(2, 3);
        condition.extend(5);
        assert_eq!(condition.duration(), 7);
        assert_eq!(condition.intensity(), 3);
    }

    #[test]
    fn test_cancel_is_idempotent_and_keeps_intensity() {
        let mut once = Condition::new(ConditionKind::Dazzle);
        once.activate(5, 4);
        let mut twice = once.clone();

        once.cancel();
        twice.cancel();
        twice.cancel();

        assert_eq!(once, twice);
        assert!(!once.is_active());
        assert_eq!(once.intensity(), 4);
        assert_eq!(once.update(), ConditionTick::Idle);
    }

    #[test]
    #[should_panic(expected = "already bound")]
    fn test_rebinding_panics() {
        let mut condition = Condition::new(ConditionKind::Haste);
        condition.bind(ActorId(1));
        condition.bind(ActorId(2));
    }

    #[test]
    fn test_set_has_one_resistance_per_element() {
        let set = ConditionSet::new();
        assert_eq!(set.iter().count(), CONDITION_COUNT);
        assert_eq!(set.kinds().len(), CONDITION_COUNT);
        for element in Element::resistible() {
            assert_eq!(set.get(ConditionKind::Resist(element)).kind(), ConditionKind::Resist(element));
        }
    }

    #[test]
    fn test_set_binds_everything() {
        let mut set = ConditionSet::new();
        set.bind(ActorId(9));
        assert!(set.iter().all(|c| c.owner() == Some(ActorId(9))));
    }

    #[test]
    fn test_speed_offset_and_resistance() {
        let mut set = ConditionSet::new();
        set.get_mut(ConditionKind::Haste).activate(5, 3);
        set.get_mut(ConditionKind::Cold).activate(5, 1);
        set.get_mut(ConditionKind::Resist(Element::Fire)).activate(5, 2);
        assert_eq!(set.speed_offset(), 2);
        assert_eq!(set.resistance(Element::Fire), 2);
        assert_eq!(set.resistance(Element::Cold), 0);
        assert_eq!(set.resistance(Element::None), 0);

        set.get_mut(ConditionKind::Haste).cancel();
        assert_eq!(set.speed_offset(), -1);
    }

    #[test]
    fn test_hook_table() {
        assert!(ConditionKind::Poison.hooks().on_update.is_some());
        assert!(ConditionKind::Haste.hooks().on_update.is_none());
        assert!(ConditionKind::Resist(Element::Acid).hooks().expire_template.contains("{1}"));
    }
}
