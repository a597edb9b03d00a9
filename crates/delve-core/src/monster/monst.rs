//! Per-instance monster state
//!
//! A [`Monster`] owns what varies between two rats of the same breed: how
//! scared it is, whether it has woken yet, and how long until each of its
//! moves is ready again. Anything that needs to see other actors lives on
//! [`World`](crate::world::World) instead.

use std::sync::Arc;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::Display;

use super::Breed;
use crate::rng::RandomSource;
use crate::{COWARDLY_SCALE, FRIGHTEN_MAX, FRIGHTEN_MIN, MOVE_RECHARGE_JITTER};

/// Behavioral state of a monster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MonsterState {
    /// Initial state; never re-entered once left
    Asleep,
    Awake,
    Afraid,
}

/// Monster-specific state layered on an actor.
#[derive(Debug, Clone)]
pub struct Monster {
    breed: Arc<Breed>,
    fear: f64,
    frighten_threshold: f64,
    state: MonsterState,
    /// Turns until each move, keyed by index into the breed's moves, can be used
    recharges: HashMap<usize, f64>,
}

impl Monster {
    /// A fresh, asleep monster with its frighten threshold rolled.
    pub fn spawn(breed: Arc<Breed>, rng: &mut dyn RandomSource) -> Self {
        let mut frighten_threshold = rng.range_between(FRIGHTEN_MIN, FRIGHTEN_MAX) as f64;
        if breed.is_cowardly() {
            frighten_threshold *= COWARDLY_SCALE;
        }

        let recharges = (0..breed.moves.len()).map(|index| (index, 0.0)).collect();
        Self {
            breed,
            fear: 0.0,
            frighten_threshold,
            state: MonsterState::Asleep,
            recharges,
        }
    }

    pub fn breed(&self) -> &Arc<Breed> {
        &self.breed
    }

    pub const fn fear(&self) -> f64 {
        self.fear
    }

    pub const fn frighten_threshold(&self) -> f64 {
        self.frighten_threshold
    }

    pub const fn state(&self) -> MonsterState {
        self.state
    }

    pub fn is_asleep(&self) -> bool {
        self.state == MonsterState::Asleep
    }

    pub fn is_afraid(&self) -> bool {
        self.state == MonsterState::Afraid
    }

    /// Fearless and immobile breeds never feel anything.
    pub fn is_impassive(&self) -> bool {
        self.breed.is_fearless() || self.breed.is_immobile()
    }

    /// Shift fear by `delta`, never below zero.
    ///
    /// Liveness is the owner's concern; callers skip dead monsters.
    pub fn modify_fear(&mut self, delta: f64) {
        if self.is_impassive() {
            return;
        }
        self.fear = (self.fear + delta).max(0.0);
    }

    /// Apply any fear-driven transition. Returns `(from, to)` if the state changed.
    pub fn check_state(&mut self) -> Option<(MonsterState, MonsterState)> {
        match self.state {
            MonsterState::Awake if self.fear > self.frighten_threshold => {
                Some(self.enter(MonsterState::Afraid))
            }
            MonsterState::Afraid if self.fear <= 0.0 => Some(self.enter(MonsterState::Awake)),
            _ => None,
        }
    }

    /// Leave the Asleep state, giving every move a random partial charge so a
    /// freshly woken monster cannot fire everything at once.
    ///
    /// Returns false if the monster was already awake.
    pub fn wake(&mut self, rng: &mut dyn RandomSource) -> bool {
        if !self.is_asleep() {
            return false;
        }
        self.state = MonsterState::Awake;
        // In move order, so a seeded run draws the same charges every time.
        for (index, ability) in self.breed.moves.iter().enumerate() {
            self.recharges.insert(index, rng.float(ability.rate / 2.0));
        }
        true
    }

    /// Force a state. Entering Afraid pins fear at the threshold; entering
    /// Awake caps it there so the monster does not bolt again immediately.
    pub(crate) fn enter(&mut self, state: MonsterState) -> (MonsterState, MonsterState) {
        assert!(
            state != MonsterState::Asleep || self.is_asleep(),
            "{} cannot fall back asleep once woken",
            self.breed.name
        );
        let from = self.state;
        match state {
            MonsterState::Afraid => self.fear = self.frighten_threshold,
            MonsterState::Awake => self.fear = self.fear.min(self.frighten_threshold),
            MonsterState::Asleep => {}
        }
        self.state = state;
        (from, state)
    }

    /// Turns left before move `index` is ready.
    pub fn recharge_of(&self, index: usize) -> f64 {
        self.recharges.get(&index).copied().unwrap_or_default()
    }

    /// A move is usable only once it has fully recharged.
    pub fn can_use(&self, index: usize) -> bool {
        index < self.breed.moves.len() && self.recharge_of(index) == 0.0
    }

    /// Start move `index` recharging after use.
    pub fn use_move(&mut self, index: usize, rng: &mut dyn RandomSource) {
        let rate = self.breed.moves[index].rate;
        let delay = rng.float_between(rate, rate * MOVE_RECHARGE_JITTER);
        *self.recharges.entry(index).or_default() += delay;
    }

    /// One turn's worth of recharging.
    pub fn recharge(&mut self) {
        for recharge in self.recharges.values_mut() {
            *recharge = (*recharge - 1.0).max(0.0);
        }
    }
}
