//! Fear, waking and witnesses
//!
//! Fear rises when a monster is hurt and falls when it hurts someone or
//! when time passes. Past the monster's frighten threshold it turns Afraid
//! and stays that way until its fear has drained to nothing. Monsters that
//! can see each other react to what happens to one another.

use std::sync::Arc;

use tracing::debug;

use super::MonsterState;
use crate::actor::{Actor, ActorId};
use crate::dungeon::Pos;
use crate::world::{GameEvent, World};
use crate::{
    BERZERK_SCALE, HERO_SIGHT_RANGE, PROTECTIVE_SCALE, WITNESS_ATTACK_SCALE,
    WITNESS_DAMAGE_SCALE, WITNESS_RADIUS,
};

/// Fear felt from `damage` measured against `max_health`.
fn fear_of(damage: i32, max_health: i32) -> f64 {
    100.0 * damage as f64 / max_health.max(1) as f64
}

impl World {
    /// Wake `id` up. Does nothing if it is already awake.
    pub fn wake_up(&mut self, id: ActorId) {
        let index = self.index_of(id);
        let actor = &mut self.actors[index];
        assert!(actor.is_alive(), "{} ({id}) cannot wake while dead", actor.name());
        let Some(monster) = actor.as_monster_mut() else {
            panic!("{id} is not a monster");
        };

        if monster.wake(self.rng.as_mut()) {
            debug!(actor = %id, "woke up");
            self.log.emit(GameEvent::Woke { actor: id });
            self.log.message("{1} wake[s] up!", &[id]);
        }
    }

    /// Force `id` into `state`, as detection or scripted logic sees fit.
    ///
    /// A monster cannot be put back to sleep once woken, and impassive
    /// breeds ignore being told to panic.
    pub fn change_state(&mut self, id: ActorId, state: MonsterState) {
        let monster = self.monster(id);
        if state == MonsterState::Asleep {
            assert!(
                monster.is_asleep(),
                "{} ({id}) cannot fall back asleep once woken",
                monster.breed().name
            );
            return;
        }

        self.wake_up(id);
        let monster = self.monster(id);
        if monster.state() == state || (state == MonsterState::Afraid && monster.is_impassive()) {
            return;
        }
        let change = self.monster_mut(id).enter(state);
        self.record_transition(id, change);
    }

    /// Shift the fear of a living monster. Dead monsters feel nothing.
    pub fn modify_fear(&mut self, id: ActorId, delta: f64) {
        if !self.actor(id).is_alive() {
            return;
        }
        self.monster_mut(id).modify_fear(delta);
    }

    /// Move between Awake and Afraid if fear calls for it.
    pub(crate) fn update_fear_state(&mut self, id: ActorId) {
        if !self.actor(id).is_alive() {
            return;
        }
        if let Some(change) = self.monster_mut(id).check_state() {
            self.record_transition(id, change);
        }
    }

    fn frighten(&mut self, id: ActorId, delta: f64) {
        self.modify_fear(id, delta);
        self.update_fear_state(id);
    }

    fn record_transition(&mut self, id: ActorId, (from, to): (MonsterState, MonsterState)) {
        let fear = self.monster(id).fear();
        debug!(actor = %id, %from, %to, fear, "fear state changed");
        self.log.emit(GameEvent::FearStateChanged { actor: id, from, to });
        match to {
            MonsterState::Afraid => self.log.message("{1} [are|is] afraid!", &[id]),
            MonsterState::Awake => self.log.message("{1} [have|has] regained courage.", &[id]),
            MonsterState::Asleep => {}
        }
    }

    /// Other living, awake monsters near enough to `id` to see what happens to it.
    pub fn witnesses(&self, id: ActorId) -> Vec<ActorId> {
        let pos = self.actor(id).pos;
        self.actors
            .iter()
            .filter(|other| other.id() != id && other.is_alive())
            .filter(|other| other.as_monster().is_some_and(|monster| !monster.is_asleep()))
            .filter(|other| other.pos.king_length(pos) <= WITNESS_RADIUS)
            .filter(|other| self.stage.has_line_of_sight(other.pos, pos))
            .map(Actor::id)
            .collect()
    }

    /// Monster reaction to being hurt, run whether or not the hit was fatal.
    pub(crate) fn on_monster_damaged(&mut self, id: ActorId, damage: i32) {
        let actor = self.actor(id);
        let fear = fear_of(damage, actor.health().max());
        let alive = actor.is_alive();
        let breed = match actor.as_monster() {
            Some(monster) => Arc::clone(monster.breed()),
            None => return,
        };

        // Getting hit is hard to sleep through.
        if alive && self.monster(id).is_asleep() {
            self.wake_up(id);
        }

        let own = if breed.is_berzerk() { fear * BERZERK_SCALE } else { fear };
        self.frighten(id, own);

        for witness in self.witnesses(id) {
            let seen = self.monster(witness).breed();
            let mut felt = fear * WITNESS_DAMAGE_SCALE;
            if seen.is_protective() && seen.name == breed.name {
                felt *= PROTECTIVE_SCALE;
            } else if seen.is_berzerk() {
                felt = -felt;
            }
            self.frighten(witness, felt);
        }
    }

    /// Monster reaction to landing a hit on `defender`.
    pub(crate) fn on_give_damage(&mut self, attacker: ActorId, defender: ActorId, damage: i32) {
        if self.actor(attacker).as_monster().is_none() {
            return;
        }
        let fear = fear_of(damage, self.actor(defender).health().max());
        self.frighten(attacker, -fear);

        for witness in self.witnesses(attacker) {
            self.frighten(witness, -fear * WITNESS_ATTACK_SCALE);
        }
    }

    /// Fear decay, state check and move recharge at the end of a monster's turn.
    pub(crate) fn monster_end_turn(&mut self, id: ActorId) {
        let actor = self.actor(id);
        let pos = actor.pos;
        let health = actor.health().fraction();

        // Calm down faster far from the hero, faster still out of its sight,
        // and slower when badly hurt.
        let mut decay = 5.0 + pos.king_length(self.hero_pos()) as f64;
        if !self.is_visible_to_hero(pos) {
            decay = 5.0 + 2.0 * decay;
        }
        decay = 2.0 + decay * health;

        self.frighten(id, -decay);
        self.monster_mut(id).recharge();
    }

    /// Whether the hero has an unobstructed view of `pos`.
    pub fn is_visible_to_hero(&self, pos: Pos) -> bool {
        let Some(hero) = self.hero() else {
            return false;
        };
        hero.pos.king_length(pos) <= HERO_SIGHT_RANGE && self.stage.has_line_of_sight(hero.pos, pos)
    }

    /// Whether `id` can see `pos`.
    pub fn can_view(&self, id: ActorId, pos: Pos) -> bool {
        self.stage.has_line_of_sight(self.actor(id).pos, pos)
    }

    /// Whether a ranged attack from `id` could reach `target` within `range`
    /// without hitting a wall or another actor first.
    pub fn can_target(&self, id: ActorId, target: Pos, range: i32) -> bool {
        let from = self.actor(id).pos;
        if from == target || from.king_length(target) > range {
            return false;
        }
        let line = self.stage.line(from, target);
        line[1..line.len() - 1]
            .iter()
            .all(|&pos| self.stage.is_transparent(pos) && self.actor_at(pos).is_none())
    }
}
