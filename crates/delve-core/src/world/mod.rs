//! The world: stage, actor registry and the game loop
//!
//! Every operation that touches more than one actor goes through [`World`],
//! which owns the registry outright. Monsters never hold references to each
//! other; witness propagation asks the world who is nearby instead.

mod errors;
mod events;

use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, trace};

pub use errors::ContentError;
pub use events::{EventLog, GameEvent, LogEntry};

use crate::action::{Action, ActionKind, ActionResult};
use crate::actor::{Actor, ActorId, ActorKind, ConditionTick, EnergyClock, Hero};
use crate::combat::AttackProfile;
use crate::dungeon::{Pos, Stage};
use crate::monster::{Breed, Monster};
use crate::rng::RandomSource;

/// What one call to [`World::update`] accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateResult {
    /// The hero is up and has no action queued
    NeedsInput,
    /// An actor took a turn
    Progress,
    /// Every actor has had its chance this tick
    TickComplete,
    /// The hero is dead; nothing more will happen
    HeroDied,
}

/// The simulation state.
#[derive(Debug)]
pub struct World {
    pub(crate) stage: Stage,
    /// Registry in scheduling order
    pub(crate) actors: Vec<Actor>,
    next_id: u32,
    hero: ActorId,
    pub(crate) rng: Box<dyn RandomSource>,
    pub(crate) log: EventLog,
    /// Index of the next actor to consider in [`update`](Self::update)
    current: usize,
    ticks: u64,
    hero_dead: bool,
    last_hero_pos: Pos,
}

impl World {
    /// Create a world holding only the hero, who gets the first move.
    pub fn new(
        stage: Stage,
        hero: Hero,
        pos: Pos,
        max_health: i32,
        rng: impl RandomSource + 'static,
    ) -> Self {
        assert!(
            stage.is_passable(pos),
            "hero cannot start inside a wall at {pos}"
        );
        let id = ActorId(0);
        let actor = Actor::new(
            id,
            pos,
            max_health,
            EnergyClock::new().preloaded(),
            ActorKind::Hero(hero),
        );
        Self {
            stage,
            actors: vec![actor],
            next_id: 1,
            hero: id,
            rng: Box::new(rng),
            log: EventLog::new(),
            current: 0,
            ticks: 0,
            hero_dead: false,
            last_hero_pos: pos,
        }
    }

    /// Place a new, asleep monster at `pos`.
    pub fn spawn_monster(&mut self, breed: Arc<Breed>, pos: Pos) -> ActorId {
        assert!(
            self.is_open(pos),
            "cannot spawn {} at {pos}: blocked or occupied",
            breed.name
        );
        let id = ActorId(self.next_id);
        self.next_id += 1;

        let max_health = breed.max_health;
        let monster = Monster::spawn(breed, self.rng.as_mut());
        debug!(
            actor = %id,
            breed = %monster.breed().name,
            %pos,
            threshold = monster.frighten_threshold(),
            "spawned monster"
        );
        self.actors.push(Actor::new(
            id,
            pos,
            max_health,
            EnergyClock::new(),
            ActorKind::Monster(monster),
        ));
        id
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut EventLog {
        &mut self.log
    }

    pub fn rng(&mut self) -> &mut dyn RandomSource {
        self.rng.as_mut()
    }

    /// Completed ticks.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    pub const fn hero_id(&self) -> ActorId {
        self.hero
    }

    pub const fn is_hero_dead(&self) -> bool {
        self.hero_dead
    }

    /// The hero, or `None` once it has died.
    pub fn hero(&self) -> Option<&Actor> {
        self.try_actor(self.hero)
    }

    /// Where the hero is, or where it fell.
    pub fn hero_pos(&self) -> Pos {
        self.hero().map_or(self.last_hero_pos, |hero| hero.pos)
    }

    /// Actors in scheduling order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    /// Ids of every registered monster.
    pub fn monsters(&self) -> Vec<ActorId> {
        self.actors
            .iter()
            .filter(|actor| !actor.is_hero())
            .map(Actor::id)
            .collect()
    }

    pub(crate) fn try_index_of(&self, id: ActorId) -> Option<usize> {
        self.actors.iter().position(|actor| actor.id() == id)
    }

    pub(crate) fn index_of(&self, id: ActorId) -> usize {
        match self.try_index_of(id) {
            Some(index) => index,
            None => panic!("{id} is not registered in the world"),
        }
    }

    pub fn try_actor(&self, id: ActorId) -> Option<&Actor> {
        self.try_index_of(id).map(|index| &self.actors[index])
    }

    /// Look up a registered actor. Dead actors are unregistered, so this
    /// panics for them.
    pub fn actor(&self, id: ActorId) -> &Actor {
        &self.actors[self.index_of(id)]
    }

    pub fn actor_mut(&mut self, id: ActorId) -> &mut Actor {
        let index = self.index_of(id);
        &mut self.actors[index]
    }

    pub fn is_registered(&self, id: ActorId) -> bool {
        self.try_index_of(id).is_some()
    }

    pub fn monster(&self, id: ActorId) -> &Monster {
        match self.actor(id).as_monster() {
            Some(monster) => monster,
            None => panic!("{id} is not a monster"),
        }
    }

    pub(crate) fn monster_mut(&mut self, id: ActorId) -> &mut Monster {
        match self.actor_mut(id).as_monster_mut() {
            Some(monster) => monster,
            None => panic!("{id} is not a monster"),
        }
    }

    /// The living actor standing at `pos`, if any.
    pub fn actor_at(&self, pos: Pos) -> Option<ActorId> {
        self.actors
            .iter()
            .find(|actor| actor.pos == pos && actor.is_alive())
            .map(Actor::id)
    }

    /// On the stage, passable and unoccupied.
    pub fn is_open(&self, pos: Pos) -> bool {
        self.stage.contains(pos) && self.stage.is_passable(pos) && self.actor_at(pos).is_none()
    }

    /// Queue the hero's next action.
    pub fn set_hero_action(&mut self, kind: ActionKind) {
        let id = self.hero;
        assert!(!self.hero_dead, "the hero is dead and cannot act");
        if let Some(hero) = self.actor_mut(id).as_hero_mut() {
            hero.set_pending(kind);
        }
    }

    /// The action `id` takes this turn, or `None` if the hero is waiting on input.
    pub fn get_action(&mut self, id: ActorId) -> Option<Action> {
        let index = self.index_of(id);
        let actor = &mut self.actors[index];
        assert!(actor.is_alive(), "{} ({id}) cannot act while dead", actor.name());

        let kind = if actor.is_hero() {
            actor.as_hero_mut().and_then(Hero::take_pending)?
        } else {
            self.choose_action(id)
        };
        Some(Action::new(id, kind))
    }

    /// The melee attack `id` makes this turn, with universal penalties applied.
    pub fn get_attack(&mut self, id: ActorId) -> AttackProfile {
        let index = self.index_of(id);
        self.actors[index].get_attack(self.rng.as_mut())
    }

    /// Hurt `id` by `amount`. Returns true if this killed it.
    ///
    /// A killed actor is unregistered before this returns.
    pub fn take_damage(
        &mut self,
        id: ActorId,
        amount: i32,
        source: &str,
        attacker: Option<ActorId>,
    ) -> bool {
        let index = self.index_of(id);
        let died = self.actors[index].apply_damage(amount);
        trace!(actor = %id, amount, source, died, "damage taken");

        self.log.emit(GameEvent::Damaged {
            actor: id,
            amount,
            source: source.to_string(),
            attacker,
        });
        if attacker.is_none() {
            self.log.message(
                Cow::Owned(format!("{{1}} [are|is] hurt by {source}.")),
                &[id],
            );
        }

        if !self.actors[index].is_hero() {
            self.on_monster_damaged(id, amount);
        }

        if !died {
            return false;
        }

        self.log.emit(GameEvent::Died {
            actor: id,
            killer: attacker,
        });
        match attacker {
            Some(killer) => self.log.message("{1} kill[s] {2}.", &[killer, id]),
            None => self.log.message("{1} die[s].", &[id]),
        }

        // The victim is still registered here, so its breed is at hand.
        let experience = self.monster_experience(id);
        if let Some(killer) = attacker {
            self.on_killed(killer, experience);
        }
        self.on_died(id);
        self.remove_actor(id);
        true
    }

    fn monster_experience(&self, id: ActorId) -> i32 {
        self.actor(id)
            .as_monster()
            .map_or(0, |monster| monster.breed().experience)
    }

    fn on_killed(&mut self, killer: ActorId, experience: i32) {
        let Some(index) = self.try_index_of(killer) else {
            return;
        };
        if let Some(hero) = self.actors[index].as_hero_mut() {
            hero.on_kill(experience);
        }
    }

    fn on_died(&mut self, id: ActorId) {
        let actor = self.actor(id);
        debug!(actor = %id, name = actor.name(), pos = %actor.pos, "died");
        let (is_hero, pos) = (actor.is_hero(), actor.pos);
        if is_hero {
            self.last_hero_pos = pos;
            self.hero_dead = true;
        }
    }

    fn remove_actor(&mut self, id: ActorId) {
        let index = self.index_of(id);
        self.actors.remove(index);
        if index < self.current {
            self.current -= 1;
        }
    }

    /// Pay for the turn `id` just took and tick its conditions.
    pub fn finish_turn(&mut self, id: ActorId) {
        let index = self.index_of(id);
        let actor = &mut self.actors[index];
        assert!(
            actor.is_alive(),
            "{} ({id}) cannot finish a turn while dead",
            actor.name()
        );
        actor.energy.spend();

        let kinds = actor.conditions().kinds();
        for kind in kinds {
            // A damage-over-time condition may have killed its owner.
            let Some(index) = self.try_index_of(id) else {
                return;
            };
            match self.actors[index].conditions_mut().get_mut(kind).update() {
                ConditionTick::Idle => {}
                ConditionTick::Continued { intensity } => {
                    if let Some(on_update) = kind.hooks().on_update {
                        on_update(self, id, intensity);
                    }
                }
                ConditionTick::Expired => {
                    trace!(actor = %id, condition = %kind, "condition expired");
                    self.log.message(kind.hooks().expire_template, &[id]);
                    self.log.emit(GameEvent::ConditionExpired {
                        actor: id,
                        condition: kind,
                    });
                }
            }
        }

        let Some(index) = self.try_index_of(id) else {
            return;
        };
        if !self.actors[index].is_hero() {
            self.monster_end_turn(id);
        }
    }

    /// Advance the simulation until an actor acts, the tick ends, or the
    /// hero needs input.
    pub fn update(&mut self) -> UpdateResult {
        loop {
            if self.hero_dead {
                return UpdateResult::HeroDied;
            }

            if self.current >= self.actors.len() {
                self.current = 0;
                self.ticks += 1;
                trace!(tick = self.ticks, "tick complete");
                return UpdateResult::TickComplete;
            }

            let actor = &mut self.actors[self.current];
            let id = actor.id();
            let speed = actor.speed();
            if !(actor.energy.is_ready() || actor.energy.accumulate(speed)) {
                self.current += 1;
                continue;
            }

            let Some(action) = self.get_action(id) else {
                return UpdateResult::NeedsInput;
            };
            let is_hero = id == self.hero;
            let result = self.perform(action);

            // A hero action that could not happen costs nothing; ask again.
            if result == ActionResult::Failure && is_hero && !self.hero_dead {
                continue;
            }

            if self.is_registered(id) {
                self.finish_turn(id);
            }
            // Removed actors leave the cursor on whoever slid into their slot.
            if let Some(index) = self.try_index_of(id) {
                self.current = index + 1;
            }

            if self.hero_dead {
                return UpdateResult::HeroDied;
            }
            return UpdateResult::Progress;
        }
    }

    /// Run [`update`](Self::update) until the current tick is over.
    ///
    /// Stops early, returning the reason, if the hero needs input or dies.
    pub fn run_tick(&mut self) -> UpdateResult {
        loop {
            match self.update() {
                UpdateResult::Progress => {}
                other => return other,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedRng;
    use crate::monster::BreedDef;

    fn arena() -> Stage {
        Stage::walled(7, 7)
    }

    fn rat() -> Arc<Breed> {
        Arc::new(
            Breed::from_def(BreedDef {
                name: "rat".into(),
                max_health: 4,
                attacks: vec![AttackProfile::new("bite[s]", 1)],
                experience: 3,
                ..Default::default()
            })
            .unwrap(),
        )
    }

    fn world() -> World {
        World::new(
            arena(),
            Hero::new("Tamsin"),
            Pos::new(1, 1),
            20,
            ScriptedRng::new(),
        )
    }

    #[test]
    fn test_hero_moves_first() {
        let mut world = world();
        world.spawn_monster(rat(), Pos::new(5, 5));
        assert_eq!(world.update(), UpdateResult::NeedsInput);

        world.set_hero_action(ActionKind::Rest);
        assert_eq!(world.update(), UpdateResult::Progress);
        assert!(world.hero().is_some_and(|hero| hero.energy.current() == 0));
    }

    #[test]
    fn test_actor_lookup() {
        let mut world = world();
        let rat = world.spawn_monster(rat(), Pos::new(3, 3));
        assert_eq!(world.actor_at(Pos::new(3, 3)), Some(rat));
        assert_eq!(world.actor_at(Pos::new(1, 1)), Some(world.hero_id()));
        assert_eq!(world.actor_at(Pos::new(2, 2)), None);
        assert_eq!(world.monsters(), vec![rat]);
        assert!(!world.is_open(Pos::new(0, 0)));
    }

    #[test]
    #[should_panic(expected = "blocked or occupied")]
    fn test_spawn_on_wall_panics() {
        world().spawn_monster(rat(), Pos::new(0, 3));
    }

    #[test]
    fn test_kill_unregisters_and_rewards() {
        let mut world = world();
        let rat = world.spawn_monster(rat(), Pos::new(3, 3));
        let hero = world.hero_id();

        assert!(!world.take_damage(rat, 1, "punch", Some(hero)));
        assert!(world.take_damage(rat, 10, "punch", Some(hero)));
        assert!(!world.is_registered(rat));

        let hero = world.hero().and_then(Actor::as_hero).unwrap();
        assert_eq!(hero.experience(), 3);
        assert_eq!(hero.kills(), 1);
        assert!(world.log().events().contains(&GameEvent::Died {
            actor: rat,
            killer: Some(world.hero_id()),
        }));
    }

    #[test]
    #[should_panic(expected = "not registered")]
    fn test_damaging_removed_actor_panics() {
        let mut world = world();
        let rat = world.spawn_monster(rat(), Pos::new(3, 3));
        world.take_damage(rat, 10, "lightning", None);
        world.take_damage(rat, 1, "lightning", None);
    }

    #[test]
    fn test_hero_death_ends_the_run() {
        let mut world = world();
        let hero = world.hero_id();
        assert!(world.take_damage(hero, 50, "a falling rock", None));
        assert!(world.is_hero_dead());
        assert!(world.hero().is_none());
        assert_eq!(world.hero_pos(), Pos::new(1, 1));
        assert_eq!(world.update(), UpdateResult::HeroDied);
    }

    #[test]
    fn test_tick_counter_advances() {
        let mut world = world();
        world.spawn_monster(rat(), Pos::new(5, 5));
        world.set_hero_action(ActionKind::Rest);
        assert_eq!(world.run_tick(), UpdateResult::TickComplete);
        assert_eq!(world.ticks(), 1);
    }
}
