//! Monster action selection

use strum::IntoEnumIterator;
use tracing::trace;

use super::{MonsterState, MoveKind};
use crate::action::ActionKind;
use crate::actor::{ActorId, ConditionKind};
use crate::dungeon::{Direction, Pos};
use crate::world::World;

impl World {
    /// Pick what monster `id` does this turn.
    pub(crate) fn choose_action(&mut self, id: ActorId) -> ActionKind {
        let action = match self.monster(id).state() {
            MonsterState::Asleep => ActionKind::Rest,
            MonsterState::Awake => self.awake_action(id),
            MonsterState::Afraid => self.afraid_action(id),
        };
        trace!(actor = %id, ?action, "chose action");
        action
    }

    /// Whether using move `index` right now would accomplish anything.
    fn should_use(&self, id: ActorId, index: usize) -> bool {
        let actor = self.actor(id);
        let Some(monster) = actor.as_monster() else {
            return false;
        };
        match &monster.breed().moves[index].kind {
            MoveKind::Heal { .. } => !actor.health().is_full(),
            MoveKind::Haste { .. } => !actor.conditions().get(ConditionKind::Haste).is_active(),
            MoveKind::Bolt { attack } => self
                .hero()
                .is_some_and(|hero| self.can_target(id, hero.pos, attack.range())),
        }
    }

    fn awake_action(&mut self, id: ActorId) -> ActionKind {
        let monster = self.monster(id);
        let usable: Vec<usize> = (0..monster.breed().moves.len())
            .filter(|&index| monster.can_use(index) && self.should_use(id, index))
            .collect();
        if let Some(pick) = self.rng.choose_index(usable.len()) {
            let index = usable[pick];
            let target = match self.monster(id).breed().moves[index].kind {
                MoveKind::Bolt { .. } => Some(self.hero_id()),
                MoveKind::Heal { .. } | MoveKind::Haste { .. } => None,
            };
            return ActionKind::UseMove(index, target);
        }

        let Some(hero) = self.hero() else {
            return self.wander(id);
        };
        let (hero_id, hero_pos) = (hero.id(), hero.pos);
        let actor = self.actor(id);
        let pos = actor.pos;
        if pos.is_adjacent(hero_pos) {
            return ActionKind::Attack(hero_id);
        }

        let breed = self.monster(id).breed();
        if breed.is_immobile() {
            return ActionKind::Rest;
        }
        let (meander, tracking_range) = (breed.meander, breed.tracking_range);
        if pos.king_length(hero_pos) > tracking_range || self.rng.percent(meander) {
            return self.wander(id);
        }

        self.step_toward(pos, hero_pos)
            .map_or(ActionKind::Rest, ActionKind::Step)
    }

    fn afraid_action(&mut self, id: ActorId) -> ActionKind {
        let Some(hero) = self.hero() else {
            return ActionKind::Rest;
        };
        let (hero_id, hero_pos) = (hero.id(), hero.pos);
        let pos = self.actor(id).pos;

        // Immobile breeds are never afraid, so fleeing is always an option here.
        if let Some(dir) = self.step_away(pos, hero_pos) {
            return ActionKind::Step(dir);
        }

        // Cornered.
        if pos.is_adjacent(hero_pos) {
            ActionKind::Attack(hero_id)
        } else {
            ActionKind::Rest
        }
    }

    /// Directions `pos` can step in without bumping into anything.
    fn open_steps(&self, pos: Pos) -> impl Iterator<Item = Direction> + '_ {
        Direction::iter().filter(move |&dir| self.is_open(pos.offset(dir)))
    }

    /// The open step that gets closest to `goal`, if any gets closer at all.
    fn step_toward(&self, pos: Pos, goal: Pos) -> Option<Direction> {
        let distance = pos.king_length(goal);
        self.open_steps(pos)
            .map(|dir| (dir, pos.offset(dir).king_length(goal)))
            .filter(|&(_, after)| after < distance)
            .min_by_key(|&(_, after)| after)
            .map(|(dir, _)| dir)
    }

    /// The open step that gets farthest from `threat`, if any gets farther at all.
    fn step_away(&self, pos: Pos, threat: Pos) -> Option<Direction> {
        let distance = pos.king_length(threat);
        self.open_steps(pos)
            .map(|dir| (dir, pos.offset(dir).king_length(threat)))
            .filter(|&(_, after)| after > distance)
            .max_by_key(|&(_, after)| after)
            .map(|(dir, _)| dir)
    }

    /// A random open step, or rest if boxed in.
    fn wander(&mut self, id: ActorId) -> ActionKind {
        let pos = self.actor(id).pos;
        if self.monster(id).breed().is_immobile() {
            return ActionKind::Rest;
        }
        let steps: Vec<Direction> = self.open_steps(pos).collect();
        match self.rng.choose_index(steps.len()) {
            Some(pick) => ActionKind::Step(steps[pick]),
            None => ActionKind::Rest,
        }
    }
}
