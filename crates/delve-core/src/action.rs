//! Actions and how the world carries them out

use std::borrow::Cow;

use tracing::trace;

use crate::actor::{ActorId, ConditionKind};
use crate::combat::{AttackProfile, Element, Resolution};
use crate::dungeon::Direction;
use crate::monster::MoveKind;
use crate::world::{GameEvent, World};

/// What an actor wants to do with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Rest,
    /// Walk one cell; walking into an enemy attacks it
    Step(Direction),
    Attack(ActorId),
    /// Use the breed move at this index, aimed at an optional target
    UseMove(usize, Option<ActorId>),
}

/// An action bound to the actor performing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub actor: ActorId,
    pub kind: ActionKind,
}

impl Action {
    pub const fn new(actor: ActorId, kind: ActionKind) -> Self {
        Self { actor, kind }
    }
}

/// Whether an action happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    Success,
    /// Nothing happened; the turn was not used up
    Failure,
}

impl World {
    /// Carry out `action` for its actor.
    pub fn perform(&mut self, action: Action) -> ActionResult {
        let Action { actor, kind } = action;
        assert!(
            self.actor(actor).is_alive(),
            "{actor} cannot perform {kind:?} while dead"
        );
        trace!(%actor, ?kind, "perform");

        match kind {
            ActionKind::Rest => self.rest(actor),
            ActionKind::Step(dir) => self.step(actor, dir),
            ActionKind::Attack(target) => self.melee(actor, target),
            ActionKind::UseMove(index, target) => self.use_move(actor, index, target),
        }
    }

    fn rest(&mut self, id: ActorId) -> ActionResult {
        let restored = self.actor_mut(id).health_mut().heal(1);
        if restored > 0 {
            self.log.emit(GameEvent::Healed {
                actor: id,
                amount: restored,
            });
        }
        ActionResult::Success
    }

    fn step(&mut self, id: ActorId, dir: Direction) -> ActionResult {
        let from = self.actor(id).pos;
        let to = from.offset(dir);
        if !self.stage.contains(to) {
            return ActionResult::Failure;
        }

        if let Some(other) = self.actor_at(to) {
            // Only the hero and monsters fight; monsters do not trample each other.
            let hostile = self.actor(id).is_hero() != self.actor(other).is_hero();
            return if hostile {
                self.melee(id, other)
            } else {
                ActionResult::Failure
            };
        }

        if !self.stage.is_passable(to) {
            return ActionResult::Failure;
        }
        self.actor_mut(id).pos = to;
        self.log.emit(GameEvent::Moved { actor: id, from, to });
        ActionResult::Success
    }

    fn melee(&mut self, attacker: ActorId, defender: ActorId) -> ActionResult {
        let (Some(from), Some(target)) = (self.try_actor(attacker), self.try_actor(defender)) else {
            return ActionResult::Failure;
        };
        if !from.pos.is_adjacent(target.pos) {
            return ActionResult::Failure;
        }

        let attack = self.get_attack(attacker);
        self.strike(attacker, defender, &attack);
        ActionResult::Success
    }

    /// Resolve `attack` against `defender` and apply whatever it does.
    fn strike(&mut self, attacker: ActorId, defender: ActorId, attack: &AttackProfile) {
        let index = self.index_of(defender);
        let resolution = attack.resolve(&self.actors[index], self.rng.as_mut());

        let (damage, element) = match resolution {
            Resolution::Miss => {
                self.log.message("{1} miss[es] {2}.", &[attacker, defender]);
                self.log.emit(GameEvent::Missed { attacker, defender });
                return;
            }
            Resolution::Hit { damage, element } => (damage, element),
        };

        if damage == 0 {
            self.log.message("{1} [don't|doesn't] hurt {2}.", &[attacker, defender]);
            return;
        }

        self.log.message(
            Cow::Owned(format!("{{1}} {} {{2}}.", attack.verb())),
            &[attacker, defender],
        );
        self.on_give_damage(attacker, defender, damage);
        if self.take_damage(defender, damage, attack.verb(), Some(attacker)) {
            return;
        }

        // Any resistance at all shrugs off the lingering effect.
        if self.actor(defender).conditions().resistance(element) == 0 {
            self.elemental_side_effect(defender, element, damage);
        }
    }

    /// Leave the condition an elemental hit brings with it.
    fn elemental_side_effect(&mut self, id: ActorId, element: Element, damage: i32) {
        let Some(kind) = element.side_effect() else {
            return;
        };
        let (duration, intensity) = match kind {
            ConditionKind::Cold => (3 + damage / 2, 1),
            ConditionKind::Poison => (1 + damage, 1),
            ConditionKind::Dazzle => (3 + damage / 2, 1 + damage / 4),
            ConditionKind::Haste | ConditionKind::Resist(_) => return,
        };
        self.afflict(id, kind, duration, intensity);
    }

    /// Start `kind` on `id`, or lengthen it if already running.
    pub fn afflict(&mut self, id: ActorId, kind: ConditionKind, duration: i32, intensity: i32) {
        let condition = self.actor_mut(id).conditions_mut().get_mut(kind);
        if condition.is_active() {
            condition.extend(duration);
        } else {
            condition.activate(duration, intensity);
            self.log.message(kind.hooks().apply_template, &[id]);
        }
        self.log.emit(GameEvent::ConditionApplied {
            actor: id,
            condition: kind,
            duration,
        });
    }

    fn use_move(&mut self, id: ActorId, index: usize, target: Option<ActorId>) -> ActionResult {
        let monster = self.monster(id);
        assert!(
            index < monster.breed().moves.len(),
            "{} has no move {index}",
            monster.breed().name
        );
        if !monster.can_use(index) {
            return ActionResult::Failure;
        }
        let kind = monster.breed().moves[index].kind.clone();

        match kind {
            MoveKind::Heal { amount } => {
                let restored = self.actor_mut(id).health_mut().heal(amount);
                self.log.message("{1} heal[s] {1}.", &[id]);
                self.log.emit(GameEvent::Healed {
                    actor: id,
                    amount: restored,
                });
            }
            MoveKind::Haste { duration, speed } => {
                self.afflict(id, ConditionKind::Haste, duration, speed);
            }
            MoveKind::Bolt { attack } => {
                let Some(target) = target.filter(|&target| self.is_registered(target)) else {
                    return ActionResult::Failure;
                };
                if !self.can_target(id, self.actor(target).pos, attack.range()) {
                    return ActionResult::Failure;
                }
                let attack = self.actor(id).apply_penalties(&attack);
                self.strike(id, target, &attack);
            }
        }

        let slot = self.index_of(id);
        if let Some(monster) = self.actors[slot].as_monster_mut() {
            monster.use_move(index, self.rng.as_mut());
        }
        self.log.emit(GameEvent::MoveUsed { actor: id, index });
        ActionResult::Success
    }
}
