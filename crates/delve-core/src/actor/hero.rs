//! The player-controlled actor

use crate::action::ActionKind;
use crate::combat::AttackProfile;

/// Hero-specific state.
///
/// The hero never picks its own actions: the driver supplies one with
/// [`World::set_hero_action`](crate::world::World::set_hero_action) and the
/// scheduler waits until it has.
#[derive(Debug, Clone, PartialEq)]
pub struct Hero {
    pub name: String,
    attack: AttackProfile,
    pub armor: i32,
    pub dodge: i32,
    pending: Option<ActionKind>,
    experience: i32,
    kills: u32,
}

impl Hero {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attack: AttackProfile::new("punch[es]", 3),
            armor: 0,
            dodge: 20,
            pending: None,
            experience: 0,
            kills: 0,
        }
    }

    /// Replace the hero's bare-handed attack, e.g. with a wielded weapon's.
    #[must_use]
    pub fn with_attack(mut self, attack: AttackProfile) -> Self {
        self.attack = attack;
        self
    }

    #[must_use]
    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }

    #[must_use]
    pub fn with_dodge(mut self, dodge: i32) -> Self {
        self.dodge = dodge;
        self
    }

    pub fn attack(&self) -> &AttackProfile {
        &self.attack
    }

    pub fn set_attack(&mut self, attack: AttackProfile) {
        self.attack = attack;
    }

    pub fn has_pending_action(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn set_pending(&mut self, action: ActionKind) {
        self.pending = Some(action);
    }

    pub(crate) fn take_pending(&mut self) -> Option<ActionKind> {
        self.pending.take()
    }

    pub const fn experience(&self) -> i32 {
        self.experience
    }

    pub const fn kills(&self) -> u32 {
        self.kills
    }

    pub(crate) fn on_kill(&mut self, experience: i32) {
        self.experience += experience;
        self.kills += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_action_is_taken_once() {
        let mut hero = Hero::new("Tamsin");
        assert!(!hero.has_pending_action());
        hero.set_pending(ActionKind::Rest);
        assert_eq!(hero.take_pending(), Some(ActionKind::Rest));
        assert_eq!(hero.take_pending(), None);
    }

    #[test]
    fn test_kills_accumulate_experience() {
        let mut hero = Hero::new("Tamsin");
        hero.on_kill(7);
        hero.on_kill(3);
        assert_eq!(hero.experience(), 10);
        assert_eq!(hero.kills(), 2);
    }
}
