//! Condition lifecycle tests through the world
//!
//! Conditions tick once per owner turn in `finish_turn`, run their per-turn
//! effect, and narrate wearing off exactly once.

use std::sync::Arc;

use delve_core::actor::{ConditionKind, EnergyClock, Hero};
use delve_core::combat::{AttackProfile, Element};
use delve_core::dungeon::{Pos, Stage};
use delve_core::monster::{Breed, BreedDef};
use delve_core::{ActorId, GameEvent, ScriptedRng, World};

fn world() -> World {
    World::new(Stage::walled(12, 12), Hero::new("Tamsin"), Pos::new(1, 1), 40, ScriptedRng::new())
}

fn slime(health: i32) -> Arc<Breed> {
    Arc::new(
        Breed::from_def(BreedDef {
            name: "slime".into(),
            max_health: health,
            attacks: vec![AttackProfile::new("ooze[s] on", 1)],
            ..Default::default()
        })
        .unwrap(),
    )
}

fn end_turn(world: &mut World, id: ActorId) {
    world.actor_mut(id).energy = EnergyClock::new().preloaded();
    world.finish_turn(id);
}

fn expiries(world: &World, id: ActorId, kind: ConditionKind) -> usize {
    world
        .log()
        .events()
        .iter()
        .filter(|event| {
            **event
                == GameEvent::ConditionExpired {
                    actor: id,
                    condition: kind,
                }
        })
        .count()
}

#[test]
fn test_haste_runs_its_course() {
    let mut world = world();
    let hero = world.hero_id();
    world.afflict(hero, ConditionKind::Haste, 3, 5);
    assert_eq!(world.actor(hero).speed(), 5);

    for _ in 0..3 {
        end_turn(&mut world, hero);
    }
    let haste = world.actor(hero).conditions().get(ConditionKind::Haste);
    assert!(!haste.is_active());
    assert_eq!(haste.intensity(), 0);
    assert_eq!(expiries(&world, hero, ConditionKind::Haste), 1);

    end_turn(&mut world, hero);
    assert_eq!(expiries(&world, hero, ConditionKind::Haste), 1);
    assert!(
        world
            .log()
            .entries()
            .iter()
            .any(|entry| entry.template == "{1} slow[s] back down." && entry.participants == vec![hero])
    );
}

#[test]
fn test_cancel_skips_the_narration() {
    let mut world = world();
    let hero = world.hero_id();
    world.afflict(hero, ConditionKind::Dazzle, 4, 2);
    world
        .actor_mut(hero)
        .conditions_mut()
        .get_mut(ConditionKind::Dazzle)
        .cancel();

    for _ in 0..4 {
        end_turn(&mut world, hero);
    }
    assert_eq!(expiries(&world, hero, ConditionKind::Dazzle), 0);
}

#[test]
fn test_poison_hurts_every_turn_until_death() {
    let mut world = world();
    let slime = world.spawn_monster(slime(2), Pos::new(5, 5));
    world.afflict(slime, ConditionKind::Poison, 5, 1);

    end_turn(&mut world, slime);
    assert_eq!(world.actor(slime).health().current(), 1);

    end_turn(&mut world, slime);
    assert!(!world.is_registered(slime));
    assert!(world.log().events().contains(&GameEvent::Died {
        actor: slime,
        killer: None,
    }));
}

#[test]
fn test_reapplying_extends_instead_of_stacking() {
    let mut world = world();
    let slime = world.spawn_monster(slime(30), Pos::new(5, 5));
    world.afflict(slime, ConditionKind::Cold, 3, 1);
    world.afflict(slime, ConditionKind::Cold, 2, 4);

    let cold = world.actor(slime).conditions().get(ConditionKind::Cold);
    assert_eq!(cold.duration(), 5);
    assert_eq!(cold.intensity(), 1);
    assert_eq!(world.actor(slime).speed(), -1);
}

#[test]
fn test_resistance_softens_matching_hits_only() {
    let mut world = world();
    let hero = world.hero_id();
    world.afflict(hero, ConditionKind::Resist(Element::Fire), 10, 1);

    let fire = world.actor(hero).defend(&AttackProfile::new("burn[s]", 8).brand(Element::Fire));
    let acid = world.actor(hero).defend(&AttackProfile::new("burn[s]", 8).brand(Element::Acid));
    assert_eq!(fire.final_damage(), 4);
    assert_eq!(acid.final_damage(), 8);
}
