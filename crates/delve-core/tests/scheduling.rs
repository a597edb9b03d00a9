//! Turn scheduling tests
//!
//! Energy accumulation across ticks, first-mover status for the hero, the
//! input handoff, and actors leaving the schedule when they die.

use std::sync::Arc;

use delve_core::actor::Hero;
use delve_core::combat::AttackProfile;
use delve_core::dungeon::{Direction, Pos, Stage};
use delve_core::monster::{Breed, BreedDef, MonsterState};
use delve_core::{ActionKind, GameEvent, GameRng, ScriptedRng, UpdateResult, World};

fn bat(speed: i32) -> Arc<Breed> {
    Arc::new(
        Breed::from_def(BreedDef {
            name: "bat".into(),
            max_health: 5,
            speed,
            // Never notices the hero, so it always wanders.
            tracking_range: 0,
            attacks: vec![AttackProfile::new("bite[s]", 1)],
            ..Default::default()
        })
        .unwrap(),
    )
}

#[test]
fn test_hero_is_asked_first() {
    let mut world = World::new(Stage::walled(10, 10), Hero::new("Tamsin"), Pos::new(1, 1), 40, ScriptedRng::new());
    world.spawn_monster(bat(0), Pos::new(8, 8));

    assert_eq!(world.update(), UpdateResult::NeedsInput);
    assert!(world.log().events().is_empty());
    // Still waiting until something is queued.
    assert_eq!(world.update(), UpdateResult::NeedsInput);
}

#[test]
fn test_failed_hero_action_costs_nothing() {
    let mut world = World::new(Stage::walled(10, 10), Hero::new("Tamsin"), Pos::new(1, 1), 40, ScriptedRng::new());
    world.set_hero_action(ActionKind::Step(Direction::North));

    assert_eq!(world.update(), UpdateResult::NeedsInput);
    let hero = world.hero().unwrap();
    assert_eq!(hero.pos, Pos::new(1, 1));
    assert!(hero.energy.is_ready());
}

#[test]
fn test_faster_monster_takes_more_turns() {
    let mut world = World::new(Stage::walled(40, 40), Hero::new("Tamsin"), Pos::new(1, 1), 40, GameRng::new(11));
    let bat = world.spawn_monster(bat(2), Pos::new(30, 30));
    world.change_state(bat, MonsterState::Awake);

    let mut hero_turns = 0;
    while world.ticks() < 48 {
        match world.update() {
            UpdateResult::NeedsInput => {
                world.set_hero_action(ActionKind::Rest);
                hero_turns += 1;
            }
            UpdateResult::HeroDied => panic!("nothing here can kill the hero"),
            UpdateResult::Progress | UpdateResult::TickComplete => {}
        }
    }

    let bat_turns = world
        .log()
        .events()
        .iter()
        .filter(|event| matches!(event, GameEvent::Moved { actor, .. } if *actor == bat))
        .count();
    // 60 energy a tick for the hero, 100 for the bat, 240 per action.
    assert_eq!(hero_turns, 12);
    assert_eq!(bat_turns, 20);
}

#[test]
fn test_dead_monster_leaves_the_schedule() {
    let mut world = World::new(Stage::walled(10, 10), Hero::new("Tamsin"), Pos::new(1, 1), 40, ScriptedRng::new());
    let doomed = world.spawn_monster(bat(0), Pos::new(5, 5));
    let survivor = world.spawn_monster(bat(0), Pos::new(7, 7));

    world.take_damage(doomed, 10, "a falling rock", None);
    assert_eq!(world.monsters(), vec![survivor]);

    world.set_hero_action(ActionKind::Rest);
    assert_eq!(world.run_tick(), UpdateResult::TickComplete);
    assert_eq!(world.actor(survivor).energy.current(), 60);
}

#[test]
fn test_killing_blow_mid_tick_keeps_the_order() {
    // Threshold rolls, then the hero's strike rolls.
    let rng = ScriptedRng::new().with_ints([100, 100, 1]);
    let hero = Hero::new("Tamsin").with_attack(AttackProfile::new("smite[s]", 50));
    let mut world = World::new(Stage::walled(10, 10), hero, Pos::new(1, 1), 40, rng);
    let victim = world.spawn_monster(bat(0), Pos::new(2, 2));
    let bystander = world.spawn_monster(bat(0), Pos::new(7, 7));

    world.set_hero_action(ActionKind::Attack(victim));
    assert_eq!(world.update(), UpdateResult::Progress);
    assert!(!world.is_registered(victim));

    // The bystander still banks its energy this tick.
    assert_eq!(world.run_tick(), UpdateResult::TickComplete);
    assert_eq!(world.actor(bystander).energy.current(), 60);
    assert_eq!(world.hero().unwrap().as_hero().unwrap().kills(), 1);
}
