//! Headless arena driver
//!
//! Drops the hero into a small arena with a handful of monsters, plays the
//! hero with a fixed policy and prints what happens, either as sentences or
//! as one JSON event per line.

mod narrate;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;
use tracing::{debug, info};

use delve_core::actor::Hero;
use delve_core::combat::AttackProfile;
use delve_core::dungeon::{Direction, Pos, Stage};
use delve_core::monster::{Bestiary, MonsterState};
use delve_core::{ActionKind, ContentError, GameRng, UpdateResult, World};

use crate::narrate::Narrator;

const ARENA: [&str; 15] = [
    "##########################",
    "#........................#",
    "#........................#",
    "#...##.............##....#",
    "#...##.............##....#",
    "#........................#",
    "#.........\"\"\"\"...........#",
    "#.........#..#...........#",
    "#.........#..#...........#",
    "#.........\"\"\"\"...........#",
    "#...##.............##....#",
    "#...##.............##....#",
    "#........................#",
    "#........................#",
    "##########################",
];

const HERO_START: Pos = Pos::new(2, 7);

/// Where monsters are placed, in order.
const SPAWN_POINTS: [Pos; 8] = [
    Pos::new(22, 2),
    Pos::new(22, 12),
    Pos::new(16, 7),
    Pos::new(8, 2),
    Pos::new(8, 12),
    Pos::new(23, 7),
    Pos::new(15, 1),
    Pos::new(15, 13),
];

const HERO_HEALTH: i32 = 40;

/// Headless delve arena
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Run a scripted arena fight and print the log", long_about = None)]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum ticks to simulate
    #[arg(long, default_value_t = 500)]
    ticks: u64,

    /// Bestiary JSON file (defaults to the built-in one)
    #[arg(long)]
    bestiary: Option<PathBuf>,

    /// Breed to spawn; repeat for more monsters
    #[arg(long = "spawn", value_name = "BREED")]
    spawn: Vec<String>,

    /// Print events as JSON lines instead of sentences
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Error)]
enum DriverError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("cannot read bestiary {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no breed named {0:?} in the bestiary")]
    UnknownBreed(String),

    #[error("the arena only has room for {0} monsters")]
    Crowded(usize),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("delve=info")),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("delve: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_bestiary(path: Option<&PathBuf>) -> Result<Bestiary, DriverError> {
    let Some(path) = path else {
        return Ok(Bestiary::builtin()?);
    };
    let json = std::fs::read_to_string(path).map_err(|source| DriverError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(Bestiary::from_json(&json)?)
}

fn run(args: &Args) -> Result<(), DriverError> {
    let bestiary = load_bestiary(args.bestiary.as_ref())?;
    let names: Vec<String> = if args.spawn.is_empty() {
        ["goblin", "goblin", "goblin shaman", "frost wolf"]
            .iter()
            .map(|name| name.to_string())
            .collect()
    } else {
        args.spawn.clone()
    };
    if names.len() > SPAWN_POINTS.len() {
        return Err(DriverError::Crowded(SPAWN_POINTS.len()));
    }

    let seed = args.seed.unwrap_or_else(rand_seed);
    info!(seed, ticks = args.ticks, monsters = names.len(), "starting arena");

    let stage = Stage::from_ascii(&ARENA)?;
    let hero = Hero::new("hero")
        .with_attack(AttackProfile::new("slash[es]", 5))
        .with_armor(6);
    let mut world = World::new(stage, hero, HERO_START, HERO_HEALTH, GameRng::new(seed));
    let mut narrator = Narrator::new(world.hero_id());

    for (name, pos) in names.iter().zip(SPAWN_POINTS) {
        let breed = bestiary
            .get(name)
            .ok_or_else(|| DriverError::UnknownBreed(name.clone()))?;
        let id = world.spawn_monster(Arc::clone(&breed), pos);
        narrator.introduce(id, &breed.name, breed.pronoun);
    }

    notice_hero(&mut world);
    while world.ticks() < args.ticks {
        let result = world.update();
        flush(&mut world, &narrator, args.json)?;
        match result {
            UpdateResult::NeedsInput => {
                let action = hero_policy(&world);
                world.set_hero_action(action);
            }
            UpdateResult::TickComplete => notice_hero(&mut world),
            UpdateResult::Progress => {}
            UpdateResult::HeroDied => {
                info!(ticks = world.ticks(), "the hero has fallen");
                break;
            }
        }
        if world.monsters().is_empty() {
            info!(ticks = world.ticks(), "the arena is clear");
            break;
        }
    }
    flush(&mut world, &narrator, args.json)?;

    if let Some(hero) = world.hero().and_then(|actor| actor.as_hero()) {
        info!(
            kills = hero.kills(),
            experience = hero.experience(),
            "run finished"
        );
    }
    Ok(())
}

fn rand_seed() -> u64 {
    GameRng::from_entropy().seed()
}

/// Sleeping monsters wake once the hero is inside their tracking range and
/// in plain view.
fn notice_hero(world: &mut World) {
    let Some(hero_pos) = world.hero().map(|hero| hero.pos) else {
        return;
    };
    for id in world.monsters() {
        let monster = world.monster(id);
        if monster.state() != MonsterState::Asleep {
            continue;
        }
        let pos = world.actor(id).pos;
        if pos.king_length(hero_pos) <= monster.breed().tracking_range && world.is_visible_to_hero(pos) {
            debug!(%id, %pos, "monster notices the hero");
            world.wake_up(id);
        }
    }
}

/// Swing at something adjacent, otherwise close in on the nearest monster.
fn hero_policy(world: &World) -> ActionKind {
    let hero = world.hero_pos();
    let nearest = world
        .monsters()
        .into_iter()
        .min_by_key(|&id| (world.actor(id).pos.king_length(hero), id));
    let Some(target) = nearest else {
        return ActionKind::Rest;
    };

    let pos = world.actor(target).pos;
    if pos.is_adjacent(hero) {
        return ActionKind::Attack(target);
    }
    match Direction::toward(hero, pos) {
        Some(dir) if world.is_open(hero.offset(dir)) => ActionKind::Step(dir),
        _ => ActionKind::Rest,
    }
}

fn flush(world: &mut World, narrator: &Narrator, json: bool) -> Result<(), DriverError> {
    let (entries, events) = world.log_mut().drain();
    if json {
        for event in &events {
            println!("{}", serde_json::to_string(event)?);
        }
    } else {
        for entry in &entries {
            println!("{}", narrator.render(entry));
        }
    }
    Ok(())
}
