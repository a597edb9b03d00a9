//! delve-core: turn-based combat and monster AI
//!
//! Energy-based scheduling, timed conditions, composable attack profiles and
//! the fear state machine that drives monsters. No I/O: the driver feeds the
//! hero's actions in and reads the event stream out.

pub mod action;
pub mod actor;
pub mod combat;
pub mod dungeon;
pub mod monster;
pub mod world;

mod consts;
mod rng;
mod stat;

pub use consts::*;
pub use rng::{GameRng, RandomSource, ScriptedRng};
pub use stat::StatRange;

pub use action::{Action, ActionKind, ActionResult};
pub use actor::{Actor, ActorId};
pub use world::{ContentError, EventLog, GameEvent, LogEntry, UpdateResult, World};
