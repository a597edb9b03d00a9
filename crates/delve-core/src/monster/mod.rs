//! Monsters
//!
//! Breeds are shared content; [`Monster`] is the per-instance state. The
//! fear state machine, witness propagation and the AI act across actors, so
//! they are written as methods on [`World`](crate::world::World) in
//! [`fear`] and [`ai`].

mod ai;
mod breed;
mod fear;
mod monst;

pub use breed::{Bestiary, Breed, BreedDef, BreedFlags, Move, MoveKind, Pronoun};
pub use monst::{Monster, MonsterState};
