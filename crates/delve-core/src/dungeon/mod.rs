//! Dungeon query surface
//!
//! Positions, tiles and the stage grid the combat core asks about
//! passability, transparency and line of sight.

mod position;
mod stage;
mod tile;

pub use position::{Direction, Pos};
pub use stage::Stage;
pub use tile::TileKind;
