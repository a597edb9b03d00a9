//! Stage tile types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// What occupies one cell of the stage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum TileKind {
    #[default]
    Floor = 0,
    Wall = 1,
    /// Blocks movement but not sight
    Window = 2,
}

impl TileKind {
    pub const fn is_passable(&self) -> bool {
        matches!(self, TileKind::Floor)
    }

    pub const fn is_transparent(&self) -> bool {
        matches!(self, TileKind::Floor | TileKind::Window)
    }

    /// Map symbol used by [`Stage::from_ascii`](super::Stage::from_ascii).
    pub const fn symbol(&self) -> char {
        match self {
            TileKind::Floor => '.',
            TileKind::Wall => '#',
            TileKind::Window => '"',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(TileKind::Floor),
            '#' => Some(TileKind::Wall),
            '"' => Some(TileKind::Window),
            _ => None,
        }
    }
}
