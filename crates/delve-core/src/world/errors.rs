//! Content-load errors

use thiserror::Error;

/// Why a bestiary or stage description was rejected.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("malformed content: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("breed '{breed}' has no attacks")]
    NoAttacks { breed: String },

    #[error("breed '{breed}' has non-positive max health {max_health}")]
    BadHealth { breed: String, max_health: i32 },

    #[error("move {index} of breed '{breed}' has a non-positive rate")]
    BadMoveRate { breed: String, index: usize },

    #[error("breed '{breed}' has unknown flag '{flag}'")]
    UnknownFlag { breed: String, flag: String },

    #[error("breed '{0}' is defined more than once")]
    DuplicateBreed(String),

    #[error("stage has no rows")]
    EmptyStage,

    #[error("stage row {row} is {found} tiles wide, expected {expected}")]
    RaggedStage {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unknown tile '{symbol}' at ({x}, {y})")]
    UnknownTile { symbol: char, x: usize, y: usize },
}
