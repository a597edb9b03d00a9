//! The stage grid

use serde::{Deserialize, Serialize};

use super::{Pos, TileKind};
use crate::world::ContentError;

/// A fixed-size grid of tiles.
///
/// Every query takes a position that must lie inside the grid; asking about
/// anything outside it is a bug in the caller and panics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
}

impl Stage {
    /// An open stage of floor tiles.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "stage must not be empty, got {width}x{height}");
        Self {
            width,
            height,
            tiles: vec![TileKind::Floor; (width * height) as usize],
        }
    }

    /// An open stage ringed by walls.
    pub fn walled(width: i32, height: i32) -> Self {
        let mut stage = Self::new(width, height);
        for x in 0..width {
            stage.set_tile(Pos::new(x, 0), TileKind::Wall);
            stage.set_tile(Pos::new(x, height - 1), TileKind::Wall);
        }
        for y in 0..height {
            stage.set_tile(Pos::new(0, y), TileKind::Wall);
            stage.set_tile(Pos::new(width - 1, y), TileKind::Wall);
        }
        stage
    }

    /// Build a stage from rows of map symbols (`#` wall, `.` floor, `"` window).
    pub fn from_ascii(rows: &[&str]) -> Result<Self, ContentError> {
        let Some(first) = rows.first() else {
            return Err(ContentError::EmptyStage);
        };
        let width = first.chars().count();
        if width == 0 {
            return Err(ContentError::EmptyStage);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(ContentError::RaggedStage {
                    row: y,
                    found,
                    expected: width,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                let tile = TileKind::from_symbol(symbol)
                    .ok_or(ContentError::UnknownTile { symbol, x, y })?;
                tiles.push(tile);
            }
        }

        Ok(Self {
            width: width as i32,
            height: rows.len() as i32,
            tiles,
        })
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Pos) -> usize {
        assert!(
            self.contains(pos),
            "position {pos} is outside the {}x{} stage",
            self.width,
            self.height
        );
        (pos.y * self.width + pos.x) as usize
    }

    pub fn tile(&self, pos: Pos) -> TileKind {
        self.tiles[self.index(pos)]
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        let index = self.index(pos);
        self.tiles[index] = tile;
    }

    pub fn is_passable(&self, pos: Pos) -> bool {
        self.tile(pos).is_passable()
    }

    pub fn is_transparent(&self, pos: Pos) -> bool {
        self.tile(pos).is_transparent()
    }

    /// Cells on the Bresenham line from `from` to `to`, both endpoints included.
    pub fn line(&self, from: Pos, to: Pos) -> Vec<Pos> {
        // Both endpoints must be on the stage; the line between them then is too.
        self.index(from);
        self.index(to);

        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;

        let mut cells = Vec::with_capacity((dx.max(-dy) + 1) as usize);
        let mut x = from.x;
        let mut y = from.y;
        loop {
            cells.push(Pos::new(x, y));
            if x == to.x && y == to.y {
                return cells;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Check if nothing opaque lies strictly between two cells.
    ///
    /// The endpoints themselves may be opaque: a wall can be seen, just not
    /// seen through.
    pub fn has_line_of_sight(&self, from: Pos, to: Pos) -> bool {
        let line = self.line(from, to);
        let interior = &line[1..line.len().saturating_sub(1).max(1)];
        interior.iter().all(|&pos| self.is_transparent(pos))
    }
}
