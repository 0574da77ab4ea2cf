//! Rectangular rooms produced by the level generator.

use delve_core::{Point, Range};
use rand::{Rng, RngExt};

/// Role of a room on its floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomKind {
    #[default]
    Normal,
    Entrance,
    Exit,
}

/// An axis-aligned room. `(x, y)` is the top-left floor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub kind: RoomKind,
    /// Only meaningful while the generator is linking rooms together.
    pub connected: bool,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind: RoomKind::Normal,
            connected: false,
        }
    }

    /// Integer centre, rounding toward the top-left.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// The room's cells as a half-open range.
    pub fn range(&self) -> Range {
        Range::with_size(self.x, self.y, self.width, self.height)
    }

    /// Whether the two rooms come within `buffer` cells of each other.
    /// With `buffer == 0` this is plain rectangle overlap.
    pub fn overlaps(&self, other: &Room, buffer: i32) -> bool {
        self.x < other.x + other.width + buffer
            && self.x + self.width + buffer > other.x
            && self.y < other.y + other.height + buffer
            && self.y + self.height + buffer > other.y
    }

    /// A uniformly random cell at least `edge_buffer` cells away from the
    /// room's edge. The buffer shrinks per axis when the room is too small
    /// to honour it, so a cell inside the room is always returned.
    pub fn random_position<R: Rng>(&self, rng: &mut R, edge_buffer: i32) -> Point {
        let bx = edge_buffer.clamp(0, (self.width - 1).max(0) / 2);
        let by = edge_buffer.clamp(0, (self.height - 1).max(0) / 2);
        let x = rng.random_range(self.x + bx..=self.x + self.width - 1 - bx);
        let y = rng.random_range(self.y + by..=self.y + self.height - 1 - by);
        Point::new(x, y)
    }
}
