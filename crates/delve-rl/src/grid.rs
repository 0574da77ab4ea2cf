//! The floor's tile grid.
//!
//! [`TileGrid`] owns a fixed `width × height` array of [`Tile`]s for the
//! lifetime of one floor. Every query is bounds-checked: cells outside the
//! grid read as opaque, unwalkable walls and writes to them are ignored.

use delve_core::{Point, Range};
use delve_paths::WalkMask;

use crate::tile::{Tile, TileKind};

/// A rectangular grid of [`Tile`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    tiles: Vec<Tile>,
    width: i32,
    height: i32,
}

impl TileGrid {
    /// Create a grid filled with unexplored walls.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "tile grid must have positive size, got {width}x{height}"
        );
        Self {
            tiles: vec![Tile::default(); (width * height) as usize],
            width,
            height,
        }
    }

    /// The bounding range, always anchored at (0, 0).
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Size as a Point (width = x, height = y).
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether the grid contains the given point.
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// Get the tile at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<&Tile> {
        self.index(p).map(|i| &self.tiles[i])
    }

    /// Mutable access to the tile at a point, or `None` if out of bounds.
    pub fn at_mut(&mut self, p: Point) -> Option<&mut Tile> {
        self.index(p).map(|i| &mut self.tiles[i])
    }

    /// Kind at a point; out-of-bounds cells read as [`TileKind::Wall`].
    pub fn kind(&self, p: Point) -> TileKind {
        self.at(p).map_or(TileKind::Wall, |t| t.kind)
    }

    /// Replace the tile at `p` with a fresh tile of `kind`. Out-of-bounds
    /// points are ignored.
    pub fn set_kind(&mut self, p: Point, kind: TileKind) {
        if let Some(t) = self.at_mut(p) {
            *t = Tile::new(kind);
        }
    }

    pub fn is_walkable(&self, p: Point) -> bool {
        self.at(p).is_some_and(Tile::is_walkable)
    }

    pub fn is_transparent(&self, p: Point) -> bool {
        self.at(p).is_some_and(Tile::is_transparent)
    }

    pub fn is_explored(&self, p: Point) -> bool {
        self.at(p).is_some_and(|t| t.explored)
    }

    pub fn is_visible(&self, p: Point) -> bool {
        self.at(p).is_some_and(|t| t.visible)
    }

    /// Reset every tile to a fresh tile of `kind`.
    pub fn fill(&mut self, kind: TileKind) {
        self.tiles.fill(Tile::new(kind));
    }

    /// Count tiles satisfying a predicate.
    pub fn count_fn(&self, mut f: impl FnMut(Point, &Tile) -> bool) -> usize {
        self.iter().filter(|(p, t)| f(*p, t)).count()
    }

    /// Iterate over `(Point, &Tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Tile)> + '_ {
        self.bounds().iter().zip(self.tiles.iter())
    }

    /// Iterate mutably over `(Point, &mut Tile)` pairs in row-major order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Point, &mut Tile)> + '_ {
        self.bounds().iter().zip(self.tiles.iter_mut())
    }

    /// Snapshot of walkable cells with `occupied` cells blocked, except
    /// `start`, which is the planning agent's own position.
    pub fn walk_mask(&self, occupied: impl IntoIterator<Item = Point>, start: Point) -> WalkMask {
        let mut mask = WalkMask::from_fn(self.bounds(), |p| self.is_walkable(p));
        mask.block_occupied(occupied, start);
        mask
    }
}
