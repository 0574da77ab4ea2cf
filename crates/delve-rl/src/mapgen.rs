//! Room-and-corridor level generation.
//!
//! [`LevelGen`] places non-overlapping rectangular rooms, links each new
//! room to an earlier one with an L-shaped corridor, then runs a repair
//! pass that joins the closest connected/unconnected room pairs until every
//! room is reachable. The first room is the entrance and holds the start
//! position; the last room is the exit and holds the down stairs.
//!
//! Generation is deterministic for a given RNG state.

use std::collections::HashSet;
use std::fmt;

use delve_core::Point;
use delve_paths::{PathRange, euclidean_sq};
use log::{debug, info, warn};
use rand::{Rng, RngExt};

use crate::grid::TileGrid;
use crate::room::{Room, RoomKind};
use crate::tile::TileKind;

/// Parameters for one floor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelConfig {
    pub width: i32,
    pub height: i32,
    /// Placement stops once this many rooms exist.
    pub max_rooms: usize,
    pub room_min_size: i32,
    pub room_max_size: i32,
    /// Fewer rooms than this and the whole floor is thrown away.
    pub min_rooms: usize,
    /// Whole-floor attempts before giving up.
    pub max_retries: usize,
    /// Chance that a corridor pinch point becomes a door.
    pub door_chance: f64,
    /// Chance that a floor tile gets a non-zero cosmetic variant.
    pub variant_chance: f64,
    /// Extra loop corridors as a fraction of the room count (at least one),
    /// in [0, 1].
    pub extra_connection_ratio: f64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 40,
            max_rooms: 15,
            room_min_size: 6,
            room_max_size: 12,
            min_rooms: 5,
            max_retries: 50,
            door_chance: 0.2,
            variant_chance: 0.1,
            extra_connection_ratio: 0.1,
        }
    }
}

impl LevelConfig {
    /// Config with the given grid and room sizes and default tuning.
    pub fn new(
        width: i32,
        height: i32,
        max_rooms: usize,
        room_min_size: i32,
        room_max_size: i32,
    ) -> Self {
        Self {
            width,
            height,
            max_rooms,
            room_min_size,
            room_max_size,
            ..Self::default()
        }
    }

    /// Reject parameters that can never produce a floor.
    pub fn validate(&self) -> Result<(), GenError> {
        let invalid = |msg: String| Err(GenError::InvalidConfig(msg));
        if self.width <= 0 || self.height <= 0 {
            return invalid(format!("grid size {}x{}", self.width, self.height));
        }
        if self.room_min_size < 1 || self.room_min_size > self.room_max_size {
            return invalid(format!(
                "room size range {}..={}",
                self.room_min_size, self.room_max_size
            ));
        }
        // A room needs a one-cell border on the top-left side and a
        // two-cell margin on the bottom-right side.
        if self.room_min_size > self.width - 3 || self.room_min_size > self.height - 3 {
            return invalid(format!(
                "rooms of size {} do not fit in {}x{}",
                self.room_min_size, self.width, self.height
            ));
        }
        if self.min_rooms < 2 {
            return invalid(format!("min_rooms {} (need an entrance and an exit)", self.min_rooms));
        }
        if self.max_rooms < self.min_rooms {
            return invalid(format!(
                "max_rooms {} below min_rooms {}",
                self.max_rooms, self.min_rooms
            ));
        }
        for (name, p) in [
            ("door_chance", self.door_chance),
            ("variant_chance", self.variant_chance),
            ("extra_connection_ratio", self.extra_connection_ratio),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("{name} {p} outside [0, 1]"));
            }
        }
        Ok(())
    }
}

/// Errors returned by [`LevelGen::generate`].
#[derive(Debug, Clone, PartialEq)]
pub enum GenError {
    /// The configuration can never produce a floor.
    InvalidConfig(String),
    /// Every attempt placed fewer rooms than required.
    TooFewRooms {
        /// Most rooms placed in any single attempt.
        placed: usize,
        required: usize,
        attempts: usize,
    },
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid level config: {msg}"),
            Self::TooFewRooms {
                placed,
                required,
                attempts,
            } => write!(
                f,
                "placed at most {placed} of {required} required rooms in {attempts} attempts"
            ),
        }
    }
}

impl std::error::Error for GenError {}

/// A generated floor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    pub grid: TileGrid,
    rooms: Vec<Room>,
    start: Point,
    stairs_down: Point,
}

impl Level {
    /// Rooms in creation order. There are always at least two.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn entrance(&self) -> &Room {
        &self.rooms[0]
    }

    pub fn exit(&self) -> &Room {
        &self.rooms[self.rooms.len() - 1]
    }

    /// Centre of the entrance room.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Centre of the exit room, where the down stairs are.
    pub fn stairs_down(&self) -> Point {
        self.stairs_down
    }

    /// Whether every cell of room `idx` has been explored. Unknown indices
    /// report `false`.
    pub fn room_explored(&self, idx: usize) -> bool {
        self.rooms
            .get(idx)
            .is_some_and(|r| r.range().iter().all(|p| self.grid.is_explored(p)))
    }

    /// Number of fully explored rooms.
    pub fn explored_rooms(&self) -> usize {
        (0..self.rooms.len())
            .filter(|&i| self.room_explored(i))
            .count()
    }

    /// Indices of rooms whose centre cannot be walked to from the start.
    pub fn unreachable_rooms(&self) -> Vec<usize> {
        let mask = self.grid.walk_mask(std::iter::empty(), self.start);
        let mut pr = PathRange::new(self.grid.bounds());
        let reached: HashSet<Point> = pr.cc_map(&mask, self.start).into_iter().collect();
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, r)| !reached.contains(&r.center()))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Level generator driving an RNG through a [`LevelConfig`].
pub struct LevelGen<R: Rng> {
    pub rng: R,
    pub config: LevelConfig,
}

impl<R: Rng> LevelGen<R> {
    pub fn new(config: LevelConfig, rng: R) -> Self {
        Self { rng, config }
    }

    /// Generate one floor.
    ///
    /// Attempts that place fewer than `min_rooms` rooms are discarded and
    /// retried up to `max_retries` times.
    pub fn generate(&mut self) -> Result<Level, GenError> {
        self.config.validate()?;
        let attempts = self.config.max_retries.max(1);
        let mut best = 0;

        for attempt in 1..=attempts {
            let mut grid = TileGrid::new(self.config.width, self.config.height);
            let mut rooms = Vec::with_capacity(self.config.max_rooms);
            self.place_rooms(&mut grid, &mut rooms);
            debug!("attempt {attempt}: placed {} rooms", rooms.len());

            if rooms.len() < self.config.min_rooms {
                warn!(
                    "attempt {attempt}: {} rooms is below the minimum of {}, retrying",
                    rooms.len(),
                    self.config.min_rooms
                );
                best = best.max(rooms.len());
                continue;
            }

            let level = self.finish(grid, rooms);
            info!(
                "generated {}x{} floor with {} rooms, start {}, stairs {}",
                level.grid.width(),
                level.grid.height(),
                level.rooms.len(),
                level.start,
                level.stairs_down
            );
            return Ok(level);
        }

        Err(GenError::TooFewRooms {
            placed: best,
            required: self.config.min_rooms,
            attempts,
        })
    }

    fn place_rooms(&mut self, grid: &mut TileGrid, rooms: &mut Vec<Room>) {
        let cfg = &self.config;
        let (w_max, h_max) = (cfg.width, cfg.height);
        let (smin, smax) = (cfg.room_min_size, cfg.room_max_size);
        let max_rooms = cfg.max_rooms;

        for _ in 0..max_rooms * 5 {
            if rooms.len() >= max_rooms {
                break;
            }
            let w = self.rng.random_range(smin..=smax);
            let h = self.rng.random_range(smin..=smax);
            let (x_hi, y_hi) = (w_max - w - 2, h_max - h - 2);
            if x_hi < 1 || y_hi < 1 {
                continue;
            }
            let x = self.rng.random_range(1..=x_hi);
            let y = self.rng.random_range(1..=y_hi);
            let room = Room::new(x, y, w, h);
            if rooms.iter().any(|r| room.overlaps(r, 1)) {
                continue;
            }

            for p in room.range() {
                grid.set_kind(p, TileKind::Floor);
            }
            rooms.push(room);
            let n = rooms.len();
            if n > 1 {
                let prev = self.rng.random_range(0..n - 1);
                self.connect(grid, rooms, n - 1, prev);
            }
        }
    }

    fn finish(&mut self, mut grid: TileGrid, mut rooms: Vec<Room>) -> Level {
        self.ensure_connectivity(&mut grid, &mut rooms);

        rooms[0].kind = RoomKind::Entrance;
        let start = rooms[0].center();
        let last = rooms.len() - 1;
        rooms[last].kind = RoomKind::Exit;
        let stairs_down = rooms[last].center();
        grid.set_kind(stairs_down, TileKind::StairsDown);

        self.add_doors(&mut grid);
        self.add_variants(&mut grid);

        Level {
            grid,
            rooms,
            start,
            stairs_down,
        }
    }

    /// Carve an L-shaped corridor between two room centres and mark both
    /// rooms connected.
    fn connect(&mut self, grid: &mut TileGrid, rooms: &mut [Room], a: usize, b: usize) {
        let Point { x: x1, y: y1 } = rooms[a].center();
        let Point { x: x2, y: y2 } = rooms[b].center();
        if self.rng.random_bool(0.5) {
            carve_h(grid, x1, x2, y1);
            carve_v(grid, y1, y2, x2);
        } else {
            carve_v(grid, y1, y2, x1);
            carve_h(grid, x1, x2, y2);
        }
        rooms[a].connected = true;
        rooms[b].connected = true;
    }

    fn ensure_connectivity(&mut self, grid: &mut TileGrid, rooms: &mut [Room]) {
        for r in rooms.iter_mut() {
            r.connected = false;
        }
        rooms[0].connected = true;

        loop {
            let mut closest: Option<(usize, usize)> = None;
            let mut min_dist = i64::MAX;
            for (ci, c) in rooms.iter().enumerate().filter(|(_, r)| r.connected) {
                for (ui, u) in rooms.iter().enumerate().filter(|(_, r)| !r.connected) {
                    let d = euclidean_sq(c.center(), u.center());
                    if d < min_dist {
                        min_dist = d;
                        closest = Some((ci, ui));
                    }
                }
            }
            let Some((ci, ui)) = closest else {
                break;
            };
            debug!("linking room {ui} to room {ci}");
            self.connect(grid, rooms, ci, ui);
        }

        let n = rooms.len();
        let extra = ((n as f64 * self.config.extra_connection_ratio) as usize).max(1);
        for _ in 0..extra {
            let a = self.rng.random_range(0..n);
            let b = self.rng.random_range(0..n);
            if a != b {
                self.connect(grid, rooms, a, b);
            }
        }
    }

    /// Turn some corridor pinch points into doors: floor cells with exactly
    /// two orthogonal walls and at least two diagonal walls.
    fn add_doors(&mut self, grid: &mut TileGrid) {
        for y in 1..grid.height() - 1 {
            for x in 1..grid.width() - 1 {
                let p = Point::new(x, y);
                if grid.kind(p) != TileKind::Floor {
                    continue;
                }
                let walls = count_walls(grid, p.neighbors_4());
                if walls != 2 || !self.rng.random_bool(self.config.door_chance) {
                    continue;
                }
                if count_walls(grid, p.diagonals()) >= 2 {
                    grid.set_kind(p, TileKind::Door);
                }
            }
        }
    }

    fn add_variants(&mut self, grid: &mut TileGrid) {
        let chance = self.config.variant_chance;
        for (_, t) in grid.iter_mut() {
            if t.kind == TileKind::Floor && self.rng.random_bool(chance) {
                t.variant = self.rng.random_range(1..=2);
            }
        }
    }
}

fn count_walls(grid: &TileGrid, pts: [Point; 4]) -> usize {
    pts.into_iter()
        .filter(|&q| grid.kind(q) == TileKind::Wall)
        .count()
}

fn carve_h(grid: &mut TileGrid, x1: i32, x2: i32, y: i32) {
    for x in x1.min(x2)..=x1.max(x2) {
        grid.set_kind(Point::new(x, y), TileKind::Floor);
    }
}

fn carve_v(grid: &mut TileGrid, y1: i32, y2: i32, x: i32) {
    for y in y1.min(y2)..=y1.max(y2) {
        grid.set_kind(Point::new(x, y), TileKind::Floor);
    }
}

/// Generate a floor with default tuning from a seeded RNG.
pub fn generate<R: Rng>(
    width: i32,
    height: i32,
    max_rooms: usize,
    room_min_size: i32,
    room_max_size: i32,
    rng: R,
) -> Result<Level, GenError> {
    let config = LevelConfig::new(width, height, max_rooms, room_min_size, room_max_size);
    LevelGen::new(config, rng).generate()
}
