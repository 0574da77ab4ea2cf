//! Dungeon floors for delve: tile grid, field of view, room-and-corridor
//! generation, biome table and spawn reservation.

pub mod biome;
pub mod fov;
pub mod grid;
pub mod mapgen;
pub mod room;
pub mod spawn;
pub mod tile;

pub use biome::{Biome, BiomeEntry, BiomeTable};
pub use fov::{FOV, Line, VISIBILITY_RADIUS, compute_visible, los};
pub use grid::TileGrid;
pub use mapgen::{GenError, Level, LevelConfig, LevelGen, generate};
pub use room::{Room, RoomKind};
pub use spawn::{SpawnKind, SpawnSpot, reserve_spawns};
pub use tile::{Tile, TileKind};
