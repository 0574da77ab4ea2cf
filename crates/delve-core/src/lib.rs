//! **delve-core**: geometry shared by every delve crate.
//!
//! A dungeon floor is a rectangle of cells; [`Point`] names one cell and
//! [`Range`] names a rectangle of them (a whole grid, a room, a scan
//! window).

pub mod geom;

pub use geom::{Point, Range, RangeIter};
