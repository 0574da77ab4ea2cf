//! Pathfinding for delve dungeon floors.
//!
//! - **A\*** shortest-path search ([`PathRange::astar_path`], [`find_path`])
//! - **BFS** unweighted distance maps ([`PathRange::bfs_map`])
//! - **Flood fill** of the cells reachable from a point ([`PathRange::cc_map`])
//!
//! Searches run through [`PathRange`], which owns the node caches so that an
//! agent can replan every tick without reallocating. Movement constraints
//! come from a [`Pather`]; the usual one is a [`WalkMask`], a per-call
//! boolean snapshot of which cells may be entered.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, flood fill |
//! | [`WeightedPather`] : [`Pather`] | — |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod bfs;
mod cc;
mod distance;
mod mask;
mod pathrange;
mod traits;

pub use distance::{euclidean_sq, manhattan};
pub use mask::{WalkMask, find_path};
pub use pathrange::{PathNode, PathRange, UNREACHABLE};
pub use traits::{AstarPather, Pather, WeightedPather};
