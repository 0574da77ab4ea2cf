//! Headless dungeon driver: floors, chasing agents and ASCII rendering.

pub mod agent;
pub mod floor;
pub mod render;

pub use agent::Agent;
pub use floor::Floor;
pub use render::render_ascii;
