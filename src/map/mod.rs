//! Map layer - the shared tile grid and its one-shot generator

pub mod generation;
pub mod grid;
pub mod tile;
pub mod visibility;

pub use generation::generate_map;
pub use grid::Grid;
pub use tile::{Resource, Terrain, Tile};
pub use visibility::{recompute_visibility, Observer};
