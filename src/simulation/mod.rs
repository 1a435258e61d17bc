//! Simulation layer - the world aggregate, turn resolution and the scripted opponent

pub mod director;
pub mod summary;
pub mod turn;
pub mod world;

pub use director::{run_director, RANDOM_BUILDS};
pub use summary::{FactionSummary, RelationSummary, WorldSummary};
pub use turn::{resolve_turn, TurnEvent, TurnReport};
pub use world::{World, FACTIONS};
