pub mod config;
pub mod error;
pub mod types;

pub use config::{CityConfig, GameConfig, MapConfig, WorldConfig};
pub use error::{Result, SimError};
pub use types::{CityId, Coord, Direction, FactionId, Turn, UnitId};
