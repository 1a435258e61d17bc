//! Game configuration with documented constants
//!
//! Tunable numbers live here. Per-type unit and building constants are
//! deliberately not configurable; they live in fixed tables next to the
//! types they describe (`unit::kind`, `city::production`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// Top-level configuration for a game session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub map: MapConfig,
    pub city: CityConfig,
    pub world: WorldConfig,
}

/// Map generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: u32,
    pub height: u32,
    /// Seed for the world RNG; the whole game is reproducible from it
    pub seed: u64,

    // === CONTINENTAL GROWTH ===
    /// Chance that land spreads into each water neighbour of a growing tile
    ///
    /// At 0.8 continents come out mostly solid with ragged coasts.
    pub land_growth_chance: f64,

    /// One continent is seeded per this many tiles of the shorter map side
    ///
    /// A 40x30 map at divisor 20 gets a single continent; always at least one.
    pub continent_divisor: u32,

    // === TERRAIN BANDS (land tiles only, remainder is grass) ===
    pub mountain_chance: f64,
    pub forest_chance: f64,
    pub desert_chance: f64,

    // === RESOURCES (never on water or mountains) ===
    pub wheat_chance: f64,
    pub iron_chance: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 30,
            seed: 42,
            land_growth_chance: 0.8,
            continent_divisor: 20,
            mountain_chance: 0.10,
            forest_chance: 0.20,
            desert_chance: 0.10,
            wheat_chance: 0.05,
            iron_chance: 0.05,
        }
    }
}

impl MapConfig {
    /// Dimensions fit the coordinate type and every chance is a probability
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SimError::InvalidConfig(format!(
                "map must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }

        if self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return Err(SimError::InvalidConfig("map dimensions overflow i32".into()));
        }

        if self.continent_divisor == 0 {
            return Err(SimError::InvalidConfig("continent_divisor must be positive".into()));
        }

        let chances = [
            ("land_growth_chance", self.land_growth_chance),
            ("mountain_chance", self.mountain_chance),
            ("forest_chance", self.forest_chance),
            ("desert_chance", self.desert_chance),
            ("wheat_chance", self.wheat_chance),
            ("iron_chance", self.iron_chance),
        ];
        for (name, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be within 0..=1, got {value}"
                )));
            }
        }

        // Bands are cumulative
        if self.mountain_chance + self.forest_chance + self.desert_chance > 1.0 {
            return Err(SimError::InvalidConfig("terrain bands exceed 1.0".into()));
        }
        if self.wheat_chance + self.iron_chance > 1.0 {
            return Err(SimError::InvalidConfig("resource bands exceed 1.0".into()));
        }

        Ok(())
    }
}

/// City growth and production parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    /// Population stops growing here
    pub population_cap: u32,
    /// Production added to the pool each turn while a build target is set
    pub production_per_turn: u32,
    /// Radius of the square a city reveals each turn
    pub sight_radius: u32,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            population_cap: 10,
            production_per_turn: 5,
            sight_radius: 2,
        }
    }
}

/// World bootstrap parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Barbarians scattered over free land at world creation
    pub barbarian_count: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { barbarian_count: 3 }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys fall back to defaults
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        self.map.validate()?;

        if self.city.population_cap == 0 {
            return Err(SimError::InvalidConfig("population_cap must be at least 1".into()));
        }

        Ok(())
    }
}
