//! Tiles - terrain, resources and per-tile ownership flags

use serde::{Deserialize, Serialize};

use crate::core::types::{CityId, FactionId};

/// Terrain types affecting movement and resource placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Water,
    Grass,
    Mountain,
    Desert,
    Forest,
}

impl Terrain {
    pub const ALL: [Terrain; 5] = [
        Terrain::Water,
        Terrain::Grass,
        Terrain::Mountain,
        Terrain::Desert,
        Terrain::Forest,
    ];

    /// Movement cost for a unit class; `None` marks impassable terrain
    ///
    /// Ships sail water only. Land units never enter water or mountains.
    pub fn movement_cost(&self, naval: bool) -> Option<u32> {
        if naval {
            return match self {
                Self::Water => Some(1),
                _ => None,
            };
        }
        match self {
            Self::Grass | Self::Desert => Some(1),
            Self::Forest => Some(2),
            Self::Water | Self::Mountain => None,
        }
    }

    pub fn is_water(&self) -> bool {
        matches!(self, Self::Water)
    }

    pub fn is_land(&self) -> bool {
        !self.is_water()
    }

    /// Whether a resource may be placed on this terrain
    pub fn can_hold_resource(&self) -> bool {
        !matches!(self, Self::Water | Self::Mountain)
    }
}

impl Default for Terrain {
    fn default() -> Self {
        Self::Water
    }
}

/// Resources a tile can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Wheat,
    Iron,
}

/// A single tile of the world grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: Terrain,
    pub resource: Option<Resource>,
    /// City standing on this tile; at most one
    pub city: Option<CityId>,
    /// Ever observed by the player; never reverts
    pub seen: bool,
    /// Observed this turn; recomputed every turn
    pub visible: bool,
    /// Territorial owner, independent of any city standing here
    pub claimed_by: Option<FactionId>,
}

impl Tile {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            ..Self::default()
        }
    }

    pub fn with_resource(mut self, resource: Resource) -> Self {
        debug_assert!(self.terrain.can_hold_resource());
        self.resource = Some(resource);
        self
    }
}
