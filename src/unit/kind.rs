//! Unit kinds and their fixed stat table
//!
//! The table is the single source of truth for combat and movement math.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Settler,
    Warrior,
    Scout,
    Barbarian,
    Archer,
    Horseman,
    Ship,
}

/// Per-kind constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitStats {
    /// Damage dealt to the opponent in an exchange
    pub strength: u32,
    /// Full movement allotment per turn
    pub speed: u32,
    pub max_health: u32,
    /// Attack reach in tiles (Manhattan)
    pub range: u32,
    /// Radius of the square this unit reveals
    pub sight: u32,
}

const fn stats(strength: u32, speed: u32, max_health: u32, range: u32, sight: u32) -> UnitStats {
    UnitStats {
        strength,
        speed,
        max_health,
        range,
        sight,
    }
}

/// Indexed by `UnitKind as usize`
const UNIT_STATS: [UnitStats; 7] = [
    stats(0, 1, 5, 1, 1),  // Settler
    stats(2, 2, 10, 1, 1), // Warrior
    stats(1, 3, 6, 1, 2),  // Scout
    stats(1, 1, 2, 1, 1),  // Barbarian
    stats(2, 2, 8, 2, 1),  // Archer
    stats(3, 3, 12, 1, 1), // Horseman
    stats(2, 3, 10, 1, 2), // Ship
];

impl UnitKind {
    pub const ALL: [UnitKind; 7] = [
        UnitKind::Settler,
        UnitKind::Warrior,
        UnitKind::Scout,
        UnitKind::Barbarian,
        UnitKind::Archer,
        UnitKind::Horseman,
        UnitKind::Ship,
    ];

    pub fn stats(&self) -> &'static UnitStats {
        &UNIT_STATS[*self as usize]
    }

    pub fn strength(&self) -> u32 {
        self.stats().strength
    }

    pub fn speed(&self) -> u32 {
        self.stats().speed
    }

    /// Ships move on water only; everything else on land only
    pub fn is_naval(&self) -> bool {
        matches!(self, Self::Ship)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Settler => "settler",
            Self::Warrior => "warrior",
            Self::Scout => "scout",
            Self::Barbarian => "barbarian",
            Self::Archer => "archer",
            Self::Horseman => "horseman",
            Self::Ship => "ship",
        }
    }
}
