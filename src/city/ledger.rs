//! Resource ledger - per-faction accumulated resources and gold

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::FactionId;
use crate::map::tile::Resource;

/// Anything a faction can accumulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Commodity {
    Wheat,
    Iron,
    Gold,
}

impl Commodity {
    pub const ALL: [Commodity; 3] = [Commodity::Wheat, Commodity::Iron, Commodity::Gold];

    pub fn name(&self) -> &'static str {
        match self {
            Commodity::Wheat => "wheat",
            Commodity::Iron => "iron",
            Commodity::Gold => "gold",
        }
    }
}

impl From<Resource> for Commodity {
    fn from(resource: Resource) -> Self {
        match resource {
            Resource::Wheat => Commodity::Wheat,
            Resource::Iron => Commodity::Iron,
        }
    }
}

/// One faction's stores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Holdings {
    amounts: AHashMap<Commodity, u32>,
}

impl Holdings {
    pub fn get(&self, commodity: Commodity) -> u32 {
        self.amounts.get(&commodity).copied().unwrap_or(0)
    }

    pub fn add(&mut self, commodity: Commodity, amount: u32) {
        *self.amounts.entry(commodity).or_insert(0) += amount;
    }

    /// Remove exactly `amount`, or nothing if there is not enough
    pub fn remove(&mut self, commodity: Commodity, amount: u32) -> bool {
        match self.amounts.get_mut(&commodity) {
            Some(current) if *current >= amount => {
                *current -= amount;
                true
            }
            _ => amount == 0,
        }
    }
}

/// Faction -> holdings
///
/// A faction without an entry is "unregistered"; trades involving it fail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceLedger {
    entries: AHashMap<FactionId, Holdings>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty entry for a faction; existing entries are kept
    pub fn register(&mut self, faction: FactionId) {
        self.entries.entry(faction).or_default();
    }

    pub fn is_registered(&self, faction: FactionId) -> bool {
        self.entries.contains_key(&faction)
    }

    pub fn holdings(&self, faction: FactionId) -> Option<&Holdings> {
        self.entries.get(&faction)
    }

    /// Amount held; zero for unregistered factions
    pub fn get(&self, faction: FactionId, commodity: Commodity) -> u32 {
        self.entries
            .get(&faction)
            .map(|h| h.get(commodity))
            .unwrap_or(0)
    }

    /// Credit a faction, registering it if needed
    pub fn add(&mut self, faction: FactionId, commodity: Commodity, amount: u32) {
        self.entries.entry(faction).or_default().add(commodity, amount);
    }

    /// Debit a faction; all or nothing
    pub fn remove(&mut self, faction: FactionId, commodity: Commodity, amount: u32) -> bool {
        self.entries
            .get_mut(&faction)
            .is_some_and(|h| h.remove(commodity, amount))
    }

    /// Registered factions in id order
    pub fn factions(&self) -> Vec<FactionId> {
        let mut factions: Vec<FactionId> = self.entries.keys().copied().collect();
        factions.sort();
        factions
    }
}
