//! Serializable end-of-turn summary

use serde::{Deserialize, Serialize};

use crate::city::ledger::Commodity;
use crate::core::error::Result;
use crate::core::types::{FactionId, Turn};
use crate::diplomacy::Relation;
use crate::simulation::world::World;
use crate::unit::kind::UnitKind;

/// Per-faction totals
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FactionSummary {
    pub faction: FactionId,
    pub name: String,
    pub units: usize,
    pub settlers: usize,
    pub cities: usize,
    pub population: u32,
    pub gold: u32,
    pub wheat: u32,
    pub iron: u32,
    pub claimed_tiles: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelationSummary {
    pub a: FactionId,
    pub b: FactionId,
    pub relation: Relation,
}

/// Snapshot of a completed turn for the CLI and other readers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSummary {
    pub turn: Turn,
    pub width: u32,
    pub height: u32,
    pub seen_tiles: usize,
    pub factions: Vec<FactionSummary>,
    pub relations: Vec<RelationSummary>,
}

impl WorldSummary {
    pub fn from_world(world: &World) -> Self {
        let factions = [FactionId::PLAYER, FactionId::CIVILIZATION, FactionId::BARBARIANS]
            .into_iter()
            .map(|faction| FactionSummary {
                faction,
                name: faction.name().to_string(),
                units: world.units.iter().filter(|u| u.owner == faction).count(),
                settlers: world.units.count_of(faction, UnitKind::Settler),
                cities: world.cities.count_owned_by(faction),
                population: world
                    .cities
                    .iter()
                    .filter(|c| c.owner == faction)
                    .map(|c| c.population)
                    .sum(),
                gold: world.ledger.get(faction, Commodity::Gold),
                wheat: world.ledger.get(faction, Commodity::Wheat),
                iron: world.ledger.get(faction, Commodity::Iron),
                claimed_tiles: world
                    .grid
                    .tiles()
                    .iter()
                    .filter(|t| t.claimed_by == Some(faction))
                    .count(),
            })
            .collect();

        let relations = world
            .diplomacy
            .entries()
            .into_iter()
            .map(|(a, b, relation)| RelationSummary { a, b, relation })
            .collect();

        Self {
            turn: world.turn,
            width: world.grid.width(),
            height: world.grid.height(),
            seen_tiles: world.grid.tiles().iter().filter(|t| t.seen).count(),
            factions,
            relations,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable multi-line report
    pub fn to_text(&self) -> String {
        let mut out = format!(
            "Turn {} on a {}x{} map, {} tiles explored\n",
            self.turn, self.width, self.height, self.seen_tiles
        );
        for f in &self.factions {
            out.push_str(&format!(
                "  {:<13} units {:>3} (settlers {}), cities {:>2}, pop {:>3}, gold {:>4}, wheat {}, iron {}, territory {}\n",
                f.name, f.units, f.settlers, f.cities, f.population, f.gold, f.wheat, f.iron, f.claimed_tiles
            ));
        }
        for r in &self.relations {
            out.push_str(&format!("  {} / {}: {}\n", r.a.name(), r.b.name(), r.relation.name()));
        }
        out
    }
}
