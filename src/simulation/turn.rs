//! Turn resolution
//!
//! Fixed order: every unit's moves are reset, barbarians take one random
//! step each, then every city is processed in row-major order of its tile.
//! Cities founded earlier in the same turn wait for the next pass.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::city::ledger::ResourceLedger;
use crate::city::production::{process_city, ProductionEvent, StallReason};
use crate::city::registry::{BuildTarget, BuildingKind, CityRegistry};
use crate::core::config::CityConfig;
use crate::core::types::{CityId, Coord, Direction, FactionId, Turn, UnitId};
use crate::map::grid::Grid;
use crate::unit::combat::CombatReport;
use crate::unit::kind::UnitKind;
use crate::unit::movement::{move_unit, MoveOutcome};
use crate::unit::roster::UnitRoster;

/// Notable things that happened during a turn
///
/// Plain moves and blocked moves are not logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    Combat(CombatReport),
    UnitProduced {
        city: CityId,
        unit: UnitId,
        kind: UnitKind,
    },
    BuildingCompleted {
        city: CityId,
        building: BuildingKind,
    },
    ProductionStalled {
        city: CityId,
        target: BuildTarget,
        reason: StallReason,
    },
    CityFounded {
        city: CityId,
        owner: FactionId,
        position: Coord,
    },
    BuildChosen {
        city: CityId,
        target: BuildTarget,
    },
}

/// Everything logged while advancing to `turn`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Turn number after advancing
    pub turn: Turn,
    pub events: Vec<TurnEvent>,
    /// Tiles the player saw for the first time
    pub discovered: usize,
}

impl TurnReport {
    pub fn combats(&self) -> impl Iterator<Item = &CombatReport> {
        self.events.iter().filter_map(|e| match e {
            TurnEvent::Combat(report) => Some(report),
            _ => None,
        })
    }
}

/// Uniformly random orthogonal direction
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
}

/// Try one random step; only combat is worth reporting
pub(crate) fn wander<R: Rng + ?Sized>(
    units: &mut UnitRoster,
    id: UnitId,
    grid: &Grid,
    rng: &mut R,
) -> Option<TurnEvent> {
    let (dx, dy) = random_direction(rng).delta();
    match move_unit(units, id, dx, dy, grid) {
        MoveOutcome::Attacked(report) => Some(TurnEvent::Combat(report)),
        _ => None,
    }
}

/// Cities in row-major order of the tiles holding them
pub fn cities_in_scan_order(grid: &Grid) -> Vec<CityId> {
    grid.iter().filter_map(|(_, tile)| tile.city).collect()
}

/// Run the resolver for one turn
///
/// Cities listed in `founded` were created this turn and are not processed.
pub fn resolve_turn<R: Rng + ?Sized>(
    grid: &mut Grid,
    units: &mut UnitRoster,
    cities: &mut CityRegistry,
    ledger: &mut ResourceLedger,
    config: &CityConfig,
    founded: &[CityId],
    rng: &mut R,
) -> Vec<TurnEvent> {
    let mut events = Vec::new();

    units.reset_moves();

    for id in units.ids_owned_by(FactionId::BARBARIANS) {
        // Killed earlier in this pass
        if !units.contains(id) {
            continue;
        }
        events.extend(wander(units, id, grid, rng));
    }

    for city_id in cities_in_scan_order(grid) {
        if founded.contains(&city_id) {
            continue;
        }
        let Some(city) = cities.get_mut(city_id) else {
            continue;
        };
        let report = process_city(city, grid, units, ledger, config);
        if let Some(event) = report.production {
            events.push(production_event(city_id, event));
        }
    }

    events
}

fn production_event(city: CityId, event: ProductionEvent) -> TurnEvent {
    match event {
        ProductionEvent::UnitBuilt { unit, kind } => TurnEvent::UnitProduced { city, unit, kind },
        ProductionEvent::BuildingCompleted(building) => TurnEvent::BuildingCompleted { city, building },
        ProductionEvent::Stalled { target, reason } => TurnEvent::ProductionStalled {
            city,
            target,
            reason,
        },
    }
}
