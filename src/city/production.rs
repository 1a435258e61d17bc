//! City turn processing - growth, territory, income and production
//!
//! Run once per city per turn, in this order:
//! - Population grows by one up to the cap
//! - Tiles within `floor(sqrt(population))` are claimed; newly claimed
//!   resources are credited to the owner
//! - The owner earns gold equal to the population
//! - With a build target set, production accrues and completes builds

use serde::{Deserialize, Serialize};

use crate::city::ledger::{Commodity, ResourceLedger};
use crate::city::registry::{BuildTarget, BuildingKind, City};
use crate::core::config::CityConfig;
use crate::core::types::{CityId, Coord, UnitId};
use crate::map::grid::Grid;
use crate::unit::kind::UnitKind;
use crate::unit::roster::UnitRoster;

/// Production cost of a unit; None for kinds cities cannot build
pub fn unit_cost(kind: UnitKind) -> Option<u32> {
    match kind {
        UnitKind::Warrior => Some(10),
        UnitKind::Settler => Some(20),
        UnitKind::Scout => Some(15),
        UnitKind::Archer => Some(15),
        UnitKind::Horseman => Some(25),
        UnitKind::Ship => Some(30),
        UnitKind::Barbarian => None,
    }
}

pub fn building_cost(building: BuildingKind) -> u32 {
    match building {
        BuildingKind::Granary => 30,
    }
}

impl BuildTarget {
    pub fn cost(&self) -> Option<u32> {
        match self {
            BuildTarget::Unit(kind) => unit_cost(*kind),
            BuildTarget::Building(building) => Some(building_cost(*building)),
        }
    }
}

/// Why a paid-for build did not complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StallReason {
    /// A unit stands on the city tile
    TileOccupied,
    /// Ships need an orthogonally adjacent water tile
    NotCoastal,
    /// The unit kind has no cost entry
    NotBuildable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductionEvent {
    UnitBuilt { unit: UnitId, kind: UnitKind },
    BuildingCompleted(BuildingKind),
    Stalled { target: BuildTarget, reason: StallReason },
}

/// What happened to one city this turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityReport {
    pub city: CityId,
    pub population: u32,
    pub newly_claimed: Vec<Coord>,
    pub gold_income: u32,
    pub production: Option<ProductionEvent>,
}

/// Territorial claim radius for a population
pub fn claim_radius(population: u32) -> u32 {
    (population as f64).sqrt().floor() as u32
}

/// Advance one city by one turn
pub fn process_city(
    city: &mut City,
    grid: &mut Grid,
    units: &mut UnitRoster,
    ledger: &mut ResourceLedger,
    config: &CityConfig,
) -> CityReport {
    if city.population < config.population_cap {
        city.population += 1;
    }

    let newly_claimed = claim_territory(city, grid, ledger);

    let gold_income = city.population;
    ledger.add(city.owner, Commodity::Gold, gold_income);

    let production = match city.build {
        Some(target) => advance_build(city, target, grid, units, config),
        None => None,
    };

    CityReport {
        city: city.id,
        population: city.population,
        newly_claimed,
        gold_income,
        production,
    }
}

/// Claim the square around the city; credits resources on tiles that change hands
fn claim_territory(city: &City, grid: &mut Grid, ledger: &mut ResourceLedger) -> Vec<Coord> {
    let radius = claim_radius(city.population);
    let mut newly_claimed = Vec::new();

    for coord in grid.square(city.position, radius) {
        let Some(tile) = grid.get_mut(coord) else {
            continue;
        };
        if tile.claimed_by == Some(city.owner) {
            continue;
        }
        tile.claimed_by = Some(city.owner);
        if let Some(resource) = tile.resource {
            ledger.add(city.owner, Commodity::from(resource), 1);
        }
        newly_claimed.push(coord);
    }

    newly_claimed
}

fn advance_build(
    city: &mut City,
    target: BuildTarget,
    grid: &Grid,
    units: &mut UnitRoster,
    config: &CityConfig,
) -> Option<ProductionEvent> {
    city.production += config.production_per_turn;

    let stalled = |reason| Some(ProductionEvent::Stalled { target, reason });

    let Some(cost) = target.cost() else {
        return stalled(StallReason::NotBuildable);
    };
    if city.production < cost {
        return None;
    }

    match target {
        BuildTarget::Unit(kind) => {
            if units.is_occupied(city.position) {
                return stalled(StallReason::TileOccupied);
            }
            if kind.is_naval() && !grid.is_coastal(city.position) {
                return stalled(StallReason::NotCoastal);
            }
            let unit = units.spawn(kind, city.position, city.owner);
            city.production -= cost;
            tracing::info!(city = ?city.id, unit = ?unit, kind = kind.name(), "unit produced");
            Some(ProductionEvent::UnitBuilt { unit, kind })
        }
        BuildTarget::Building(building) => {
            city.add_building(building);
            city.production -= cost;
            city.build = None;
            tracing::info!(city = ?city.id, building = building.name(), "building completed");
            Some(ProductionEvent::BuildingCompleted(building))
        }
    }
}
