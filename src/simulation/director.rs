//! Scripted opponent
//!
//! Each turn the director, for one faction:
//! - picks a build for every idle city (production at zero), favouring
//!   settlers while it has fewer settlers than cities
//! - founds a city with every settler standing on a cityless tile
//! - moves every other unit one random orthogonal step

use rand::Rng;

use crate::city::founding::found_city;
use crate::city::registry::{BuildTarget, CityRegistry};
use crate::core::types::FactionId;
use crate::map::grid::Grid;
use crate::simulation::turn::{cities_in_scan_order, wander, TurnEvent};
use crate::unit::kind::UnitKind;
use crate::unit::roster::UnitRoster;

/// Builds chosen at random once the settler quota is met
pub const RANDOM_BUILDS: [UnitKind; 4] = [
    UnitKind::Warrior,
    UnitKind::Scout,
    UnitKind::Archer,
    UnitKind::Horseman,
];

/// Run the director for `faction`
pub fn run_director<R: Rng + ?Sized>(
    faction: FactionId,
    grid: &mut Grid,
    units: &mut UnitRoster,
    cities: &mut CityRegistry,
    rng: &mut R,
) -> Vec<TurnEvent> {
    let mut events = choose_builds(faction, grid, units, cities, rng);

    for id in units.ids_owned_by(faction) {
        let Some(unit) = units.get(id) else {
            continue;
        };

        if unit.kind == UnitKind::Settler {
            if let Some(founding) = found_city(units, cities, grid, id) {
                if let Some(city) = cities.get(founding.city) {
                    events.push(TurnEvent::CityFounded {
                        city: city.id,
                        owner: city.owner,
                        position: city.position,
                    });
                }
                continue;
            }
        }

        events.extend(wander(units, id, grid, rng));
    }

    events
}

fn choose_builds<R: Rng + ?Sized>(
    faction: FactionId,
    grid: &Grid,
    units: &UnitRoster,
    cities: &mut CityRegistry,
    rng: &mut R,
) -> Vec<TurnEvent> {
    let owned: Vec<_> = cities_in_scan_order(grid)
        .into_iter()
        .filter(|id| cities.get(*id).is_some_and(|c| c.owner == faction))
        .collect();
    let mut settlers = units.count_of(faction, UnitKind::Settler);
    let mut events = Vec::new();

    for id in &owned {
        let Some(city) = cities.get_mut(*id) else {
            continue;
        };
        if city.production != 0 {
            continue;
        }

        let kind = if settlers < owned.len() {
            settlers += 1;
            UnitKind::Settler
        } else {
            RANDOM_BUILDS[rng.gen_range(0..RANDOM_BUILDS.len())]
        };
        let target = BuildTarget::Unit(kind);
        city.build = Some(target);
        tracing::debug!(city = ?city.id, faction = faction.name(), kind = kind.name(), "build chosen");
        events.push(TurnEvent::BuildChosen { city: *id, target });
    }

    events
}
