//! Settler conversion into a new city

use serde::{Deserialize, Serialize};

use crate::city::registry::CityRegistry;
use crate::core::types::{CityId, UnitId};
use crate::map::grid::Grid;
use crate::unit::kind::UnitKind;
use crate::unit::roster::UnitRoster;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Founding {
    pub city: CityId,
    /// Warrior spawned to hold the new city
    pub defender: UnitId,
}

/// Turn a settler into a city on its tile
///
/// Returns None, changing nothing, unless `settler` is a living settler on
/// an in-bounds tile without a city.
pub fn found_city(
    units: &mut UnitRoster,
    cities: &mut CityRegistry,
    grid: &mut Grid,
    settler: UnitId,
) -> Option<Founding> {
    let unit = units.get(settler)?;
    if unit.kind != UnitKind::Settler {
        return None;
    }
    let (position, owner) = (unit.position, unit.owner);

    let tile = grid.get_mut(position)?;
    if tile.city.is_some() {
        return None;
    }
    debug_assert!(cities.at(position).is_none(), "city registered on a cityless tile");

    let city = cities.create(owner, position);
    tile.city = Some(city);
    units.remove(settler);
    let defender = units.spawn(UnitKind::Warrior, position, owner);

    tracing::info!(city = ?city, owner = owner.name(), ?position, "city founded");
    Some(Founding { city, defender })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Coord, FactionId};
    use crate::map::tile::Terrain;

    #[test]
    fn test_settler_becomes_city_and_warrior() {
        let mut grid = Grid::filled(3, 3, Terrain::Grass);
        let mut units = UnitRoster::new();
        let mut cities = CityRegistry::new();
        let settler = units.spawn(UnitKind::Settler, Coord::new(1, 1), FactionId::CIVILIZATION);

        let founding = found_city(&mut units, &mut cities, &mut grid, settler).unwrap();

        assert!(!units.contains(settler));
        assert_eq!(units.len(), 1);
        let defender = units.get(founding.defender).unwrap();
        assert_eq!(defender.kind, UnitKind::Warrior);
        assert_eq!(defender.position, Coord::new(1, 1));
        assert_eq!(defender.owner, FactionId::CIVILIZATION);
        assert_eq!(grid.get(Coord::new(1, 1)).unwrap().city, Some(founding.city));
        assert_eq!(cities.get(founding.city).unwrap().owner, FactionId::CIVILIZATION);
    }

    #[test]
    fn test_only_settlers_found() {
        let mut grid = Grid::filled(2, 2, Terrain::Grass);
        let mut units = UnitRoster::new();
        let mut cities = CityRegistry::new();
        let warrior = units.spawn(UnitKind::Warrior, Coord::new(0, 0), FactionId::PLAYER);

        assert!(found_city(&mut units, &mut cities, &mut grid, warrior).is_none());
        assert!(cities.is_empty());
        assert!(units.contains(warrior));
    }

    #[test]
    fn test_one_city_per_tile() {
        let mut grid = Grid::filled(2, 2, Terrain::Grass);
        let mut units = UnitRoster::new();
        let mut cities = CityRegistry::new();
        let first = units.spawn(UnitKind::Settler, Coord::new(0, 0), FactionId::PLAYER);
        found_city(&mut units, &mut cities, &mut grid, first).unwrap();

        // Walk the founding warrior away and bring another settler in
        units.iter_mut().for_each(|u| u.position = Coord::new(1, 1));
        let second = units.spawn(UnitKind::Settler, Coord::new(0, 0), FactionId::PLAYER);

        assert!(found_city(&mut units, &mut cities, &mut grid, second).is_none());
        assert_eq!(cities.len(), 1);
        assert!(units.contains(second));
    }

    #[test]
    fn test_unknown_settler() {
        let mut grid = Grid::filled(2, 2, Terrain::Grass);
        let mut units = UnitRoster::new();
        let mut cities = CityRegistry::new();
        assert!(found_city(&mut units, &mut cities, &mut grid, UnitId(3)).is_none());
    }
}
