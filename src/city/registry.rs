//! Cities and the city collection

use serde::{Deserialize, Serialize};

use crate::core::types::{CityId, Coord, FactionId};
use crate::unit::kind::UnitKind;

/// One-shot city improvements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    Granary,
}

impl BuildingKind {
    pub fn name(&self) -> &'static str {
        match self {
            BuildingKind::Granary => "granary",
        }
    }
}

/// What a city is currently producing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildTarget {
    /// Repeats every cycle until changed
    Unit(UnitKind),
    /// Cleared once completed
    Building(BuildingKind),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub owner: FactionId,
    pub position: Coord,
    /// Output accumulated toward the current build
    pub production: u32,
    pub build: Option<BuildTarget>,
    pub buildings: Vec<BuildingKind>,
    pub population: u32,
}

/// A fresh city: population 1, no production, building warriors
pub fn create_city(id: CityId, owner: FactionId, position: Coord) -> City {
    City {
        id,
        owner,
        position,
        production: 0,
        build: Some(BuildTarget::Unit(UnitKind::Warrior)),
        buildings: Vec::new(),
        population: 1,
    }
}

impl City {
    pub fn has_building(&self, building: BuildingKind) -> bool {
        self.buildings.contains(&building)
    }

    /// Record a completed building; returns false if it already existed
    pub fn add_building(&mut self, building: BuildingKind) -> bool {
        if self.has_building(building) {
            return false;
        }
        self.buildings.push(building);
        true
    }
}

/// Owns every city in the game
///
/// The tile grid refers to cities by id; the registry never removes one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CityRegistry {
    cities: Vec<City>,
    next_city_id: u32,
}

impl CityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a city and return its id
    pub fn create(&mut self, owner: FactionId, position: Coord) -> CityId {
        let id = CityId(self.next_city_id);
        self.next_city_id += 1;
        self.cities.push(create_city(id, owner, position));
        id
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn get(&self, id: CityId) -> Option<&City> {
        self.cities.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CityId) -> Option<&mut City> {
        self.cities.iter_mut().find(|c| c.id == id)
    }

    pub fn at(&self, position: Coord) -> Option<&City> {
        self.cities.iter().find(|c| c.position == position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &City> {
        self.cities.iter()
    }

    pub fn count_owned_by(&self, owner: FactionId) -> usize {
        self.cities.iter().filter(|c| c.owner == owner).count()
    }

    pub fn ids_owned_by(&self, owner: FactionId) -> Vec<CityId> {
        self.cities
            .iter()
            .filter(|c| c.owner == owner)
            .map(|c| c.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_city_defaults() {
        let city = create_city(CityId(0), FactionId::PLAYER, Coord::new(1, 1));
        assert_eq!(city.population, 1);
        assert_eq!(city.production, 0);
        assert_eq!(city.build, Some(BuildTarget::Unit(UnitKind::Warrior)));
        assert!(city.buildings.is_empty());
    }

    #[test]
    fn test_add_building_is_idempotent() {
        let mut city = create_city(CityId(0), FactionId::PLAYER, Coord::new(0, 0));
        assert!(city.add_building(BuildingKind::Granary));
        assert!(!city.add_building(BuildingKind::Granary));
        assert_eq!(city.buildings.len(), 1);
    }

    #[test]
    fn test_registry_ids_and_lookup() {
        let mut cities = CityRegistry::new();
        let a = cities.create(FactionId::PLAYER, Coord::new(0, 0));
        let b = cities.create(FactionId::CIVILIZATION, Coord::new(3, 2));
        assert_ne!(a, b);
        assert_eq!(cities.len(), 2);
        assert_eq!(cities.at(Coord::new(3, 2)).map(|c| c.id), Some(b));
        assert_eq!(cities.count_owned_by(FactionId::PLAYER), 1);
        assert_eq!(cities.ids_owned_by(FactionId::CIVILIZATION), vec![b]);
        assert!(cities.get(CityId(7)).is_none());
    }
}
