//! Units and the unit collection
//!
//! The roster is the only owner of units. Units are addressed by id; a
//! unit that dies or founds a city is removed exactly once.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::{Coord, FactionId, UnitId};
use crate::unit::kind::UnitKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub position: Coord,
    pub owner: FactionId,
    /// Remaining movement budget this turn, never above `speed`
    pub moves: u32,
    pub speed: u32,
    /// Removed from the roster as soon as this drops to zero or below
    pub health: i32,
    pub max_health: i32,
    pub range: u32,
    /// Pending click-to-path steps, next step first
    pub path: VecDeque<Coord>,
}

/// Build a unit with a full move budget, full health and no orders
pub fn create_unit(id: UnitId, kind: UnitKind, position: Coord, owner: FactionId) -> Unit {
    let stats = kind.stats();
    Unit {
        id,
        kind,
        position,
        owner,
        moves: stats.speed,
        speed: stats.speed,
        health: stats.max_health as i32,
        max_health: stats.max_health as i32,
        range: stats.range,
        path: VecDeque::new(),
    }
}

impl Unit {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn sight(&self) -> u32 {
        self.kind.stats().sight
    }

    pub fn reset_moves(&mut self) {
        self.moves = self.speed;
    }

    /// Subtract damage; returns true when the unit is now dead
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.health -= amount as i32;
        !self.is_alive()
    }
}

/// The unit collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitRoster {
    units: Vec<Unit>,
    next_unit_id: u32,
}

impl UnitRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a unit and add it to the roster
    pub fn spawn(&mut self, kind: UnitKind, position: Coord, owner: FactionId) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        self.units.push(create_unit(id, kind, position, owner));
        id
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.get(id).is_some()
    }

    /// Remove a unit; returns None if it was already gone
    pub fn remove(&mut self, id: UnitId) -> Option<Unit> {
        let index = self.units.iter().position(|u| u.id == id)?;
        Some(self.units.remove(index))
    }

    /// The unit standing on a tile, if any
    pub fn at(&self, position: Coord) -> Option<&Unit> {
        self.units.iter().find(|u| u.position == position)
    }

    pub fn is_occupied(&self, position: Coord) -> bool {
        self.at(position).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.iter_mut()
    }

    pub fn as_slice(&self) -> &[Unit] {
        &self.units
    }

    /// Ids of a faction's units in roster order
    pub fn ids_owned_by(&self, owner: FactionId) -> Vec<UnitId> {
        self.units
            .iter()
            .filter(|u| u.owner == owner)
            .map(|u| u.id)
            .collect()
    }

    pub fn count_of(&self, owner: FactionId, kind: UnitKind) -> usize {
        self.units
            .iter()
            .filter(|u| u.owner == owner && u.kind == kind)
            .count()
    }

    /// Restore every unit's full movement budget
    pub fn reset_moves(&mut self) {
        for unit in &mut self.units {
            unit.reset_moves();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_unit_uses_stat_table() {
        let unit = create_unit(UnitId(1), UnitKind::Archer, Coord::new(2, 3), FactionId::PLAYER);
        assert_eq!(unit.moves, unit.speed);
        assert_eq!(unit.speed, 2);
        assert_eq!(unit.health, 8);
        assert_eq!(unit.max_health, 8);
        assert_eq!(unit.range, 2);
        assert!(unit.path.is_empty());
    }

    #[test]
    fn test_spawn_assigns_unique_ids() {
        let mut roster = UnitRoster::new();
        let a = roster.spawn(UnitKind::Warrior, Coord::new(0, 0), FactionId::PLAYER);
        let b = roster.spawn(UnitKind::Warrior, Coord::new(1, 0), FactionId::PLAYER);
        assert_ne!(a, b);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut roster = UnitRoster::new();
        let a = roster.spawn(UnitKind::Scout, Coord::new(0, 0), FactionId::PLAYER);
        roster.remove(a);
        let b = roster.spawn(UnitKind::Scout, Coord::new(0, 0), FactionId::PLAYER);
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_exactly_once() {
        let mut roster = UnitRoster::new();
        let id = roster.spawn(UnitKind::Warrior, Coord::new(0, 0), FactionId::PLAYER);
        assert!(roster.remove(id).is_some());
        assert!(roster.remove(id).is_none());
        assert!(roster.is_empty());
    }

    #[test]
    fn test_occupancy_and_counts() {
        let mut roster = UnitRoster::new();
        roster.spawn(UnitKind::Settler, Coord::new(1, 1), FactionId::CIVILIZATION);
        roster.spawn(UnitKind::Warrior, Coord::new(2, 1), FactionId::CIVILIZATION);
        roster.spawn(UnitKind::Barbarian, Coord::new(4, 4), FactionId::BARBARIANS);

        assert!(roster.is_occupied(Coord::new(1, 1)));
        assert!(!roster.is_occupied(Coord::new(0, 0)));
        assert_eq!(roster.count_of(FactionId::CIVILIZATION, UnitKind::Settler), 1);
        assert_eq!(roster.ids_owned_by(FactionId::CIVILIZATION).len(), 2);
    }

    #[test]
    fn test_reset_moves() {
        let mut roster = UnitRoster::new();
        let id = roster.spawn(UnitKind::Horseman, Coord::new(0, 0), FactionId::PLAYER);
        roster.get_mut(id).unwrap().moves = 0;
        roster.reset_moves();
        assert_eq!(roster.get(id).unwrap().moves, 3);
    }
}
