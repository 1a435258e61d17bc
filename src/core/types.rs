//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Turn counter (simulation time unit)
pub type Turn = u32;

/// Faction identifier partitioning units and cities into players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FactionId(pub u32);

impl FactionId {
    /// The human-controlled faction
    pub const PLAYER: FactionId = FactionId(0);
    /// The scripted rival civilization
    pub const CIVILIZATION: FactionId = FactionId(1);
    /// Roaming barbarians; never found cities, move at random
    pub const BARBARIANS: FactionId = FactionId(2);

    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Self::PLAYER => "player",
            Self::CIVILIZATION => "civilization",
            Self::BARBARIANS => "barbarians",
            _ => "unknown",
        }
    }
}

/// Unique identifier for units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// Unique identifier for cities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CityId(pub u32);

/// Integer tile coordinate (column x, row y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance, used for attack reach
    pub fn manhattan(&self, other: &Coord) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }

    /// Chebyshev distance, used for territory and sight squares
    pub fn chebyshev(&self, other: &Coord) -> u32 {
        (self.x - other.x)
            .unsigned_abs()
            .max((self.y - other.y).unsigned_abs())
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Coord {
        Coord::new(self.x + dx, self.y + dy)
    }

    pub fn step(&self, direction: Direction) -> Coord {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// The four orthogonal neighbours, unclipped
    pub fn neighbors(&self) -> [Coord; 4] {
        Direction::ALL.map(|d| self.step(d))
    }

    /// Direction from `self` to an orthogonally adjacent `other`
    pub fn direction_to(&self, other: &Coord) -> Option<Direction> {
        Direction::from_delta(other.x - self.x, other.y - self.y)
    }
}

/// Orthogonal movement direction. Diagonal moves do not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::West => (-1, 0),
            Self::East => (1, 0),
        }
    }

    /// Returns None for zero, diagonal or multi-tile deltas
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Self::North),
            (0, 1) => Some(Self::South),
            (-1, 0) => Some(Self::West),
            (1, 0) => Some(Self::East),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faction_id_equality() {
        assert_eq!(FactionId::new(0), FactionId::PLAYER);
        assert_ne!(FactionId::PLAYER, FactionId::BARBARIANS);
        assert_eq!(FactionId::CIVILIZATION.name(), "civilization");
    }

    #[test]
    fn test_coord_distances() {
        let a = Coord::new(0, 0);
        let b = Coord::new(2, 1);
        assert_eq!(a.manhattan(&b), 3);
        assert_eq!(a.chebyshev(&b), 2);
    }

    #[test]
    fn test_direction_from_delta_rejects_diagonals() {
        assert_eq!(Direction::from_delta(1, 0), Some(Direction::East));
        assert_eq!(Direction::from_delta(0, -1), Some(Direction::North));
        assert_eq!(Direction::from_delta(1, 1), None);
        assert_eq!(Direction::from_delta(2, 0), None);
        assert_eq!(Direction::from_delta(0, 0), None);
    }

    #[test]
    fn test_neighbors_are_adjacent() {
        let center = Coord::new(3, 3);
        for n in center.neighbors() {
            assert_eq!(center.manhattan(&n), 1);
            assert!(center.direction_to(&n).is_some());
        }
    }
}
