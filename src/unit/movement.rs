//! Unit movement
//!
//! Moves are single orthogonal steps paid for out of the unit's per-turn
//! budget. Stepping onto an enemy turns the move into a melee exchange.

use serde::{Deserialize, Serialize};

use crate::core::types::{Coord, Direction, UnitId};
use crate::map::grid::Grid;
use crate::unit::combat::{resolve_melee, CombatReport};
use crate::unit::kind::UnitKind;
use crate::unit::roster::{Unit, UnitRoster};

/// Why a command was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockReason {
    UnknownUnit,
    /// Delta is zero, diagonal or longer than one tile
    NotAdjacent,
    OutOfBounds,
    NoMovesLeft,
    /// Terrain the unit class can never enter
    Impassable,
    /// Terrain cost exceeds the remaining budget
    InsufficientMoves,
    FriendlyOccupied,
    /// Attack target not hostile
    NotHostile,
    OutOfRange,
}

/// Result of a move command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Blocked(BlockReason),
    Moved { to: Coord, cost: u32 },
    Attacked(CombatReport),
}

impl MoveOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }
}

/// Cost for a unit kind to enter `coord`; None when impassable or off-grid
pub fn step_cost(kind: UnitKind, grid: &Grid, coord: Coord) -> Option<u32> {
    grid.terrain(coord)?.movement_cost(kind.is_naval())
}

/// Move a unit one orthogonal step by `(dx, dy)`
pub fn move_unit(units: &mut UnitRoster, id: UnitId, dx: i32, dy: i32, grid: &Grid) -> MoveOutcome {
    let Some(unit) = units.get(id) else {
        return MoveOutcome::Blocked(BlockReason::UnknownUnit);
    };

    let (target, cost) = match check_step(unit, dx, dy, grid) {
        Ok(step) => step,
        Err(reason) => {
            tracing::debug!(unit = ?id, ?reason, "move blocked");
            return MoveOutcome::Blocked(reason);
        }
    };

    if let Some(occupant) = units.at(target) {
        if occupant.owner == unit.owner {
            return MoveOutcome::Blocked(BlockReason::FriendlyOccupied);
        }
        let defender = occupant.id;
        return MoveOutcome::Attacked(resolve_melee(units, id, defender, grid));
    }

    if let Some(unit) = units.get_mut(id) {
        unit.position = target;
        unit.moves -= cost;
    }
    MoveOutcome::Moved { to: target, cost }
}

/// Validate a step without touching occupancy; yields destination and cost
fn check_step(unit: &Unit, dx: i32, dy: i32, grid: &Grid) -> Result<(Coord, u32), BlockReason> {
    if Direction::from_delta(dx, dy).is_none() {
        return Err(BlockReason::NotAdjacent);
    }
    let target = unit.position.offset(dx, dy);
    if !grid.contains(target) {
        return Err(BlockReason::OutOfBounds);
    }
    if unit.moves == 0 {
        return Err(BlockReason::NoMovesLeft);
    }
    let cost = step_cost(unit.kind, grid, target).ok_or(BlockReason::Impassable)?;
    if cost > unit.moves {
        return Err(BlockReason::InsufficientMoves);
    }
    Ok((target, cost))
}

/// Tiles a unit could target with an attack this turn, for highlighting
///
/// Every tile within Manhattan `range`, clipped to the grid, excluding the
/// unit's own tile.
pub fn attackable_tiles(unit: &Unit, grid: &Grid) -> Vec<Coord> {
    grid.diamond(unit.position, unit.range)
        .into_iter()
        .filter(|c| *c != unit.position)
        .collect()
}
