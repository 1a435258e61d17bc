//! Queued click-to-path orders
//!
//! A path is planned once and then walked step by step out of the unit's
//! move budget. Any step that does not end in a plain move drops the rest
//! of the queue, including a step the unit cannot afford with what is left
//! this turn; interrupted paths are not replanned.

use crate::core::types::{Coord, UnitId};
use crate::map::grid::Grid;
use crate::unit::movement::{move_unit, BlockReason, MoveOutcome};
use crate::unit::pathfinding::find_path;
use crate::unit::roster::UnitRoster;

/// Progress made walking a queue
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueueProgress {
    pub steps_taken: u32,
    /// The outcome that cut the walk short, if any
    pub interrupted_by: Option<MoveOutcome>,
    /// Steps still queued for later turns
    pub remaining: usize,
}

/// Plan a path to `target` and store it as the unit's pending queue
///
/// Returns the number of queued steps, or None when no path exists (the
/// previous queue is cleared either way).
pub fn order_path(units: &mut UnitRoster, id: UnitId, target: Coord, grid: &Grid) -> Option<usize> {
    let path = find_path(units, id, target, grid);
    let unit = units.get_mut(id)?;
    unit.path.clear();
    let path = path?;
    let steps = path.len();
    unit.path.extend(path);
    tracing::debug!(unit = ?id, ?target, steps, "path ordered");
    Some(steps)
}

/// Walk the pending queue while moves remain
pub fn process_unit_queue(units: &mut UnitRoster, id: UnitId, grid: &Grid) -> QueueProgress {
    let mut progress = QueueProgress::default();

    loop {
        let Some(unit) = units.get_mut(id) else {
            break;
        };
        if unit.moves == 0 {
            break;
        }
        let Some(next) = unit.path.pop_front() else {
            break;
        };
        let position = unit.position;

        let outcome = match position.direction_to(&next) {
            Some(direction) => {
                let (dx, dy) = direction.delta();
                move_unit(units, id, dx, dy, grid)
            }
            None => MoveOutcome::Blocked(BlockReason::NotAdjacent),
        };

        match outcome {
            MoveOutcome::Moved { .. } => progress.steps_taken += 1,
            other => {
                if let Some(unit) = units.get_mut(id) {
                    unit.path.clear();
                }
                tracing::debug!(unit = ?id, outcome = ?other, "queued path interrupted");
                progress.interrupted_by = Some(other);
                break;
            }
        }
    }

    progress.remaining = units.get(id).map(|u| u.path.len()).unwrap_or(0);
    progress
}
