//! Cheapest-path search over the tile grid
//!
//! Dijkstra ordered by accumulated movement cost, over orthogonal steps,
//! with the same passability rules as `move_unit`. Tiles holding any other
//! unit are treated as walls.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::core::types::{Coord, UnitId};
use crate::map::grid::Grid;
use crate::unit::kind::UnitKind;
use crate::unit::movement::step_cost;
use crate::unit::roster::UnitRoster;

/// Node in the open set
#[derive(Debug, Clone, Copy)]
struct PathNode {
    coord: Coord,
    cost: u32,
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.coord == other.coord
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap; coordinate breaks ties deterministically
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.coord.cmp(&self.coord))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the cheapest path for a unit to `target`
///
/// Returns the tiles to walk, excluding the start and including the target,
/// or None when the target is unreachable. An empty path means the unit is
/// already there.
pub fn find_path(units: &UnitRoster, id: UnitId, target: Coord, grid: &Grid) -> Option<Vec<Coord>> {
    let unit = units.get(id)?;
    search(unit.kind, unit.position, target, grid, |c| {
        units.at(c).is_some_and(|other| other.id != id)
    })
}

/// Core search, parameterised over the blocking predicate
pub fn search<F>(kind: UnitKind, start: Coord, target: Coord, grid: &Grid, blocked: F) -> Option<Vec<Coord>>
where
    F: Fn(Coord) -> bool,
{
    if !grid.contains(start) || !grid.contains(target) {
        return None;
    }
    if start == target {
        return Some(Vec::new());
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<Coord, Coord> = HashMap::new();
    let mut best: HashMap<Coord, u32> = HashMap::new();
    let mut expanded = 0usize;

    best.insert(start, 0);
    open_set.push(PathNode { coord: start, cost: 0 });

    while let Some(current) = open_set.pop() {
        if current.coord == target {
            tracing::trace!(expanded, cost = current.cost, "path found");
            return Some(reconstruct_path(&came_from, start, target));
        }
        if current.cost > *best.get(&current.coord).unwrap_or(&u32::MAX) {
            continue;
        }
        expanded += 1;

        for neighbor in grid.neighbors(current.coord) {
            let Some(cost) = step_cost(kind, grid, neighbor) else {
                continue;
            };
            if blocked(neighbor) {
                continue;
            }

            let tentative = current.cost + cost;
            if tentative < *best.get(&neighbor).unwrap_or(&u32::MAX) {
                came_from.insert(neighbor, current.coord);
                best.insert(neighbor, tentative);
                open_set.push(PathNode {
                    coord: neighbor,
                    cost: tentative,
                });
            }
        }
    }

    tracing::trace!(expanded, ?target, "no path");
    None
}

/// Walk `came_from` back from the target, dropping the start
fn reconstruct_path(came_from: &HashMap<Coord, Coord>, start: Coord, mut current: Coord) -> Vec<Coord> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Total entry cost of a path for a unit kind; None if any step is impassable
pub fn path_cost(kind: UnitKind, grid: &Grid, path: &[Coord]) -> Option<u32> {
    path.iter().map(|c| step_cost(kind, grid, *c)).sum()
}
