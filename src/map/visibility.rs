//! Visibility and exploration
//!
//! `visible` is rebuilt from scratch each turn from the observing faction's
//! units and cities; `seen` accumulates and never reverts, so every visible
//! tile is also seen.

use crate::core::types::Coord;
use crate::map::grid::Grid;

/// A viewpoint revealing the square of `radius` around `position`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observer {
    pub position: Coord,
    pub radius: u32,
}

impl Observer {
    pub fn new(position: Coord, radius: u32) -> Self {
        Self { position, radius }
    }
}

/// Clear all `visible` flags, then reveal around every observer
///
/// Returns the number of tiles seen for the first time.
pub fn recompute_visibility<I>(grid: &mut Grid, observers: I) -> usize
where
    I: IntoIterator<Item = Observer>,
{
    for tile in grid.tiles_mut() {
        tile.visible = false;
    }

    let mut discovered = 0;
    for observer in observers {
        for coord in grid.square(observer.position, observer.radius) {
            if let Some(tile) = grid.get_mut(coord) {
                if !tile.seen {
                    discovered += 1;
                }
                tile.visible = true;
                tile.seen = true;
            }
        }
    }

    debug_assert!(grid.tiles().iter().all(|t| !t.visible || t.seen));
    discovered
}
