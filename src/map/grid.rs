//! World grid - fixed-size row-major tile storage
//!
//! The grid never resizes after creation. Every other subsystem reads and
//! writes tiles through it; coordinates outside the grid are rejected with
//! `None` rather than panicking.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::Coord;
use crate::map::tile::{Resource, Terrain, Tile};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Create a grid where every tile has the same terrain
    pub fn filled(width: u32, height: u32, terrain: Terrain) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::new(terrain); (width as usize) * (height as usize)],
        }
    }

    /// Create an all-water grid
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Terrain::Water)
    }

    /// Build a grid from rows of terrain glyphs
    ///
    /// `~` water, `.` grass, `^` mountain, `d` desert, `f` forest.
    /// Upper-case `W` and `I` are grass carrying wheat or iron.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(SimError::InvalidMap("grid rows must not be empty".into()));
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(SimError::InvalidMap(format!(
                    "row {y} has {} tiles, expected {width}",
                    row.chars().count()
                )));
            }
            for glyph in row.chars() {
                let tile = match glyph {
                    '~' => Tile::new(Terrain::Water),
                    '.' => Tile::new(Terrain::Grass),
                    '^' => Tile::new(Terrain::Mountain),
                    'd' => Tile::new(Terrain::Desert),
                    'f' => Tile::new(Terrain::Forest),
                    'W' => Tile::new(Terrain::Grass).with_resource(Resource::Wheat),
                    'I' => Tile::new(Terrain::Grass).with_resource(Resource::Iron),
                    other => {
                        return Err(SimError::InvalidMap(format!(
                            "unknown terrain glyph {other:?}"
                        )))
                    }
                };
                tiles.push(tile);
            }
        }

        Ok(Self {
            width: width as u32,
            height: height as u32,
            tiles,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && (coord.x as u32) < self.width && (coord.y as u32) < self.height
    }

    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        Some(coord.y as usize * self.width as usize + coord.x as usize)
    }

    pub fn coord_at(&self, index: usize) -> Option<Coord> {
        if index >= self.tiles.len() {
            return None;
        }
        let w = self.width as usize;
        Some(Coord::new((index % w) as i32, (index / w) as i32))
    }

    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        self.index_of(coord).map(|i| &self.tiles[i])
    }

    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        self.index_of(coord).map(move |i| &mut self.tiles[i])
    }

    pub fn terrain(&self, coord: Coord) -> Option<Terrain> {
        self.get(coord).map(|t| t.terrain)
    }

    pub fn set_terrain(&mut self, coord: Coord, terrain: Terrain) {
        if let Some(tile) = self.get_mut(coord) {
            tile.terrain = terrain;
            if !terrain.can_hold_resource() {
                tile.resource = None;
            }
        }
    }

    /// All coordinates in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height as i32).flat_map(move |y| (0..self.width as i32).map(move |x| Coord::new(x, y)))
    }

    /// Tiles with their coordinates in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Tile)> + '_ {
        self.coords().zip(self.tiles.iter())
    }

    /// In-bounds orthogonal neighbours
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        coord.neighbors().into_iter().filter(move |c| self.contains(*c))
    }

    /// Coordinates of the square of `radius` around `center`, clipped to the grid
    pub fn square(&self, center: Coord, radius: u32) -> Vec<Coord> {
        let r = radius as i32;
        let mut coords = Vec::new();
        for y in (center.y - r)..=(center.y + r) {
            for x in (center.x - r)..=(center.x + r) {
                let c = Coord::new(x, y);
                if self.contains(c) {
                    coords.push(c);
                }
            }
        }
        coords
    }

    /// Coordinates within Manhattan `radius` of `center`, clipped to the grid
    pub fn diamond(&self, center: Coord, radius: u32) -> Vec<Coord> {
        self.square(center, radius)
            .into_iter()
            .filter(|c| c.manhattan(&center) <= radius)
            .collect()
    }

    /// A tile is coastal when at least one orthogonal neighbour is water
    pub fn is_coastal(&self, coord: Coord) -> bool {
        self.neighbors(coord)
            .any(|n| self.terrain(n).is_some_and(|t| t.is_water()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        let grid = Grid::new(5, 3);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.len(), 15);
        assert!(grid.tiles().iter().all(|t| t.terrain == Terrain::Water));
    }

    #[test]
    fn test_index_round_trip_and_bounds() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.index_of(Coord::new(3, 2)), Some(11));
        assert_eq!(grid.coord_at(11), Some(Coord::new(3, 2)));
        assert_eq!(grid.index_of(Coord::new(4, 0)), None);
        assert_eq!(grid.index_of(Coord::new(-1, 0)), None);
        assert_eq!(grid.coord_at(12), None);
    }

    #[test]
    fn test_coords_are_row_major() {
        let grid = Grid::new(2, 2);
        let coords: Vec<_> = grid.coords().collect();
        assert_eq!(
            coords,
            vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 1), Coord::new(1, 1)]
        );
    }

    #[test]
    fn test_from_rows() {
        let grid = Grid::from_rows(&["~.^", "dfW"]).unwrap();
        assert_eq!(grid.terrain(Coord::new(0, 0)), Some(Terrain::Water));
        assert_eq!(grid.terrain(Coord::new(1, 0)), Some(Terrain::Grass));
        assert_eq!(grid.terrain(Coord::new(2, 0)), Some(Terrain::Mountain));
        assert_eq!(grid.terrain(Coord::new(0, 1)), Some(Terrain::Desert));
        assert_eq!(grid.terrain(Coord::new(1, 1)), Some(Terrain::Forest));
        assert_eq!(grid.get(Coord::new(2, 1)).unwrap().resource, Some(Resource::Wheat));
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        assert!(matches!(Grid::from_rows(&["...", ".."]), Err(SimError::InvalidMap(_))));
        assert!(matches!(Grid::from_rows(&[".x."]), Err(SimError::InvalidMap(_))));
        assert!(matches!(Grid::from_rows(&[]), Err(SimError::InvalidMap(_))));
    }

    #[test]
    fn test_square_clipped_to_bounds() {
        let grid = Grid::filled(3, 3, Terrain::Grass);
        assert_eq!(grid.square(Coord::new(1, 1), 1).len(), 9);
        assert_eq!(grid.square(Coord::new(0, 0), 1).len(), 4);
        assert_eq!(grid.square(Coord::new(0, 0), 0), vec![Coord::new(0, 0)]);
    }

    #[test]
    fn test_diamond() {
        let grid = Grid::filled(5, 5, Terrain::Grass);
        let diamond = grid.diamond(Coord::new(2, 2), 2);
        assert_eq!(diamond.len(), 13);
        assert!(!diamond.contains(&Coord::new(0, 0)));
    }

    #[test]
    fn test_coastal_check() {
        let grid = Grid::from_rows(&["...", ".~.", "..."]).unwrap();
        assert!(grid.is_coastal(Coord::new(1, 0)));
        assert!(!grid.is_coastal(Coord::new(0, 0)), "diagonal water does not count");
    }
}
