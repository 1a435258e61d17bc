//! World map generation
//!
//! Continents grow outward from random seed points on an all-water grid,
//! then each land tile is reclassified into mountain/forest/desert/grass
//! by fixed probability bands and may receive a single resource.

use std::collections::VecDeque;

use rand::Rng;

use crate::core::config::MapConfig;
use crate::core::error::Result;
use crate::core::types::Coord;
use crate::map::grid::Grid;
use crate::map::tile::{Resource, Terrain};

/// Generate a grid of the configured size
///
/// Fails without drawing from `rng` when the config does not validate.
pub fn generate_map<R: Rng + ?Sized>(config: &MapConfig, rng: &mut R) -> Result<Grid> {
    config.validate()?;

    let mut grid = Grid::new(config.width, config.height);

    let continents = continent_count(config);
    let target = (config.width as usize * config.height as usize) / (continents as usize + 1);

    for _ in 0..continents {
        grow_continent(&mut grid, target, config.land_growth_chance, rng);
    }

    let coords: Vec<Coord> = grid.coords().collect();
    for coord in coords {
        if grid.terrain(coord) == Some(Terrain::Water) {
            continue;
        }
        let terrain = roll_land_terrain(config, rng);
        let resource = if terrain.can_hold_resource() {
            roll_resource(config, rng)
        } else {
            None
        };
        if let Some(tile) = grid.get_mut(coord) {
            tile.terrain = terrain;
            tile.resource = resource;
        }
    }

    tracing::debug!(
        width = config.width,
        height = config.height,
        continents,
        land = grid.tiles().iter().filter(|t| t.terrain.is_land()).count(),
        "generated map"
    );

    Ok(grid)
}

/// Number of continents seeded for a map, never fewer than one
pub fn continent_count(config: &MapConfig) -> u32 {
    (config.width.min(config.height) / config.continent_divisor.max(1)).max(1)
}

/// Flood land outward from a random seed until `target` tiles are land
/// or the frontier runs dry
fn grow_continent<R: Rng + ?Sized>(grid: &mut Grid, target: usize, chance: f64, rng: &mut R) {
    let seed = Coord::new(
        rng.gen_range(0..grid.width() as i32),
        rng.gen_range(0..grid.height() as i32),
    );

    let mut grown = 0;
    let mut frontier = VecDeque::new();
    if grid.terrain(seed) == Some(Terrain::Water) {
        grid.set_terrain(seed, Terrain::Grass);
        grown += 1;
    }
    frontier.push_back(seed);

    while grown < target {
        let Some(current) = frontier.pop_front() else {
            break;
        };
        for neighbor in current.neighbors() {
            if grown >= target {
                break;
            }
            if grid.terrain(neighbor) != Some(Terrain::Water) {
                continue;
            }
            if rng.gen_bool(chance) {
                grid.set_terrain(neighbor, Terrain::Grass);
                grown += 1;
                frontier.push_back(neighbor);
            }
        }
    }
}

fn roll_land_terrain<R: Rng + ?Sized>(config: &MapConfig, rng: &mut R) -> Terrain {
    let roll: f64 = rng.gen();
    if roll < config.mountain_chance {
        Terrain::Mountain
    } else if roll < config.mountain_chance + config.forest_chance {
        Terrain::Forest
    } else if roll < config.mountain_chance + config.forest_chance + config.desert_chance {
        Terrain::Desert
    } else {
        Terrain::Grass
    }
}

fn roll_resource<R: Rng + ?Sized>(config: &MapConfig, rng: &mut R) -> Option<Resource> {
    let roll: f64 = rng.gen();
    if roll < config.wheat_chance {
        Some(Resource::Wheat)
    } else if roll < config.wheat_chance + config.iron_chance {
        Some(Resource::Iron)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SimError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config(width: u32, height: u32) -> MapConfig {
        MapConfig {
            width,
            height,
            ..MapConfig::default()
        }
    }

    #[test]
    fn test_dimensions_and_default_flags() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let grid = generate_map(&config(5, 3), &mut rng).unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        for tile in grid.tiles() {
            assert!(tile.city.is_none());
            assert!(!tile.seen);
            assert!(!tile.visible);
            assert!(tile.claimed_by.is_none());
        }
    }

    #[test]
    fn test_water_and_mountains_carry_no_resource() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = generate_map(&config(60, 40), &mut rng).unwrap();
        for tile in grid.tiles() {
            if tile.resource.is_some() {
                assert!(tile.terrain.can_hold_resource(), "{:?} has a resource", tile.terrain);
            }
        }
    }

    #[test]
    fn test_land_is_grown() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let grid = generate_map(&config(40, 30), &mut rng).unwrap();
        let land = grid.tiles().iter().filter(|t| t.terrain.is_land()).count();
        assert!(land > 0);
        // One continent targeting half the map; growth can stall but never overshoots
        assert!(land <= 40 * 30 / 2);
    }

    #[test]
    fn test_same_seed_same_map() {
        let a = generate_map(&config(30, 20), &mut ChaCha8Rng::seed_from_u64(11)).unwrap();
        let b = generate_map(&config(30, 20), &mut ChaCha8Rng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_continent_count() {
        assert_eq!(continent_count(&config(10, 10)), 1);
        assert_eq!(continent_count(&config(40, 30)), 1);
        assert_eq!(continent_count(&config(80, 60)), 3);
    }

    #[test]
    fn test_all_land_bands_when_growth_certain() {
        let mut cfg = config(20, 20);
        cfg.land_growth_chance = 1.0;
        cfg.mountain_chance = 0.0;
        cfg.forest_chance = 0.0;
        cfg.desert_chance = 0.0;
        let grid = generate_map(&cfg, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
        for tile in grid.tiles() {
            assert!(matches!(tile.terrain, Terrain::Water | Terrain::Grass));
        }
    }

    #[test]
    fn test_empty_map_is_an_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            generate_map(&config(0, 10), &mut rng),
            Err(SimError::InvalidConfig(_))
        ));
        assert!(generate_map(&config(10, 0), &mut rng).is_err());
    }
}
