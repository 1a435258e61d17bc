//! World - the game state aggregate and its command surface
//!
//! Owns the grid, units, cities, ledgers and the seeded RNG. External
//! callers read the public fields between turns and mutate only through
//! the command methods.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::city::founding::{found_city, Founding};
use crate::city::ledger::ResourceLedger;
use crate::city::registry::{City, CityRegistry};
use crate::core::config::GameConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{CityId, Coord, FactionId, Turn, UnitId};
use crate::diplomacy::{trade, DiplomacyLedger, Relation};
use crate::map::generation::generate_map;
use crate::map::grid::Grid;
use crate::map::visibility::{recompute_visibility, Observer};
use crate::simulation::director::run_director;
use crate::simulation::summary::WorldSummary;
use crate::simulation::turn::{resolve_turn, TurnEvent, TurnReport};
use crate::unit::combat::{attack_unit, AttackOutcome};
use crate::unit::kind::UnitKind;
use crate::unit::movement::{move_unit, MoveOutcome};
use crate::unit::orders::{order_path, process_unit_queue, QueueProgress};
use crate::unit::pathfinding::find_path;
use crate::unit::roster::{Unit, UnitRoster};

/// Factions that get a ledger entry at world creation
pub const FACTIONS: [FactionId; 3] = [FactionId::PLAYER, FactionId::CIVILIZATION, FactionId::BARBARIANS];

pub struct World {
    pub config: GameConfig,
    pub grid: Grid,
    pub units: UnitRoster,
    pub cities: CityRegistry,
    pub ledger: ResourceLedger,
    pub diplomacy: DiplomacyLedger,
    /// Turns completed so far
    pub turn: Turn,
    /// Let the director play the player faction too
    pub autoplay: bool,
    rng: ChaCha8Rng,
}

impl World {
    /// Wrap an existing grid with empty collections and registered factions
    pub fn with_grid(grid: Grid, config: GameConfig, seed: u64) -> Self {
        let mut ledger = ResourceLedger::new();
        for faction in FACTIONS {
            ledger.register(faction);
        }

        Self {
            config,
            grid,
            units: UnitRoster::new(),
            cities: CityRegistry::new(),
            ledger,
            diplomacy: DiplomacyLedger::new(),
            turn: 0,
            autoplay: false,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate a fresh map and place the starting units
    pub fn generate(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.map.seed;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = generate_map(&config.map, &mut rng)?;

        let mut world = Self::with_grid(grid, config, seed);
        world.rng = rng;
        world.place_starting_units();
        world.recompute_visibility();

        tracing::info!(
            width = world.grid.width(),
            height = world.grid.height(),
            seed,
            units = world.units.len(),
            "world created"
        );
        Ok(world)
    }

    /// One settler and one warrior per civilised faction, then barbarians,
    /// each on its own random land tile
    fn place_starting_units(&mut self) {
        let mut free: Vec<Coord> = self
            .grid
            .iter()
            .filter(|(_, tile)| tile.terrain.movement_cost(false).is_some())
            .map(|(coord, _)| coord)
            .collect();
        free.shuffle(&mut self.rng);

        let mut placements = Vec::new();
        for faction in [FactionId::PLAYER, FactionId::CIVILIZATION] {
            placements.push((UnitKind::Settler, faction));
            placements.push((UnitKind::Warrior, faction));
        }
        for _ in 0..self.config.world.barbarian_count {
            placements.push((UnitKind::Barbarian, FactionId::BARBARIANS));
        }

        if placements.len() > free.len() {
            tracing::warn!(
                wanted = placements.len(),
                available = free.len(),
                "not enough land for every starting unit"
            );
        }
        for ((kind, owner), position) in placements.into_iter().zip(free) {
            self.units.spawn(kind, position, owner);
        }
    }

    pub fn unit(&self, id: UnitId) -> Result<&Unit> {
        self.units.get(id).ok_or(SimError::UnitNotFound(id))
    }

    pub fn city(&self, id: CityId) -> Result<&City> {
        self.cities.get(id).ok_or(SimError::CityNotFound(id))
    }

    pub fn city_at(&self, position: Coord) -> Option<&City> {
        let id = self.grid.get(position)?.city?;
        self.cities.get(id)
    }

    pub fn move_unit(&mut self, id: UnitId, dx: i32, dy: i32) -> MoveOutcome {
        move_unit(&mut self.units, id, dx, dy, &self.grid)
    }

    pub fn attack_unit(&mut self, attacker: UnitId, defender: UnitId) -> AttackOutcome {
        attack_unit(&mut self.units, attacker, defender, &self.grid)
    }

    pub fn find_path(&self, id: UnitId, target: Coord) -> Option<Vec<Coord>> {
        find_path(&self.units, id, target, &self.grid)
    }

    /// Queue a path to `target` and start walking it
    ///
    /// None when no path exists.
    pub fn order_path(&mut self, id: UnitId, target: Coord) -> Option<QueueProgress> {
        order_path(&mut self.units, id, target, &self.grid)?;
        Some(process_unit_queue(&mut self.units, id, &self.grid))
    }

    /// Walk every pending queue with the moves units have left
    pub fn continue_orders(&mut self) -> Vec<(UnitId, QueueProgress)> {
        let queued: Vec<UnitId> = self
            .units
            .iter()
            .filter(|u| !u.path.is_empty())
            .map(|u| u.id)
            .collect();

        let mut walked = Vec::new();
        for id in queued {
            // Killed by an earlier unit's step
            if !self.units.contains(id) {
                continue;
            }
            walked.push((id, process_unit_queue(&mut self.units, id, &self.grid)));
        }
        walked
    }

    /// Place a city directly, as founding does, without consuming a settler
    ///
    /// None if the tile is off-grid or already holds a city.
    pub fn place_city(&mut self, owner: FactionId, position: Coord) -> Option<CityId> {
        let tile = self.grid.get_mut(position)?;
        if tile.city.is_some() {
            return None;
        }
        let id = self.cities.create(owner, position);
        tile.city = Some(id);
        Some(id)
    }

    pub fn found_city(&mut self, settler: UnitId) -> Option<Founding> {
        found_city(&mut self.units, &mut self.cities, &mut self.grid, settler)
    }

    pub fn set_diplomacy(&mut self, a: FactionId, b: FactionId, relation: Relation) {
        self.diplomacy.set(a, b, relation);
    }

    pub fn diplomacy(&self, a: FactionId, b: FactionId) -> Relation {
        self.diplomacy.get(a, b)
    }

    pub fn trade(&mut self, from: FactionId, to: FactionId, amount: u32) -> bool {
        trade(from, to, amount, &mut self.ledger, &self.diplomacy)
    }

    /// Rebuild the player's view from their units and cities
    pub fn recompute_visibility(&mut self) -> usize {
        let city_sight = self.config.city.sight_radius;
        let observers: Vec<Observer> = self
            .units
            .iter()
            .filter(|u| u.owner == FactionId::PLAYER)
            .map(|u| Observer::new(u.position, u.sight()))
            .chain(
                self.cities
                    .iter()
                    .filter(|c| c.owner == FactionId::PLAYER)
                    .map(|c| Observer::new(c.position, city_sight)),
            )
            .collect();
        recompute_visibility(&mut self.grid, observers)
    }

    /// End the current turn
    ///
    /// The director acts with what is left of this turn's budgets, then the
    /// resolver resets moves, moves barbarians and processes cities. Cities
    /// the director founded are first processed on the following turn.
    pub fn advance_turn(&mut self) -> TurnReport {
        let mut events: Vec<TurnEvent> = Vec::new();

        let mut directed = vec![FactionId::CIVILIZATION];
        if self.autoplay {
            directed.push(FactionId::PLAYER);
        }
        for faction in directed {
            events.extend(run_director(
                faction,
                &mut self.grid,
                &mut self.units,
                &mut self.cities,
                &mut self.rng,
            ));
        }

        let founded: Vec<CityId> = events
            .iter()
            .filter_map(|e| match e {
                TurnEvent::CityFounded { city, .. } => Some(*city),
                _ => None,
            })
            .collect();

        events.extend(resolve_turn(
            &mut self.grid,
            &mut self.units,
            &mut self.cities,
            &mut self.ledger,
            &self.config.city,
            &founded,
            &mut self.rng,
        ));

        let discovered = self.recompute_visibility();
        self.turn += 1;

        tracing::info!(
            turn = self.turn,
            events = events.len(),
            units = self.units.len(),
            cities = self.cities.len(),
            "turn complete"
        );

        TurnReport {
            turn: self.turn,
            events,
            discovered,
        }
    }

    pub fn summary(&self) -> WorldSummary {
        WorldSummary::from_world(self)
    }
}
