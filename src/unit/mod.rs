//! Unit layer - creation, movement, combat, pathfinding and queued orders

pub mod combat;
pub mod kind;
pub mod movement;
pub mod orders;
pub mod pathfinding;
pub mod roster;

pub use combat::{attack_unit, resolve_melee, AttackOutcome, CombatReport};
pub use kind::{UnitKind, UnitStats};
pub use movement::{attackable_tiles, move_unit, step_cost, BlockReason, MoveOutcome};
pub use orders::{order_path, process_unit_queue, QueueProgress};
pub use pathfinding::{find_path, path_cost};
pub use roster::{create_unit, Unit, UnitRoster};
