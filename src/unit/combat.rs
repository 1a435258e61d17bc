//! Combat resolution
//!
//! Melee is a simultaneous exchange: each side loses health equal to the
//! other's strength in the same call. Ranged attacks (distance above one)
//! only hurt the defender. Dead units leave the roster immediately.

use serde::{Deserialize, Serialize};

use crate::core::types::{Coord, UnitId};
use crate::map::grid::Grid;
use crate::unit::movement::{step_cost, BlockReason};
use crate::unit::roster::UnitRoster;

/// What happened in a single exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatReport {
    pub attacker: UnitId,
    pub defender: UnitId,
    /// The defender's tile
    pub location: Coord,
    pub damage_to_defender: u32,
    pub damage_to_attacker: u32,
    pub attacker_destroyed: bool,
    pub defender_destroyed: bool,
    /// Attacker moved onto the defender's vacated tile
    pub attacker_advanced: bool,
    pub ranged: bool,
}

/// Result of an explicit attack command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackOutcome {
    Blocked(BlockReason),
    Attacked(CombatReport),
}

impl AttackOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }
}

/// Resolve a melee exchange between two adjacent units
///
/// On a kill the surviving attacker advances onto the defender's tile and
/// pays that tile's cost. If the defender survives, the attacker stays put
/// and its budget is spent.
pub fn resolve_melee(units: &mut UnitRoster, attacker: UnitId, defender: UnitId, grid: &Grid) -> CombatReport {
    let (attack, attacker_kind) = match units.get(attacker) {
        Some(u) => (u.kind.strength(), u.kind),
        None => return missing_report(attacker, defender),
    };
    let (defense, location) = match units.get(defender) {
        Some(u) => (u.kind.strength(), u.position),
        None => return missing_report(attacker, defender),
    };

    let defender_destroyed = units
        .get_mut(defender)
        .map(|u| u.take_damage(attack))
        .unwrap_or(false);
    let attacker_destroyed = units
        .get_mut(attacker)
        .map(|u| u.take_damage(defense))
        .unwrap_or(false);

    if defender_destroyed {
        units.remove(defender);
        tracing::info!(unit = ?defender, ?location, "unit destroyed in melee");
    }
    if attacker_destroyed {
        units.remove(attacker);
        tracing::info!(unit = ?attacker, "attacker destroyed in melee");
    }

    let mut attacker_advanced = false;
    if let Some(unit) = units.get_mut(attacker) {
        match (defender_destroyed, step_cost(attacker_kind, grid, location)) {
            (true, Some(cost)) => {
                unit.position = location;
                unit.moves = unit.moves.saturating_sub(cost);
                attacker_advanced = true;
            }
            _ => unit.moves = 0,
        }
    }

    CombatReport {
        attacker,
        defender,
        location,
        damage_to_defender: attack,
        damage_to_attacker: defense,
        attacker_destroyed,
        defender_destroyed,
        attacker_advanced,
        ranged: false,
    }
}

/// Attack a unit without moving first
///
/// Needs a remaining budget and the target within the attacker's range.
/// Adjacent targets get a full melee exchange; farther ones are shot at
/// and cannot strike back. Any attack ends the attacker's turn.
pub fn attack_unit(units: &mut UnitRoster, attacker: UnitId, defender: UnitId, grid: &Grid) -> AttackOutcome {
    let (Some(a), Some(d)) = (units.get(attacker), units.get(defender)) else {
        return AttackOutcome::Blocked(BlockReason::UnknownUnit);
    };
    if a.moves == 0 {
        return AttackOutcome::Blocked(BlockReason::NoMovesLeft);
    }
    if a.owner == d.owner {
        return AttackOutcome::Blocked(BlockReason::NotHostile);
    }
    let distance = a.position.manhattan(&d.position);
    if distance == 0 || distance > a.range {
        return AttackOutcome::Blocked(BlockReason::OutOfRange);
    }

    let report = if distance == 1 {
        resolve_melee(units, attacker, defender, grid)
    } else {
        resolve_ranged(units, attacker, defender)
    };

    if let Some(unit) = units.get_mut(attacker) {
        unit.moves = 0;
    }
    AttackOutcome::Attacked(report)
}

fn resolve_ranged(units: &mut UnitRoster, attacker: UnitId, defender: UnitId) -> CombatReport {
    let attack = units.get(attacker).map(|u| u.kind.strength()).unwrap_or(0);
    let mut location = Coord::new(0, 0);
    let mut defender_destroyed = false;
    if let Some(target) = units.get_mut(defender) {
        location = target.position;
        defender_destroyed = target.take_damage(attack);
    }
    if defender_destroyed {
        units.remove(defender);
        tracing::info!(unit = ?defender, ?location, "unit destroyed by ranged attack");
    }

    CombatReport {
        attacker,
        defender,
        location,
        damage_to_defender: attack,
        damage_to_attacker: 0,
        attacker_destroyed: false,
        defender_destroyed,
        attacker_advanced: false,
        ranged: true,
    }
}

fn missing_report(attacker: UnitId, defender: UnitId) -> CombatReport {
    tracing::warn!(?attacker, ?defender, "combat between missing units");
    CombatReport {
        attacker,
        defender,
        location: Coord::new(0, 0),
        damage_to_defender: 0,
        damage_to_attacker: 0,
        attacker_destroyed: false,
        defender_destroyed: false,
        attacker_advanced: false,
        ranged: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FactionId;
    use crate::map::tile::Terrain;
    use crate::unit::kind::UnitKind;
    use crate::unit::movement::{move_unit, MoveOutcome};

    fn grass(width: u32, height: u32) -> Grid {
        Grid::filled(width, height, Terrain::Grass)
    }

    #[test]
    fn test_warrior_kills_barbarian_and_advances() {
        let grid = grass(2, 2);
        let mut units = UnitRoster::new();
        let warrior = units.spawn(UnitKind::Warrior, Coord::new(0, 0), FactionId::PLAYER);
        let barbarian = units.spawn(UnitKind::Barbarian, Coord::new(1, 0), FactionId::BARBARIANS);

        let outcome = move_unit(&mut units, warrior, 1, 0, &grid);
        let MoveOutcome::Attacked(report) = outcome else {
            panic!("expected an attack, got {outcome:?}");
        };
        assert!(report.defender_destroyed);
        assert!(report.attacker_advanced);
        assert_eq!(units.len(), 1);
        assert!(!units.contains(barbarian));

        let survivor = units.get(warrior).unwrap();
        assert_eq!(survivor.position, Coord::new(1, 0));
        assert_eq!(survivor.moves, 1, "advancing costs the tile, not the whole budget");
        assert_eq!(survivor.health, 9);
    }

    #[test]
    fn test_melee_damage_is_simultaneous() {
        let grid = grass(2, 1);
        let mut units = UnitRoster::new();
        let horse = units.spawn(UnitKind::Horseman, Coord::new(0, 0), FactionId::PLAYER);
        let warrior = units.spawn(UnitKind::Warrior, Coord::new(1, 0), FactionId::CIVILIZATION);

        let report = resolve_melee(&mut units, horse, warrior, &grid);
        assert_eq!(report.damage_to_defender, 3);
        assert_eq!(report.damage_to_attacker, 2);
        assert_eq!(units.get(warrior).unwrap().health, 7);
        assert_eq!(units.get(horse).unwrap().health, 10);

        // Defender survived: attacker stays and its turn is over
        let attacker = units.get(horse).unwrap();
        assert_eq!(attacker.position, Coord::new(0, 0));
        assert_eq!(attacker.moves, 0);
        assert!(!report.attacker_advanced);
    }

    #[test]
    fn test_both_can_die() {
        let grid = grass(2, 1);
        let mut units = UnitRoster::new();
        let a = units.spawn(UnitKind::Barbarian, Coord::new(0, 0), FactionId::BARBARIANS);
        let b = units.spawn(UnitKind::Warrior, Coord::new(1, 0), FactionId::PLAYER);
        units.get_mut(b).unwrap().health = 1;

        let report = resolve_melee(&mut units, a, b, &grid);
        // Barbarian loses 2 (dead), warrior loses 1 (dead)
        assert!(report.attacker_destroyed);
        assert!(report.defender_destroyed);
        assert!(!report.attacker_advanced);
        assert!(units.is_empty());
    }

    #[test]
    fn test_attack_requires_moves() {
        let grid = grass(2, 1);
        let mut units = UnitRoster::new();
        let a = units.spawn(UnitKind::Warrior, Coord::new(0, 0), FactionId::PLAYER);
        let b = units.spawn(UnitKind::Warrior, Coord::new(1, 0), FactionId::CIVILIZATION);
        units.get_mut(a).unwrap().moves = 0;

        assert_eq!(
            attack_unit(&mut units, a, b, &grid),
            AttackOutcome::Blocked(BlockReason::NoMovesLeft)
        );
        assert_eq!(units.get(b).unwrap().health, 10);
    }

    #[test]
    fn test_attack_out_of_range() {
        let grid = grass(4, 1);
        let mut units = UnitRoster::new();
        let a = units.spawn(UnitKind::Warrior, Coord::new(0, 0), FactionId::PLAYER);
        let b = units.spawn(UnitKind::Warrior, Coord::new(2, 0), FactionId::CIVILIZATION);
        assert_eq!(
            attack_unit(&mut units, a, b, &grid),
            AttackOutcome::Blocked(BlockReason::OutOfRange)
        );
        assert_eq!(units.get(a).unwrap().moves, 2);
    }

    #[test]
    fn test_attack_same_faction_rejected() {
        let grid = grass(2, 1);
        let mut units = UnitRoster::new();
        let a = units.spawn(UnitKind::Warrior, Coord::new(0, 0), FactionId::PLAYER);
        let b = units.spawn(UnitKind::Settler, Coord::new(1, 0), FactionId::PLAYER);
        assert_eq!(
            attack_unit(&mut units, a, b, &grid),
            AttackOutcome::Blocked(BlockReason::NotHostile)
        );
    }

    #[test]
    fn test_ranged_attack_no_counter() {
        let grid = grass(3, 1);
        let mut units = UnitRoster::new();
        let archer = units.spawn(UnitKind::Archer, Coord::new(0, 0), FactionId::PLAYER);
        let target = units.spawn(UnitKind::Horseman, Coord::new(2, 0), FactionId::CIVILIZATION);

        let AttackOutcome::Attacked(report) = attack_unit(&mut units, archer, target, &grid) else {
            panic!("archer should be able to shoot two tiles");
        };
        assert!(report.ranged);
        assert_eq!(report.damage_to_attacker, 0);
        assert_eq!(units.get(target).unwrap().health, 10);

        let shooter = units.get(archer).unwrap();
        assert_eq!(shooter.health, 8);
        assert_eq!(shooter.position, Coord::new(0, 0));
        assert_eq!(shooter.moves, 0, "attacking ends the turn");
    }

    #[test]
    fn test_adjacent_archer_attack_is_melee() {
        let grid = grass(2, 1);
        let mut units = UnitRoster::new();
        let archer = units.spawn(UnitKind::Archer, Coord::new(0, 0), FactionId::PLAYER);
        let target = units.spawn(UnitKind::Warrior, Coord::new(1, 0), FactionId::CIVILIZATION);

        let AttackOutcome::Attacked(report) = attack_unit(&mut units, archer, target, &grid) else {
            panic!("adjacent attack should resolve");
        };
        assert!(!report.ranged);
        assert_eq!(units.get(archer).unwrap().health, 6);
        assert_eq!(units.get(target).unwrap().health, 8);
    }

    #[test]
    fn test_melee_kill_via_attack_advances_but_spends_budget() {
        let grid = grass(2, 1);
        let mut units = UnitRoster::new();
        let warrior = units.spawn(UnitKind::Warrior, Coord::new(0, 0), FactionId::PLAYER);
        let barbarian = units.spawn(UnitKind::Barbarian, Coord::new(1, 0), FactionId::BARBARIANS);

        let outcome = attack_unit(&mut units, warrior, barbarian, &grid);
        assert!(!outcome.is_blocked());
        let unit = units.get(warrior).unwrap();
        assert_eq!(unit.position, Coord::new(1, 0));
        assert_eq!(unit.moves, 0);
    }

    #[test]
    fn test_land_unit_does_not_advance_onto_water() {
        let grid = Grid::from_rows(&["..~"]).unwrap();
        let mut units = UnitRoster::new();
        let archer = units.spawn(UnitKind::Archer, Coord::new(1, 0), FactionId::PLAYER);
        let ship = units.spawn(UnitKind::Ship, Coord::new(2, 0), FactionId::CIVILIZATION);
        units.get_mut(ship).unwrap().health = 1;

        let AttackOutcome::Attacked(report) = attack_unit(&mut units, archer, ship, &grid) else {
            panic!("adjacent ship is a valid target");
        };
        assert!(report.defender_destroyed);
        assert!(!report.attacker_advanced);
        assert_eq!(units.get(archer).unwrap().position, Coord::new(1, 0));
    }
}
