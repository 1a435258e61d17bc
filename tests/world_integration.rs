//! Integration tests for whole games: bootstrap, the scripted rival,
//! barbarians and the serialized summary.

use frontier_realms::core::config::GameConfig;
use frontier_realms::core::types::{Coord, FactionId};
use frontier_realms::map::{Grid, Terrain};
use frontier_realms::simulation::{TurnEvent, World};
use frontier_realms::unit::UnitKind;

fn config(seed: u64) -> GameConfig {
    let mut config = GameConfig::default();
    config.map.width = 24;
    config.map.height = 18;
    config.map.seed = seed;
    config
}

#[test]
fn test_rival_founds_its_first_city_immediately() {
    let mut world = World::generate(config(5)).unwrap();
    assert_eq!(world.cities.len(), 0);

    let report = world.advance_turn();

    assert_eq!(world.cities.count_owned_by(FactionId::CIVILIZATION), 1);
    assert_eq!(world.cities.count_owned_by(FactionId::PLAYER), 0);
    assert!(report
        .events
        .iter()
        .any(|e| matches!(e, TurnEvent::CityFounded { owner, .. } if *owner == FactionId::CIVILIZATION)));
}

#[test]
fn test_autoplay_founds_for_player_too() {
    let mut world = World::generate(config(6)).unwrap();
    world.autoplay = true;
    world.advance_turn();
    assert_eq!(world.cities.count_owned_by(FactionId::PLAYER), 1);
    assert_eq!(world.units.count_of(FactionId::PLAYER, UnitKind::Settler), 0);
}

#[test]
fn test_rival_rebuilds_settlers() {
    let mut world = World::generate(config(8)).unwrap();
    let mut saw_settler_build = false;
    for _ in 0..30 {
        let report = world.advance_turn();
        saw_settler_build |= report.events.iter().any(|e| {
            matches!(
                e,
                TurnEvent::UnitProduced { kind: UnitKind::Settler, .. }
            )
        });
    }
    assert!(saw_settler_build);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = World::generate(config(21)).unwrap();
    let mut b = World::generate(config(21)).unwrap();
    a.autoplay = true;
    b.autoplay = true;
    for _ in 0..15 {
        assert_eq!(a.advance_turn(), b.advance_turn());
    }
    assert_eq!(a.summary(), b.summary());
}

#[test]
fn test_barbarians_attack_neighbours() {
    let mut world = World::with_grid(Grid::filled(3, 1, Terrain::Grass), GameConfig::default(), 2);
    world.units.spawn(UnitKind::Barbarian, Coord::new(0, 0), FactionId::BARBARIANS);
    let settler = world.units.spawn(UnitKind::Settler, Coord::new(1, 0), FactionId::PLAYER);
    world.units.get_mut(settler).unwrap().health = 1;

    // The barbarian can only step east, into the settler
    let mut fought = false;
    for _ in 0..60 {
        let report = world.advance_turn();
        if report.combats().next().is_some() {
            fought = true;
            break;
        }
    }
    assert!(fought);
    assert!(world.unit(settler).is_err());
}

#[test]
fn test_summary_json_shape() {
    let mut world = World::generate(config(12)).unwrap();
    world.advance_turn();
    let json = world.summary().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["turn"], 1);
    assert_eq!(value["factions"].as_array().map(|f| f.len()), Some(3));
    assert_eq!(value["factions"][1]["name"], "civilization");
}

#[test]
fn test_config_file_drives_generation() {
    let config = GameConfig::parse_toml(
        r#"
        [map]
        width = 12
        height = 10
        seed = 3

        [world]
        barbarian_count = 0
        "#,
    )
    .unwrap();
    let world = World::generate(config).unwrap();
    assert_eq!(world.grid.width(), 12);
    assert_eq!(world.grid.height(), 10);
    assert_eq!(world.units.count_of(FactionId::BARBARIANS, UnitKind::Barbarian), 0);
}
