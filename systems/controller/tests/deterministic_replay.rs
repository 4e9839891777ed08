use std::collections::HashSet;

use cat_chase_core::{CellCoord, Event, GameConfig};
use cat_chase_system_controller::{parse_script, Controller};
use cat_chase_world::{self as world, query, World};

const SCRIPT: &str = "RRRR DDDD LLUU X RRDD RRDD LLLL UUUU X DDDD RRRR DDDD RRRR";

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    events: Vec<Event>,
    cat: CellCoord,
    mice: Vec<CellCoord>,
}

fn replay(seed: u64) -> ReplayOutcome {
    let config = GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    };
    let mut world = World::new(config).expect("default config is valid");
    let mut controller = Controller::new();
    let mut events = Vec::new();
    world::announce(&world, &mut events);

    for input in parse_script(SCRIPT).expect("valid script") {
        controller.handle(&mut world, input, &mut events);
    }

    ReplayOutcome {
        events,
        cat: query::cat_cell(&world),
        mice: query::mouse_view(&world)
            .into_vec()
            .into_iter()
            .map(|mouse| mouse.cell)
            .collect(),
    }
}

#[test]
fn same_seed_and_script_replay_identically() {
    let first = replay(0x5eed);
    let second = replay(0x5eed);

    assert_eq!(first, second, "replay diverged between runs");
}

#[test]
fn every_reset_in_a_replay_places_distinct_cells() {
    let outcome = replay(77);

    let mut current: Vec<CellCoord> = Vec::new();
    let mut games = 0;
    for event in &outcome.events {
        match event {
            Event::GameReset { .. } => {
                assert_distinct(&current);
                current.clear();
                games += 1;
            }
            Event::CatPlaced { cell }
            | Event::MousePlaced { cell, .. }
            | Event::HousePlaced { cell, .. } => current.push(*cell),
            _ => {}
        }
    }
    assert_distinct(&current);
    assert_eq!(games, 3);
}

#[test]
fn game_over_is_announced_at_most_once_per_game() {
    let outcome = replay(1234);

    let mut over_in_current_game = 0;
    for event in &outcome.events {
        match event {
            Event::GameReset { .. } => over_in_current_game = 0,
            Event::GameOver { .. } => {
                over_in_current_game += 1;
                assert_eq!(over_in_current_game, 1);
            }
            _ => {}
        }
    }
}

fn assert_distinct(cells: &[CellCoord]) {
    let unique: HashSet<_> = cells.iter().copied().collect();
    assert_eq!(unique.len(), cells.len(), "entities share a cell: {cells:?}");
}
