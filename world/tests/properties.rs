use std::collections::HashSet;

use cat_chase_core::{CellCoord, Command, Direction, Event, GameConfig, MoveRejection};
use cat_chase_world::{self as world, query, World};
use proptest::prelude::*;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn seeded(seed: u64) -> World {
    World::new(GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    })
    .expect("default config is valid")
}

fn occupied_cells(world: &World) -> Vec<CellCoord> {
    let mut cells = vec![query::cat_cell(world)];
    cells.extend(query::mouse_view(world).iter().map(|mouse| mouse.cell));
    cells.extend(query::house_view(world).iter().map(|house| house.cell));
    cells
}

proptest! {
    #[test]
    fn cat_moves_exactly_one_unit_on_one_axis_or_not_at_all(
        seed in any::<u64>(),
        moves in prop::collection::vec(direction(), 1..80),
    ) {
        let mut world = seeded(seed);

        for direction in moves {
            let before = query::cat_cell(&world);
            let mut events = Vec::new();
            world::apply(&mut world, Command::MoveCat { direction }, &mut events);
            world::apply(&mut world, Command::ResolveTurn, &mut events);
            let after = query::cat_cell(&world);

            let column_delta = before.column().abs_diff(after.column());
            let row_delta = before.row().abs_diff(after.row());
            prop_assert!(
                (column_delta, row_delta) == (0, 0)
                    || (column_delta, row_delta) == (1, 0)
                    || (column_delta, row_delta) == (0, 1)
            );
            prop_assert!(query::grid(&world).contains(after));
            prop_assert!(!query::is_house(&world, after));

            let rejected_for_house = events.iter().any(|event| matches!(
                event,
                Event::CatMoveRejected { reason: MoveRejection::House, .. }
            ));
            if rejected_for_house {
                prop_assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn placement_never_stacks_entities_across_resets(
        seed in any::<u64>(),
        resets in 1usize..8,
    ) {
        let mut world = seeded(seed);

        for _ in 0..resets {
            let cells = occupied_cells(&world);
            let unique: HashSet<_> = cells.iter().copied().collect();
            prop_assert_eq!(unique.len(), cells.len());
            prop_assert!(cells.iter().all(|cell| query::grid(&world).contains(*cell)));

            let mut events = Vec::new();
            world::apply(&mut world, Command::Reset, &mut events);
        }
    }
}

#[test]
fn crowded_configuration_still_places_every_entity() {
    let world = World::new(GameConfig {
        columns: 3,
        rows: 3,
        mice: 4,
        houses: 3,
        seed: Some(3),
        ..GameConfig::default()
    })
    .expect("nine cells hold eight entities");

    let cells = occupied_cells(&world);
    let unique: HashSet<_> = cells.iter().copied().collect();
    assert_eq!(unique.len(), 8);
}

#[test]
fn same_seed_replays_identical_layouts() {
    let first = seeded(42);
    let second = seeded(42);

    assert_eq!(occupied_cells(&first), occupied_cells(&second));
}

#[test]
fn announce_describes_the_current_game() {
    let world = seeded(9);
    let mut events = Vec::new();
    world::announce(&world, &mut events);

    assert!(matches!(events.first(), Some(Event::GameReset { .. })));
    assert!(events.contains(&Event::CatPlaced {
        cell: query::cat_cell(&world)
    }));
    let placed_mice = events
        .iter()
        .filter(|event| matches!(event, Event::MousePlaced { .. }))
        .count();
    let placed_houses = events
        .iter()
        .filter(|event| matches!(event, Event::HousePlaced { .. }))
        .count();
    assert_eq!(placed_mice, 3);
    assert_eq!(placed_houses, 3);
}
