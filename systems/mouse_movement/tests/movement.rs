use cat_chase_core::{CellCoord, Command, Direction, Event, GameConfig, MouseId, MouseState};
use cat_chase_system_mouse_movement::MouseMovement;
use cat_chase_world::{self as world, query, World};

fn scenario(cat: CellCoord, mice: &[CellCoord], houses: &[CellCoord]) -> World {
    let config = GameConfig {
        seed: Some(1),
        ..GameConfig::default()
    };
    World::from_layout(config, cat, mice, houses).expect("valid layout")
}

fn move_cat(world: &mut World, direction: Direction) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::MoveCat { direction }, &mut events);
    events
}

fn plan(world: &World, movement: &mut MouseMovement, events: &[Event]) -> Vec<Command> {
    let mut commands = Vec::new();
    movement.handle(
        events,
        query::cat_cell(world),
        &query::mouse_view(world),
        &query::house_view(world),
        &mut commands,
    );
    commands
}

fn resolve(world: &mut World) {
    let mut events = Vec::new();
    world::apply(world, Command::ResolveTurn, &mut events);
}

#[test]
fn mice_stay_put_outside_mice_turns() {
    let mut world = scenario(
        CellCoord::new(0, 0),
        &[CellCoord::new(10, 10)],
        &[CellCoord::new(15, 4)],
    );
    let mut movement = MouseMovement::new();

    let events = move_cat(&mut world, Direction::Right);
    assert!(plan(&world, &mut movement, &events).is_empty());
}

#[test]
fn mice_step_diagonally_toward_nearest_vacant_house() {
    let mut world = scenario(
        CellCoord::new(0, 0),
        &[CellCoord::new(10, 10), CellCoord::new(30, 2)],
        &[CellCoord::new(15, 4), CellCoord::new(10, 13), CellCoord::new(33, 2)],
    );
    let mut movement = MouseMovement::new();

    let _ = move_cat(&mut world, Direction::Right);
    resolve(&mut world);
    let events = move_cat(&mut world, Direction::Right);
    let commands = plan(&world, &mut movement, &events);

    assert_eq!(
        commands,
        vec![
            Command::StepMouse {
                mouse: MouseId::new(1),
                to: CellCoord::new(10, 11),
            },
            Command::StepMouse {
                mouse: MouseId::new(2),
                to: CellCoord::new(31, 2),
            },
        ]
    );

    let mut applied = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut applied);
    }
    assert_eq!(
        applied
            .iter()
            .filter(|event| matches!(event, Event::MouseAdvanced { .. }))
            .count(),
        2
    );
}

#[test]
fn both_axes_move_in_the_same_turn() {
    let mut world = scenario(
        CellCoord::new(0, 0),
        &[CellCoord::new(10, 10)],
        &[CellCoord::new(14, 6)],
    );
    let mut movement = MouseMovement::new();

    let _ = move_cat(&mut world, Direction::Right);
    resolve(&mut world);
    let events = move_cat(&mut world, Direction::Right);

    assert_eq!(
        plan(&world, &mut movement, &events),
        vec![Command::StepMouse {
            mouse: MouseId::new(1),
            to: CellCoord::new(11, 9),
        }]
    );
}

#[test]
fn mouse_on_cat_cell_is_left_for_collision_resolution() {
    let mut world = scenario(
        CellCoord::new(4, 4),
        &[CellCoord::new(6, 4)],
        &[CellCoord::new(20, 4)],
    );
    let mut movement = MouseMovement::new();

    let _ = move_cat(&mut world, Direction::Right);
    resolve(&mut world);
    let events = move_cat(&mut world, Direction::Right);

    assert_eq!(query::cat_cell(&world), CellCoord::new(6, 4));
    assert!(plan(&world, &mut movement, &events).is_empty());
}

#[test]
fn mice_hold_position_once_every_house_is_occupied() {
    let mut world = scenario(
        CellCoord::new(0, 0),
        &[CellCoord::new(10, 10), CellCoord::new(30, 15)],
        &[CellCoord::new(11, 11)],
    );
    let mut movement = MouseMovement::new();

    let _ = move_cat(&mut world, Direction::Right);
    resolve(&mut world);
    let events = move_cat(&mut world, Direction::Right);
    let commands = plan(&world, &mut movement, &events);
    let mut applied = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut applied);
    }
    world::apply(&mut world, Command::ResolveTurn, &mut applied);

    let mice = query::mouse_view(&world).into_vec();
    assert_eq!(mice[0].state, MouseState::Sheltered);
    let parked = mice[1].cell;

    let _ = move_cat(&mut world, Direction::Right);
    resolve(&mut world);
    let events = move_cat(&mut world, Direction::Right);

    assert!(plan(&world, &mut movement, &events).is_empty());
    assert_eq!(query::mouse_view(&world).into_vec()[1].cell, parked);
}
