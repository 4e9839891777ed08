use cat_chase_core::{CellCoord, Direction, Event, GameConfig, Input, Outcome};
use cat_chase_system_controller::Controller;
use cat_chase_system_scoreboard::{Scoreboard, Tally};
use cat_chase_world::{self as world, World};

fn quick_win() -> World {
    let config = GameConfig {
        seed: Some(9),
        ..GameConfig::default()
    };
    World::from_layout(
        config,
        CellCoord::new(5, 5),
        &[CellCoord::new(6, 5)],
        &[CellCoord::new(30, 15)],
    )
    .expect("valid layout")
}

#[test]
fn scoreboard_follows_a_session() {
    let mut world = quick_win();
    let mut controller = Controller::new();
    let mut scoreboard = Scoreboard::new();

    let mut events = Vec::new();
    world::announce(&world, &mut events);
    controller.handle(&mut world, Input::Move(Direction::Right), &mut events);
    scoreboard.handle(&events);

    assert_eq!(scoreboard.last_outcome(), Some(Outcome::Win));
    assert_eq!(
        scoreboard.tally(),
        Tally {
            games_started: 1,
            wins: 1,
            losses: 0,
            partials: 0,
            moves_this_game: 1,
            total_moves: 1,
        }
    );

    let mut events = Vec::new();
    controller.handle(&mut world, Input::Move(Direction::Right), &mut events);
    controller.handle(&mut world, Input::Reset, &mut events);
    scoreboard.handle(&events);

    assert!(events
        .iter()
        .all(|event| !matches!(event, Event::CatMoved { .. })));
    let tally = scoreboard.tally();
    assert_eq!(tally.games_started, 2);
    assert_eq!(tally.games_finished(), 1);
    assert_eq!(tally.moves_this_game, 0);
    assert_eq!(scoreboard.last_outcome(), None);
}
