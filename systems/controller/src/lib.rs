#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Input controller that turns player intents into fully resolved turns.
//!
//! Every [`Input`] is processed to completion before [`Controller::handle`]
//! returns: the cat move is submitted, mice step when the world opened a mice
//! turn, and collisions plus the terminal check run last. Callers therefore
//! never observe a half-resolved turn.

use cat_chase_core::{Command, Direction, Event, Input};
use cat_chase_system_mouse_movement::MouseMovement;
use cat_chase_world::{self as world, query, World};
use thiserror::Error;

/// Drives the world one input at a time.
#[derive(Debug, Default)]
pub struct Controller {
    movement: MouseMovement,
    commands: Vec<Command>,
}

impl Controller {
    /// Creates a controller with its own mouse movement system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a single input and appends every resulting event.
    pub fn handle(&mut self, world: &mut World, input: Input, out_events: &mut Vec<Event>) {
        log::trace!("input {input:?}");
        match input {
            Input::Reset => world::apply(world, Command::Reset, out_events),
            Input::Move(direction) => self.play_turn(world, direction, out_events),
        }
    }

    fn play_turn(&mut self, world: &mut World, direction: Direction, out_events: &mut Vec<Event>) {
        let start = out_events.len();
        world::apply(world, Command::MoveCat { direction }, out_events);

        let accepted = out_events[start..]
            .iter()
            .any(|event| matches!(event, Event::CatMoved { .. }));
        if !accepted {
            return;
        }

        self.commands.clear();
        self.movement.handle(
            &out_events[start..],
            query::cat_cell(world),
            &query::mouse_view(world),
            &query::house_view(world),
            &mut self.commands,
        );
        for command in self.commands.drain(..) {
            world::apply(world, command, out_events);
        }

        world::apply(world, Command::ResolveTurn, out_events);
    }
}

/// Parses a compact move script into inputs.
///
/// `U`, `D`, `L` and `R` (any case) move the cat, `X` resets the game.
/// Whitespace and commas are ignored so scripts can be grouped for reading.
pub fn parse_script(script: &str) -> Result<Vec<Input>, ScriptError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, symbol)| !symbol.is_whitespace() && *symbol != ',')
        .map(|(position, symbol)| match symbol.to_ascii_uppercase() {
            'U' => Ok(Input::Move(Direction::Up)),
            'D' => Ok(Input::Move(Direction::Down)),
            'L' => Ok(Input::Move(Direction::Left)),
            'R' => Ok(Input::Move(Direction::Right)),
            'X' => Ok(Input::Reset),
            _ => Err(ScriptError::UnknownSymbol { symbol, position }),
        })
        .collect()
}

/// Errors reported while parsing a move script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The script contains a character that names no input.
    #[error("unknown move '{symbol}' at position {position}")]
    UnknownSymbol {
        /// Offending character.
        symbol: char,
        /// Zero-based character index within the script.
        position: usize,
    },
}
