#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Cat Chase.

mod placement;

use cat_chase_core::{
    CellCoord, Command, ConfigError, Direction, Event, GameConfig, HouseId, MouseId, MouseState,
    MoveRejection, Outcome, WELCOME_BANNER,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use self::placement::{generate_layout, Layout};

/// Represents the authoritative Cat Chase game state.
///
/// A world owns exactly one game at a time. [`Command::Reset`] discards it and
/// places a fresh one using the same configuration and random stream.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    rng: ChaCha8Rng,
    cat: CellCoord,
    mice: Vec<Mouse>,
    houses: Vec<House>,
    caught: u32,
    sheltered: u32,
    move_count: u32,
    outcome: Option<Outcome>,
    turn: Option<PendingTurn>,
}

impl World {
    /// Creates a new world and places the first game.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = seeded_rng(&config);
        let layout = generate_layout(&mut rng, config.grid(), config.mice, config.houses)
            .ok_or(ConfigError::InsufficientCapacity {
                capacity: config.grid().capacity(),
                entities: config.entity_count(),
            })?;

        let mut world = Self::empty(config, rng);
        world.install(layout);
        world.log_new_game();
        Ok(world)
    }

    /// Creates a world whose first game uses the provided starting cells.
    ///
    /// Mouse and house counts are taken from the slices. Later resets place
    /// entities randomly as usual.
    #[cfg(any(test, feature = "scenario"))]
    pub fn from_layout(
        config: GameConfig,
        cat: CellCoord,
        mice: &[CellCoord],
        houses: &[CellCoord],
    ) -> Result<Self, ConfigError> {
        let config = GameConfig {
            mice: u32::try_from(mice.len()).unwrap_or(u32::MAX),
            houses: u32::try_from(houses.len()).unwrap_or(u32::MAX),
            ..config
        };
        config.validate()?;

        let grid = config.grid();
        let mut seen = std::collections::HashSet::new();
        for cell in std::iter::once(&cat).chain(mice).chain(houses) {
            if !grid.contains(*cell) {
                return Err(ConfigError::OutOfBounds {
                    column: cell.column(),
                    row: cell.row(),
                });
            }
            if !seen.insert(*cell) {
                return Err(ConfigError::Overlap {
                    column: cell.column(),
                    row: cell.row(),
                });
            }
        }

        let rng = seeded_rng(&config);
        let mut world = Self::empty(config, rng);
        world.install(Layout {
            cat,
            mice: mice.to_vec(),
            houses: houses.to_vec(),
        });
        world.log_new_game();
        Ok(world)
    }

    fn empty(config: GameConfig, rng: ChaCha8Rng) -> Self {
        Self {
            banner: WELCOME_BANNER,
            config,
            rng,
            cat: CellCoord::new(0, 0),
            mice: Vec::new(),
            houses: Vec::new(),
            caught: 0,
            sheltered: 0,
            move_count: 0,
            outcome: None,
            turn: None,
        }
    }

    fn install(&mut self, layout: Layout) {
        self.cat = layout.cat;
        self.mice = layout
            .mice
            .into_iter()
            .zip(1..)
            .map(|(cell, id)| Mouse {
                id: MouseId::new(id),
                cell,
                state: MouseState::Active,
            })
            .collect();
        self.houses = layout
            .houses
            .into_iter()
            .zip(0..)
            .map(|(cell, id)| House {
                id: HouseId::new(id),
                cell,
                occupant: None,
            })
            .collect();
        self.caught = 0;
        self.sheltered = 0;
        self.move_count = 0;
        self.outcome = None;
        self.turn = None;
    }

    fn total_mice(&self) -> u32 {
        u32::try_from(self.mice.len()).unwrap_or(u32::MAX)
    }

    fn is_house(&self, cell: CellCoord) -> bool {
        self.houses.iter().any(|house| house.cell == cell)
    }

    fn announce_layout(&self, out_events: &mut Vec<Event>) {
        out_events.push(Event::GameReset {
            grid: self.config.grid(),
        });
        out_events.push(Event::CatPlaced { cell: self.cat });
        for mouse in &self.mice {
            out_events.push(Event::MousePlaced {
                mouse: mouse.id,
                cell: mouse.cell,
            });
        }
        for house in &self.houses {
            out_events.push(Event::HousePlaced {
                house: house.id,
                cell: house.cell,
            });
        }
        out_events.push(Event::ScoreChanged {
            caught: self.caught,
            sheltered: self.sheltered,
        });
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        let Some(layout) = generate_layout(
            &mut self.rng,
            self.config.grid(),
            self.config.mice,
            self.config.houses,
        ) else {
            log::error!("reset skipped: grid has no room for a fresh layout");
            return;
        };

        self.install(layout);
        self.log_new_game();
        self.announce_layout(out_events);
    }

    fn log_new_game(&self) {
        log::info!(
            "new game: cat at {:?}, {} mice, {} houses",
            self.cat,
            self.mice.len(),
            self.houses.len()
        );
    }

    fn move_cat(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let from = self.cat;
        let verdict = if self.outcome.is_some() {
            Err(MoveRejection::GameOver)
        } else if self.turn.is_some() {
            Err(MoveRejection::TurnInProgress)
        } else {
            let to = self.config.grid().step(from, direction);
            if to == from {
                Err(MoveRejection::Boundary)
            } else if self.is_house(to) {
                Err(MoveRejection::House)
            } else {
                Ok(to)
            }
        };

        let to = match verdict {
            Ok(to) => to,
            Err(reason) => {
                log::debug!("cat move {direction:?} rejected: {reason:?}");
                out_events.push(Event::CatMoveRejected { direction, reason });
                return;
            }
        };

        self.cat = to;
        self.move_count = self.move_count.saturating_add(1);
        let mice_turn = self.move_count % self.config.mice_move_interval == 0;
        self.turn = Some(PendingTurn {
            mice_turn,
            stepped: Vec::new(),
        });
        log::debug!(
            "cat moved {direction:?} to {to:?} (move {}, mice turn: {mice_turn})",
            self.move_count
        );
        out_events.push(Event::CatMoved {
            from,
            to,
            move_count: self.move_count,
            mice_turn,
        });
    }

    fn step_mouse(&mut self, mouse_id: MouseId, to: CellCoord, out_events: &mut Vec<Event>) {
        let grid = self.config.grid();
        let cat = self.cat;
        let mouse = self.mice.iter_mut().find(|mouse| mouse.id == mouse_id);
        let accepted = match (self.turn.as_mut(), mouse) {
            (Some(turn), Some(mouse))
                if turn.mice_turn
                    && mouse.state.is_active()
                    && mouse.cell != cat
                    && !turn.stepped.contains(&mouse_id)
                    && grid.contains(to)
                    && mouse.cell.chebyshev_distance(to) == 1 =>
            {
                let from = mouse.cell;
                mouse.cell = to;
                turn.stepped.push(mouse_id);
                Some(from)
            }
            _ => None,
        };

        match accepted {
            Some(from) => {
                log::debug!("mouse {} stepped to {to:?}", mouse_id.get());
                out_events.push(Event::MouseAdvanced {
                    mouse: mouse_id,
                    from,
                    to,
                });
            }
            None => {
                log::debug!("mouse {} step to {to:?} rejected", mouse_id.get());
                out_events.push(Event::MouseStepRejected {
                    mouse: mouse_id,
                    to,
                });
            }
        }
    }

    fn resolve_turn(&mut self, out_events: &mut Vec<Event>) {
        if self.turn.take().is_none() {
            log::debug!("resolve requested without a pending turn");
            return;
        }

        let score_before = (self.caught, self.sheltered);

        for mouse in self.mice.iter_mut() {
            if mouse.state.is_active() && mouse.cell == self.cat {
                mouse.state = MouseState::Caught;
                self.caught += 1;
                log::info!("cat caught mouse {} at {:?}", mouse.id.get(), mouse.cell);
                out_events.push(Event::MouseCaught {
                    mouse: mouse.id,
                    cell: mouse.cell,
                });
            }
        }

        for mouse in self.mice.iter_mut() {
            if !mouse.state.is_active() {
                continue;
            }

            let Some(house) = self
                .houses
                .iter_mut()
                .find(|house| house.occupant.is_none() && house.cell == mouse.cell)
            else {
                continue;
            };

            house.occupant = Some(mouse.id);
            mouse.state = MouseState::Sheltered;
            self.sheltered += 1;
            log::info!(
                "mouse {} sheltered in house {}",
                mouse.id.get(),
                house.id.get()
            );
            out_events.push(Event::MouseSheltered {
                mouse: mouse.id,
                house: house.id,
                cell: house.cell,
            });
        }

        if (self.caught, self.sheltered) != score_before {
            out_events.push(Event::ScoreChanged {
                caught: self.caught,
                sheltered: self.sheltered,
            });
        }

        self.check_game_over(out_events);
    }

    fn check_game_over(&mut self, out_events: &mut Vec<Event>) {
        if self.outcome.is_some() {
            return;
        }

        if let Some(outcome) = Outcome::classify(self.caught, self.sheltered, self.total_mice()) {
            self.outcome = Some(outcome);
            log::info!(
                "game over after {} moves: {outcome:?} ({} caught, {} sheltered)",
                self.move_count,
                self.caught,
                self.sheltered
            );
            out_events.push(Event::GameOver { outcome });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Reset => world.reset(out_events),
        Command::MoveCat { direction } => world.move_cat(direction, out_events),
        Command::StepMouse { mouse, to } => world.step_mouse(mouse, to, out_events),
        Command::ResolveTurn => world.resolve_turn(out_events),
    }
}

/// Emits the placement events describing the current game without mutating it.
///
/// Adapters call this once after construction so renderers observe the first
/// game the same way they observe later resets.
pub fn announce(world: &World, out_events: &mut Vec<Event>) {
    world.announce_layout(out_events);
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use cat_chase_core::{
        CellCoord, GameConfig, Grid, HouseSnapshot, HouseView, MouseSnapshot, MouseView, Outcome,
        Score,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides the configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Provides the grid the current game is played on.
    #[must_use]
    pub fn grid(world: &World) -> Grid {
        world.config.grid()
    }

    /// Cell currently occupied by the cat.
    #[must_use]
    pub fn cat_cell(world: &World) -> CellCoord {
        world.cat
    }

    /// Captures a read-only view of every mouse, resolved ones included.
    #[must_use]
    pub fn mouse_view(world: &World) -> MouseView {
        MouseView::from_snapshots(
            world
                .mice
                .iter()
                .map(|mouse| MouseSnapshot {
                    id: mouse.id,
                    cell: mouse.cell,
                    state: mouse.state,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of every house in placement order.
    #[must_use]
    pub fn house_view(world: &World) -> HouseView {
        HouseView::from_snapshots(
            world
                .houses
                .iter()
                .map(|house| HouseSnapshot {
                    id: house.id,
                    cell: house.cell,
                    occupant: house.occupant,
                })
                .collect(),
        )
    }

    /// Reports the running counters of the current game.
    #[must_use]
    pub fn score(world: &World) -> Score {
        Score {
            caught: world.caught,
            sheltered: world.sheltered,
            total: world.total_mice(),
        }
    }

    /// Number of accepted cat moves in the current game.
    #[must_use]
    pub fn move_count(world: &World) -> u32 {
        world.move_count
    }

    /// Final classification once the game has ended.
    #[must_use]
    pub fn outcome(world: &World) -> Option<Outcome> {
        world.outcome
    }

    /// Reports whether the game has ended and moves are ignored.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.outcome.is_some()
    }

    /// Reports whether an accepted cat move awaits resolution.
    #[must_use]
    pub fn turn_pending(world: &World) -> bool {
        world.turn.is_some()
    }

    /// Reports whether the pending turn lets mice step.
    #[must_use]
    pub fn is_mice_turn(world: &World) -> bool {
        world.turn.as_ref().is_some_and(|turn| turn.mice_turn)
    }

    /// Reports whether a house stands on the provided cell.
    #[must_use]
    pub fn is_house(world: &World, cell: CellCoord) -> bool {
        world.is_house(cell)
    }
}

#[derive(Clone, Debug)]
struct Mouse {
    id: MouseId,
    cell: CellCoord,
    state: MouseState,
}

#[derive(Clone, Debug)]
struct House {
    id: HouseId,
    cell: CellCoord,
    occupant: Option<MouseId>,
}

#[derive(Clone, Debug)]
struct PendingTurn {
    mice_turn: bool,
    stepped: Vec<MouseId>,
}

fn seeded_rng(config: &GameConfig) -> ChaCha8Rng {
    match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
