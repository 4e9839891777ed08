#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session scoreboard that tallies finished games from the world's event stream.

use cat_chase_core::{Event, Outcome};

/// Aggregated results across every game observed in a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    /// Number of games that were started, including the one in progress.
    pub games_started: u32,
    /// Games in which every mouse was caught.
    pub wins: u32,
    /// Games in which every mouse reached a house.
    pub losses: u32,
    /// Games that ended with a mix of caught and sheltered mice.
    pub partials: u32,
    /// Accepted cat moves in the current game.
    pub moves_this_game: u32,
    /// Accepted cat moves across every observed game.
    pub total_moves: u32,
}

impl Tally {
    /// Number of games that reached a terminal outcome.
    #[must_use]
    pub const fn games_finished(&self) -> u32 {
        self.wins + self.losses + self.partials
    }
}

/// Pure system that folds world events into a [`Tally`].
#[derive(Debug, Default)]
pub struct Scoreboard {
    tally: Tally,
    last_outcome: Option<Outcome>,
}

impl Scoreboard {
    /// Creates an empty scoreboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current tallies.
    #[must_use]
    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Outcome of the most recently finished game, cleared when a new game starts.
    #[must_use]
    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// Consumes world events and updates the tallies.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::GameReset { .. } => {
                    self.tally.games_started += 1;
                    self.tally.moves_this_game = 0;
                    self.last_outcome = None;
                }
                Event::CatMoved { move_count, .. } => {
                    self.tally.total_moves += 1;
                    self.tally.moves_this_game = *move_count;
                }
                Event::GameOver { outcome } => {
                    match outcome {
                        Outcome::Win => self.tally.wins += 1,
                        Outcome::Lose => self.tally.losses += 1,
                        Outcome::Partial => self.tally.partials += 1,
                    }
                    self.last_outcome = Some(*outcome);
                    log::info!(
                        "game {} finished: {:?} after {} moves",
                        self.tally.games_started,
                        outcome,
                        self.tally.moves_this_game
                    );
                }
                _ => {}
            }
        }
    }
}
