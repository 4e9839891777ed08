#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Cat Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! renderers to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command batches.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Cat Chase.";

/// Default number of grid columns.
pub const DEFAULT_COLUMNS: u32 = 40;
/// Default number of grid rows.
pub const DEFAULT_ROWS: u32 = 20;
/// Default number of mice placed at the start of a game.
pub const DEFAULT_MICE: u32 = 3;
/// Default number of houses placed at the start of a game.
pub const DEFAULT_HOUSES: u32 = 3;
/// Default number of accepted cat moves between mouse turns.
pub const DEFAULT_MICE_MOVE_INTERVAL: u32 = 2;

/// Discrete input accepted by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Input {
    /// Request a single cat step in the provided direction.
    Move(Direction),
    /// Discard the current game and start a fresh one.
    Reset,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Discards the current game and places every entity anew.
    Reset,
    /// Requests that the cat advance a single step in the specified direction.
    MoveCat {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that a mouse advance toward the provided cell during a mice turn.
    StepMouse {
        /// Identifier of the mouse attempting to move.
        mouse: MouseId,
        /// Cell the mouse wants to occupy after the step.
        to: CellCoord,
    },
    /// Resolves collisions and the terminal condition for the pending turn.
    ResolveTurn,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a fresh game replaced the previous state.
    GameReset {
        /// Grid the new game is played on.
        grid: Grid,
    },
    /// Confirms the cat's starting cell.
    CatPlaced {
        /// Cell the cat occupies.
        cell: CellCoord,
    },
    /// Confirms a mouse's starting cell.
    MousePlaced {
        /// Identifier of the placed mouse.
        mouse: MouseId,
        /// Cell the mouse occupies.
        cell: CellCoord,
    },
    /// Confirms a house's fixed cell.
    HousePlaced {
        /// Identifier of the placed house.
        house: HouseId,
        /// Cell the house occupies.
        cell: CellCoord,
    },
    /// Confirms that the cat successfully moved between two cells.
    CatMoved {
        /// Cell the cat occupied before moving.
        from: CellCoord,
        /// Cell the cat occupies after completing the move.
        to: CellCoord,
        /// Number of accepted cat moves in the current game, including this one.
        move_count: u32,
        /// Whether the mice take a step during this turn.
        mice_turn: bool,
    },
    /// Reports that a cat move was refused without side effects.
    CatMoveRejected {
        /// Direction provided in the rejected request.
        direction: Direction,
        /// Specific reason the move failed.
        reason: MoveRejection,
    },
    /// Confirms that a mouse moved between two cells.
    MouseAdvanced {
        /// Identifier of the mouse that advanced.
        mouse: MouseId,
        /// Cell the mouse occupied before moving.
        from: CellCoord,
        /// Cell the mouse occupies after moving.
        to: CellCoord,
    },
    /// Reports that a mouse step request was refused.
    MouseStepRejected {
        /// Identifier of the mouse named in the request.
        mouse: MouseId,
        /// Destination provided in the rejected request.
        to: CellCoord,
    },
    /// Announces that the cat caught a mouse. The mouse leaves play.
    MouseCaught {
        /// Identifier of the caught mouse.
        mouse: MouseId,
        /// Cell where the catch happened.
        cell: CellCoord,
    },
    /// Announces that a mouse reached an empty house. The mouse leaves play.
    MouseSheltered {
        /// Identifier of the sheltered mouse.
        mouse: MouseId,
        /// House that now shelters the mouse.
        house: HouseId,
        /// Cell of the house.
        cell: CellCoord,
    },
    /// Publishes the updated counters after a change.
    ScoreChanged {
        /// Number of mice caught by the cat.
        caught: u32,
        /// Number of mice sheltered in houses.
        sheltered: u32,
    },
    /// Announces the end of the game. Emitted exactly once per game.
    GameOver {
        /// Classification of the final result.
        outcome: Outcome,
    },
}

/// Cardinal movement directions available to the cat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// All directions in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Unique identifier assigned to a mouse. Mice are numbered from one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MouseId(u32);

impl MouseId {
    /// Creates a new mouse identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a house.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HouseId(u32);

impl HouseId {
    /// Creates a new house identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Computes the Chebyshev distance, the number of king moves between cells.
    #[must_use]
    pub fn chebyshev_distance(self, other: CellCoord) -> u32 {
        self.column()
            .abs_diff(other.column())
            .max(self.row().abs_diff(other.row()))
    }

    /// Returns the cell one unit closer to `target` on each axis that differs.
    ///
    /// Rows and columns move independently, so a mouse may travel diagonally.
    #[must_use]
    pub fn step_toward(self, target: CellCoord) -> CellCoord {
        CellCoord::new(
            approach(self.column, target.column),
            approach(self.row, target.row),
        )
    }
}

fn approach(from: u32, to: u32) -> u32 {
    match from.cmp(&to) {
        Ordering::Less => from + 1,
        Ordering::Greater => from - 1,
        Ordering::Equal => from,
    }
}

/// Fixed-size discrete coordinate space the game is played on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    columns: u32,
    rows: u32,
}

impl Grid {
    /// Creates a grid description with the provided dimensions.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub const fn capacity(&self) -> u64 {
        self.columns as u64 * self.rows as u64
    }

    /// Reports whether the cell lies inside the grid bounds.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Applies a single step in `direction` and clamps the result to the grid.
    ///
    /// A step against the boundary yields the starting cell.
    #[must_use]
    pub fn step(&self, cell: CellCoord, direction: Direction) -> CellCoord {
        let column = cell.column();
        let row = cell.row();
        let (column, row) = match direction {
            Direction::Up => (column, row.saturating_sub(1)),
            Direction::Down => (column, row.saturating_add(1)),
            Direction::Left => (column.saturating_sub(1), row),
            Direction::Right => (column.saturating_add(1), row),
        };
        self.clamp(CellCoord::new(column, row))
    }

    /// Clamps the cell to the nearest in-bounds cell.
    #[must_use]
    pub fn clamp(&self, cell: CellCoord) -> CellCoord {
        CellCoord::new(
            cell.column().min(self.columns.saturating_sub(1)),
            cell.row().min(self.rows.saturating_sub(1)),
        )
    }

    /// Iterates every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| {
            (0..columns).map(move |column| CellCoord::new(column, row))
        })
    }
}

/// Lifecycle of a mouse. `Caught` and `Sheltered` are terminal and mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseState {
    /// The mouse is still in play.
    Active,
    /// The cat caught the mouse.
    Caught,
    /// The mouse reached an empty house.
    Sheltered,
}

impl MouseState {
    /// Reports whether the mouse still participates in movement and collisions.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Classification of a finished game from the cat's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Every mouse was caught.
    Win,
    /// Every mouse reached a house.
    Lose,
    /// Some mice were caught and the rest were sheltered.
    Partial,
}

impl Outcome {
    /// Classifies the counters, returning `None` while mice remain in play.
    #[must_use]
    pub fn classify(caught: u32, sheltered: u32, total: u32) -> Option<Self> {
        if caught.saturating_add(sheltered) != total {
            return None;
        }

        if sheltered == total {
            Some(Self::Lose)
        } else if caught == total {
            Some(Self::Win)
        } else {
            Some(Self::Partial)
        }
    }
}

/// Reasons a cat move request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The game already ended; moves are ignored until reset.
    GameOver,
    /// The step would leave the grid, so the clamped target equals the current cell.
    Boundary,
    /// The target cell holds a house. Houses always block the cat.
    House,
    /// The previous turn has not been resolved yet.
    TurnInProgress,
}

/// Running counters for the active game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Score {
    /// Number of mice caught by the cat.
    pub caught: u32,
    /// Number of mice sheltered in houses.
    pub sheltered: u32,
    /// Number of mice placed at the start of the game.
    pub total: u32,
}

impl Score {
    /// Number of mice still in play.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.total
            .saturating_sub(self.caught.saturating_add(self.sheltered))
    }
}

/// Immutable representation of a single mouse's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseSnapshot {
    /// Unique identifier assigned to the mouse.
    pub id: MouseId,
    /// Grid cell currently occupied by the mouse.
    pub cell: CellCoord,
    /// Lifecycle state of the mouse.
    pub state: MouseState,
}

/// Read-only snapshot describing all mice in the game.
#[derive(Clone, Debug, Default)]
pub struct MouseView {
    snapshots: Vec<MouseSnapshot>,
}

impl MouseView {
    /// Creates a new mouse view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<MouseSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured mouse snapshots in id order.
    pub fn iter(&self) -> impl Iterator<Item = &MouseSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<MouseSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single house's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HouseSnapshot {
    /// Identifier allocated to the house.
    pub id: HouseId,
    /// Fixed cell of the house.
    pub cell: CellCoord,
    /// Mouse sheltered by the house, if any. Set once.
    pub occupant: Option<MouseId>,
}

/// Read-only snapshot describing all houses, kept in placement order.
#[derive(Clone, Debug, Default)]
pub struct HouseView {
    snapshots: Vec<HouseSnapshot>,
}

impl HouseView {
    /// Creates a new house view from the provided snapshots.
    ///
    /// Order is preserved because nearest-house ties resolve by list order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<HouseSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured house snapshots in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &HouseSnapshot> {
        self.snapshots.iter()
    }

    /// Iterator over houses that can still shelter a mouse.
    pub fn vacant(&self) -> impl Iterator<Item = &HouseSnapshot> {
        self.snapshots
            .iter()
            .filter(|house| house.occupant.is_none())
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<HouseSnapshot> {
        self.snapshots
    }
}

/// Tunable parameters of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows.
    pub rows: u32,
    /// Number of mice placed per game.
    pub mice: u32,
    /// Number of houses placed per game.
    pub houses: u32,
    /// Accepted cat moves between mouse turns.
    pub mice_move_interval: u32,
    /// Seed for placement randomness. Absent means seeded from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            mice: DEFAULT_MICE,
            houses: DEFAULT_HOUSES,
            mice_move_interval: DEFAULT_MICE_MOVE_INTERVAL,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Grid described by the configuration.
    #[must_use]
    pub const fn grid(&self) -> Grid {
        Grid::new(self.columns, self.rows)
    }

    /// Number of entities placed per game: one cat plus every mouse and house.
    #[must_use]
    pub const fn entity_count(&self) -> u64 {
        1 + self.mice as u64 + self.houses as u64
    }

    /// Checks the preconditions placement and turn resolution rely on.
    ///
    /// The grid must hold strictly more cells than entities so placement
    /// always finds a free cell.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.mice == 0 {
            return Err(ConfigError::NoMice);
        }
        if self.mice_move_interval == 0 {
            return Err(ConfigError::ZeroMoveInterval);
        }

        let capacity = self.grid().capacity();
        let entities = self.entity_count();
        if capacity <= entities {
            return Err(ConfigError::InsufficientCapacity { capacity, entities });
        }

        Ok(())
    }
}

/// Reasons a [`GameConfig`] cannot start a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// One of the grid dimensions is zero.
    #[error("grid must have at least one column and one row (got {columns}x{rows})")]
    EmptyGrid {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// A game needs at least one mouse to ever end.
    #[error("at least one mouse is required")]
    NoMice,
    /// Mice must move on some cadence.
    #[error("mice_move_interval must be positive")]
    ZeroMoveInterval,
    /// The grid cannot hold every entity with a cell to spare.
    #[error("grid capacity {capacity} must exceed the {entities} placed entities")]
    InsufficientCapacity {
        /// Number of cells in the grid.
        capacity: u64,
        /// Number of entities requiring a distinct cell.
        entities: u64,
    },
    /// A supplied layout places an entity outside the grid.
    #[error("cell ({column}, {row}) lies outside the grid")]
    OutOfBounds {
        /// Column of the offending cell.
        column: u32,
        /// Row of the offending cell.
        row: u32,
    },
    /// A supplied layout places two entities on the same cell.
    #[error("cell ({column}, {row}) holds more than one entity")]
    Overlap {
        /// Column of the offending cell.
        column: u32,
        /// Row of the offending cell.
        row: u32,
    },
}
