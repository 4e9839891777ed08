#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Cat Chase adapters.

use anyhow::Result as AnyResult;
use cat_chase_core::{
    CellCoord, Direction, Grid, HouseId, HouseView, Input, MouseId, MouseView, Outcome, Score,
};
use glam::Vec2;
use std::time::Duration;

/// Default side length of a single grid cell in pixels.
pub const CELL_SIZE: f32 = 20.0;

/// Prompt shown while a finished game waits for a reset.
pub const RESET_PROMPT: &str = "Press R or Enter to play again";

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Colors used to draw each kind of scene element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Background behind the grid.
    pub background: Color,
    /// Grid line color.
    pub grid_lines: Color,
    /// Fill used for the cat.
    pub cat: Color,
    /// Fill used for visible mice.
    pub mouse: Color,
    /// Fill used for vacant houses.
    pub house: Color,
    /// Fill used for occupied houses.
    pub house_lit: Color,
    /// Status panel text.
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        let house = Color::from_rgb_u8(0x8b, 0x5a, 0x2b);
        Self {
            background: Color::from_rgb_u8(0x1e, 0x1e, 0x24),
            grid_lines: Color::from_rgb_u8(0x3a, 0x3a, 0x44),
            cat: Color::from_rgb_u8(0xf2, 0x8c, 0x28),
            mouse: Color::from_rgb_u8(0xb0, 0xb0, 0xb8),
            house,
            house_lit: Color::from_rgb_u8(0xf5, 0xd7, 0x42).lighten(0.2),
            text: Color::from_rgb_u8(0xee, 0xee, 0xee),
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Direction pressed on this frame, if any.
    pub direction: Option<Direction>,
    /// Whether a reset was requested on this frame.
    pub reset: bool,
}

impl FrameInput {
    /// Converts the frame snapshot into at most one controller input.
    ///
    /// A reset request wins over a simultaneous direction press.
    #[must_use]
    pub fn to_input(self) -> Option<Input> {
        if self.reset {
            return Some(Input::Reset);
        }
        self.direction.map(Input::Move)
    }
}

/// Describes the cell grid that composes the play area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single cell in pixels.
    pub cell_length: f32,
}

impl GridPresentation {
    /// Creates a descriptor for `grid` using [`CELL_SIZE`].
    #[must_use]
    pub const fn for_grid(grid: Grid) -> Self {
        Self {
            columns: grid.columns(),
            rows: grid.rows(),
            cell_length: CELL_SIZE,
        }
    }

    /// Calculates the total width of the grid.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Calculates the total height of the grid.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }

    /// Top-left corner of `cell` in pixels.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(cell.column() as f32, cell.row() as f32) * self.cell_length
    }

    /// Center of `cell` in pixels.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        self.cell_origin(cell) + Vec2::splat(self.cell_length * 0.5)
    }
}

/// Mouse as drawn by adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MousePresentation {
    /// Identifier allocated to the mouse.
    pub id: MouseId,
    /// Cell the mouse occupies.
    pub cell: CellCoord,
    /// Caught and sheltered mice are hidden.
    pub visible: bool,
}

/// House as drawn by adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HousePresentation {
    /// Identifier allocated to the house.
    pub id: HouseId,
    /// Fixed cell of the house.
    pub cell: CellCoord,
    /// Occupied houses are drawn with their lights on.
    pub occupied: bool,
}

/// Scene description combining the grid and its inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Grid that composes the play area.
    pub grid: GridPresentation,
    /// Cell the cat occupies.
    pub cat: CellCoord,
    /// Mice in id order.
    pub mice: Vec<MousePresentation>,
    /// Houses in placement order.
    pub houses: Vec<HousePresentation>,
    /// Running counters of the active game.
    pub score: Score,
    /// Outcome once the game has finished.
    pub outcome: Option<Outcome>,
}

impl Scene {
    /// Builds a scene from world snapshots.
    #[must_use]
    pub fn from_snapshots(
        grid: Grid,
        cat: CellCoord,
        mice: &MouseView,
        houses: &HouseView,
        score: Score,
        outcome: Option<Outcome>,
    ) -> Self {
        Self {
            grid: GridPresentation::for_grid(grid),
            cat,
            mice: mice
                .iter()
                .map(|mouse| MousePresentation {
                    id: mouse.id,
                    cell: mouse.cell,
                    visible: mouse.state.is_active(),
                })
                .collect(),
            houses: houses
                .iter()
                .map(|house| HousePresentation {
                    id: house.id,
                    cell: house.cell,
                    occupied: house.occupant.is_some(),
                })
                .collect(),
            score,
            outcome,
        }
    }

    /// Iterator over the mice that should be drawn.
    pub fn visible_mice(&self) -> impl Iterator<Item = &MousePresentation> {
        self.mice.iter().filter(|mouse| mouse.visible)
    }

    /// Text lines for the status panel below the grid.
    #[must_use]
    pub fn status_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Mice caught: {}", self.score.caught),
            format!("Mice safe: {}", self.score.sheltered),
        ];
        if let Some(outcome) = self.outcome {
            lines.push(outcome_message(outcome).to_owned());
            lines.push(RESET_PROMPT.to_owned());
        }
        lines
    }
}

/// Terminal message displayed for a finished game.
#[must_use]
pub const fn outcome_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Lose => "All mice are safe! You lose.",
        Outcome::Win => "You caught all the mice! You win!",
        Outcome::Partial => "Game over! A valiant effort.",
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Colors used to draw the scene.
    pub palette: Palette,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, palette: Palette, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            palette,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Cat Chase scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and may mutate the scene before it is
    /// rendered. Quit requests are handled by the backend itself.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}
