#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Cat Chase.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The status panel is drawn with Macroquad's immediate-mode UI module. All
//! UI-specific calls live inside the local `ui` module.

mod ui;

use self::ui::{draw_status_panel_ui, StatusPanelUiContext, StatusPanelUiResult};
use anyhow::Result;
use cat_chase_core::Direction;
use cat_chase_rendering::{
    Color, FrameInput, GridPresentation, Palette, Presentation, RenderingBackend, Scene,
};
use glam::Vec2;
use macroquad::input::{is_key_pressed, KeyCode};
use macroquad::math::Vec2 as MacroquadVec2;
use std::time::Duration;

/// Height of the status panel drawn beneath the grid, in pixels.
pub const STATUS_PANEL_HEIGHT: f32 = 110.0;

/// Tracks UI-sourced reset requests so they can be merged with keyboard input on the next frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct StatusPanelInputState {
    reset_latched: bool,
}

impl StatusPanelInputState {
    /// Returns whether the panel requested a reset and clears the latch so the
    /// action fires only once.
    pub fn take_reset(&mut self) -> bool {
        let latched = self.reset_latched;
        self.reset_latched = false;
        latched
    }

    /// Records that the panel button requested a reset this frame.
    pub fn register_reset(&mut self) {
        self.reset_latched = true;
    }
}

/// Snapshot of edge-triggered keys observed during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// `R` or `Enter` starts a new game.
    reset_requested: bool,
    /// Arrow key pressed this frame, if any.
    direction: Option<Direction>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let reset_requested = is_key_pressed(KeyCode::R) || is_key_pressed(KeyCode::Enter);
        let direction = first_pressed_direction(|direction| is_key_pressed(key_for(direction)));

        Self {
            quit_requested,
            reset_requested,
            direction,
        }
    }
}

fn key_for(direction: Direction) -> KeyCode {
    match direction {
        Direction::Up => KeyCode::Up,
        Direction::Down => KeyCode::Down,
        Direction::Left => KeyCode::Left,
        Direction::Right => KeyCode::Right,
    }
}

/// Only one direction is forwarded per frame; simultaneous presses resolve in
/// `Direction::ALL` order.
fn first_pressed_direction<P>(mut pressed: P) -> Option<Direction>
where
    P: FnMut(Direction) -> bool,
{
    Direction::ALL
        .into_iter()
        .find(|direction| pressed(*direction))
}

fn frame_input_from_observations(keyboard: KeyboardShortcuts, panel_reset: bool) -> FrameInput {
    FrameInput {
        direction: keyboard.direction,
        reset: keyboard.reset_requested || panel_reset,
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.swap_interval = Some(i32::from(enabled));
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Presentation {
            window_title,
            palette,
            scene,
        } = presentation;

        let (window_width, window_height) = window_size(&scene.grid);
        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = self.swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        log::debug!("opening {window_width}x{window_height} window");

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut panel_input = StatusPanelInputState::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(to_macroquad_color(palette.background));

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = frame_input_from_observations(keyboard, panel_input.take_reset());

                update_scene(frame_dt, frame_input, &mut scene);

                let metrics = SceneMetrics::from_grid(
                    &scene.grid,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                draw_grid_lines(&scene.grid, &metrics, palette.grid_lines);
                draw_houses(&scene, &metrics, &palette);
                draw_mice(&scene, &metrics, palette.mouse);
                draw_cat(&scene, &metrics, palette.cat);

                let lines = scene.status_lines();
                let StatusPanelUiResult { reset_pressed } = {
                    let mut status_panel_ui = macroquad::ui::root_ui();
                    draw_status_panel_ui(
                        &mut status_panel_ui,
                        StatusPanelUiContext {
                            origin: MacroquadVec2::new(0.0, metrics.panel_top),
                            size: MacroquadVec2::new(
                                macroquad::window::screen_width(),
                                STATUS_PANEL_HEIGHT,
                            ),
                            background: to_macroquad_color(palette.background.lighten(0.05)),
                            text: to_macroquad_color(palette.text),
                            lines: &lines,
                            game_over: scene.outcome.is_some(),
                        },
                    )
                };
                if reset_pressed {
                    panel_input.register_reset();
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn window_size(grid: &GridPresentation) -> (i32, i32) {
    let width = grid.width().ceil().max(1.0) as i32;
    let height = (grid.height() + STATUS_PANEL_HEIGHT).ceil() as i32;
    (width, height)
}

/// Screen-space placement of the grid for the current window size.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset: Vec2,
    cell_step: f32,
    panel_top: f32,
}

impl SceneMetrics {
    fn from_grid(grid: &GridPresentation, screen_width: f32, screen_height: f32) -> Self {
        let available_height = (screen_height - STATUS_PANEL_HEIGHT).max(0.0);
        let width = grid.width();
        let height = grid.height();
        let scale = if width <= f32::EPSILON || height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / width).min(available_height / height)
        };

        let offset = Vec2::new(
            ((screen_width - width * scale) * 0.5).max(0.0),
            ((available_height - height * scale) * 0.5).max(0.0),
        );

        Self {
            scale,
            offset,
            cell_step: grid.cell_length * scale,
            panel_top: available_height,
        }
    }

    fn to_screen(&self, grid_position: Vec2) -> Vec2 {
        self.offset + grid_position * self.scale
    }
}

fn draw_grid_lines(grid: &GridPresentation, metrics: &SceneMetrics, color: Color) {
    let color = to_macroquad_color(color);
    let top_left = metrics.to_screen(Vec2::ZERO);
    let bottom_right = metrics.to_screen(Vec2::new(grid.width(), grid.height()));

    for column in 0..=grid.columns {
        let x = top_left.x + column as f32 * metrics.cell_step;
        macroquad::shapes::draw_line(x, top_left.y, x, bottom_right.y, 1.0, color);
    }
    for row in 0..=grid.rows {
        let y = top_left.y + row as f32 * metrics.cell_step;
        macroquad::shapes::draw_line(top_left.x, y, bottom_right.x, y, 1.0, color);
    }
}

fn draw_houses(scene: &Scene, metrics: &SceneMetrics, palette: &Palette) {
    for house in &scene.houses {
        let origin = metrics.to_screen(scene.grid.cell_origin(house.cell));
        let fill = if house.occupied {
            palette.house_lit
        } else {
            palette.house
        };
        let inset = metrics.cell_step * 0.1;
        macroquad::shapes::draw_rectangle(
            origin.x + inset,
            origin.y + inset,
            metrics.cell_step - 2.0 * inset,
            metrics.cell_step - 2.0 * inset,
            to_macroquad_color(fill),
        );
    }
}

fn draw_mice(scene: &Scene, metrics: &SceneMetrics, color: Color) {
    let color = to_macroquad_color(color);
    for mouse in scene.visible_mice() {
        let center = metrics.to_screen(scene.grid.cell_center(mouse.cell));
        macroquad::shapes::draw_circle(center.x, center.y, metrics.cell_step * 0.3, color);
    }
}

fn draw_cat(scene: &Scene, metrics: &SceneMetrics, color: Color) {
    let center = metrics.to_screen(scene.grid.cell_center(scene.cat));
    macroquad::shapes::draw_circle(
        center.x,
        center.y,
        metrics.cell_step * 0.45,
        to_macroquad_color(color),
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cat_chase_core::Grid;

    fn grid(columns: u32, rows: u32) -> GridPresentation {
        GridPresentation::for_grid(Grid::new(columns, rows))
    }

    #[test]
    fn window_fits_grid_and_status_panel() {
        assert_eq!(
            window_size(&grid(40, 20)),
            (800, 400 + STATUS_PANEL_HEIGHT as i32)
        );
    }

    #[test]
    fn metrics_reserve_space_for_status_panel() {
        let metrics = SceneMetrics::from_grid(&grid(40, 20), 800.0, 400.0 + STATUS_PANEL_HEIGHT);

        assert_eq!(metrics.scale, 1.0);
        assert_eq!(metrics.offset, Vec2::ZERO);
        assert_eq!(metrics.panel_top, 400.0);
        assert_eq!(metrics.to_screen(Vec2::new(20.0, 40.0)), Vec2::new(20.0, 40.0));
    }

    #[test]
    fn metrics_center_grid_in_wider_window() {
        let metrics = SceneMetrics::from_grid(&grid(10, 10), 400.0, 200.0 + STATUS_PANEL_HEIGHT);

        assert_eq!(metrics.scale, 1.0);
        assert_eq!(metrics.offset, Vec2::new(100.0, 0.0));
        assert_eq!(metrics.cell_step, 20.0);
    }

    #[test]
    fn simultaneous_arrows_resolve_to_a_single_direction() {
        let pressed = first_pressed_direction(|direction| {
            matches!(direction, Direction::Left | Direction::Down)
        });
        assert_eq!(pressed, Some(Direction::Down));
        assert_eq!(first_pressed_direction(|_| false), None);
    }

    #[test]
    fn panel_button_and_keys_both_request_reset() {
        let idle = KeyboardShortcuts::default();
        assert!(frame_input_from_observations(idle, true).reset);
        assert!(!frame_input_from_observations(idle, false).reset);

        let keyed = KeyboardShortcuts {
            reset_requested: true,
            direction: Some(Direction::Up),
            ..KeyboardShortcuts::default()
        };
        let input = frame_input_from_observations(keyed, false);
        assert!(input.reset);
        assert_eq!(input.direction, Some(Direction::Up));
    }
}
