//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use macroquad::{
    color::Color,
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};

/// Outcome of rendering the status panel UI during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct StatusPanelUiResult {
    /// Whether the "Play again" button was pressed during this frame.
    pub(crate) reset_pressed: bool,
}

/// Snapshot of the status panel's layout and contents for the current frame.
#[derive(Clone, Debug)]
pub(crate) struct StatusPanelUiContext<'a> {
    /// Top-left corner of the panel in screen coordinates.
    pub(crate) origin: Vec2,
    /// Panel dimensions in screen space.
    pub(crate) size: Vec2,
    /// Background colour applied to the window skin.
    pub(crate) background: Color,
    /// Text colour used by labels and the button.
    pub(crate) text: Color,
    /// Lines to display, top to bottom.
    pub(crate) lines: &'a [String],
    /// Whether the game has finished and can be restarted from the panel.
    pub(crate) game_over: bool,
}

/// Renders the status panel below the grid.
pub(crate) fn draw_status_panel_ui(
    ui: &mut Ui,
    context: StatusPanelUiContext<'_>,
) -> StatusPanelUiResult {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .color_selected(context.background)
        .color_selected_hovered(context.background)
        .color_inactive(context.background)
        .text_color(context.text)
        .margin(RectOffset::new(12.0, 12.0, 8.0, 8.0))
        .build();
    skin.window_style = window_style;

    let label_style = ui
        .style_builder()
        .text_color(context.text)
        .text_color_hovered(context.text)
        .text_color_clicked(context.text)
        .margin(RectOffset::new(0.0, 0.0, 2.0, 2.0))
        .build();
    skin.label_style = label_style;

    let button_style = ui
        .style_builder()
        .text_color(context.text)
        .text_color_hovered(context.text)
        .text_color_clicked(context.text)
        .color(Color::from_rgba(70, 70, 70, 255))
        .color_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_clicked(Color::from_rgba(56, 56, 56, 255))
        .margin(RectOffset::new(8.0, 8.0, 4.0, 4.0))
        .build();
    skin.button_style = button_style;

    ui.push_skin(&skin);

    let mut reset_pressed = false;
    let _ = ui.window(hash!("status_panel"), context.origin, context.size, |ui| {
        for line in context.lines {
            ui.label(None, line.as_str());
        }
        if context.game_over {
            reset_pressed = ui.button(None, "Play again");
        }
    });

    ui.pop_skin();

    StatusPanelUiResult { reset_pressed }
}
