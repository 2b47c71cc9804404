//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};
use park_core::Tool;

/// Label shown on the button that resets every tile.
pub(crate) const CLEAR_ALL_LABEL: &str = "Clear All Tiles";

/// Outcome of rendering the control panel UI for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ControlPanelUiResult {
    /// Tool whose button was pressed during this frame.
    pub(crate) selected_tool: Option<Tool>,
    /// Whether the clear-all button was pressed during this frame.
    pub(crate) clear_all: bool,
}

/// Snapshot of the control panel's UI layout and data for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ControlPanelUiContext {
    /// Top-left corner of the panel in screen coordinates.
    pub(crate) origin: Vec2,
    /// Panel dimensions in screen space.
    pub(crate) size: Vec2,
    /// Window skin background, matching the adapter's solid rectangle.
    pub(crate) background: Color,
    /// Tool applied by the next click.
    pub(crate) selected_tool: Tool,
    /// Number of guests walking the park.
    pub(crate) guest_count: usize,
}

/// Renders the tool buttons and status labels.
pub(crate) fn draw_control_panel_ui(
    ui: &mut Ui,
    context: ControlPanelUiContext,
) -> ControlPanelUiResult {
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
        .text_color(WHITE)
        .margin(RectOffset::new(16.0, 16.0, 16.0, 16.0))
        .build();
    skin.window_style = window_style;

    let label_style = ui
        .style_builder()
        .text_color(WHITE)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 4.0))
        .build();
    skin.label_style = label_style;

    let button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(Color::from_rgba(70, 70, 70, 255))
        .color_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_clicked(Color::from_rgba(56, 56, 56, 255))
        .margin(RectOffset::new(0.0, 0.0, 8.0, 8.0))
        .build();
    skin.button_style = button_style;

    ui.push_skin(&skin);

    let mut result = ControlPanelUiResult::default();
    let _ = ui.window(hash!("control_panel"), context.origin, context.size, |ui| {
        ui.label(None, &format!("Tool: {}", context.selected_tool.label()));
        ui.label(None, &format!("Guests: {}", context.guest_count));

        for tool in Tool::ALL {
            if ui.button(None, tool.label()) {
                result.selected_tool = Some(tool);
            }
        }
        result.clear_all = ui.button(None, CLEAR_ALL_LABEL);

        ui.label(None, "Keys: 1-4 tools, C clear");
        ui.label(None, "G adds a guest, Q quits");
    });

    ui.pop_skin();

    result
}
