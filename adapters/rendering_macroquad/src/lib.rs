#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Mini Park.
//!
//! Macroquad is pulled in without its default `audio` feature so the crate
//! builds on machines lacking ALSA development headers.
//!
//! All `macroquad::ui` calls live inside the local `ui` module.

mod ui;

use self::ui::{draw_control_panel_ui, ControlPanelUiContext, ControlPanelUiResult};
use anyhow::Result;
use glam::Vec2;
use log::info;
use macroquad::input::{
    is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton,
};
use macroquad::math::Vec2 as MacroquadVec2;
use park_core::Tool;
use park_rendering::{
    Color, FrameInput, GuestPresentation, Presentation, RenderingBackend, Scene,
    TileGridPresentation,
};
use std::{collections::VecDeque, time::Duration};

/// Width reserved on the right of the window for the tool buttons.
pub const CONTROL_PANEL_WIDTH: f32 = 220.0;

const CONTROL_PANEL_BACKGROUND: Color = Color::new(0.16, 0.16, 0.18, 1.0);

/// Tracks UI-sourced interactions so they can be merged with physical input on the next frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlPanelInputState {
    tool_latched: Option<Tool>,
    clear_all_latched: bool,
}

impl ControlPanelInputState {
    /// Returns the latched tool selection, clearing it so it applies once.
    pub fn take_tool(&mut self) -> Option<Tool> {
        self.tool_latched.take()
    }

    /// Records that a tool button was pressed this frame.
    pub fn register_tool(&mut self, tool: Tool) {
        self.tool_latched = Some(tool);
    }

    /// Returns whether the UI requested a full clear and resets the latch.
    pub fn take_clear_all(&mut self) -> bool {
        let latched = self.clear_all_latched;
        self.clear_all_latched = false;
        latched
    }

    /// Records that the clear-all button was pressed this frame.
    pub fn register_clear_all(&mut self) {
        self.clear_all_latched = true;
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape`.
    quit_requested: bool,
    /// `1`..`4` pick path, ride, ferris wheel and clear.
    tool: Option<Tool>,
    /// `C`.
    clear_all: bool,
    /// `G`.
    spawn_guest: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let tool = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3, KeyCode::Key4]
            .into_iter()
            .zip(Tool::ALL)
            .find_map(|(key, tool)| is_key_pressed(key).then_some(tool));

        Self {
            quit_requested,
            tool,
            clear_all: is_key_pressed(KeyCode::C),
            spawn_guest: is_key_pressed(KeyCode::G),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Synchronises presentation with the display refresh rate, or renders as
    /// fast as possible when disabled.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame rate metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
}

impl FpsCounter {
    /// Records a rendered frame; yields averages once a second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            let Some(removed) = self.frame_times.pop_front() else {
                break;
            };
            self.window_duration = self.window_duration.saturating_sub(removed);
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: (scene.tile_grid.width() + CONTROL_PANEL_WIDTH).ceil() as i32,
            window_height: scene.tile_grid.height().ceil() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut control_panel_input = ControlPanelInputState::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let metrics_before = SceneMetrics::from_scene(&scene, screen_width, screen_height);
                let frame_input = gather_frame_input(
                    &scene,
                    &metrics_before,
                    &mut control_panel_input,
                    keyboard,
                );

                update_scene(frame_dt, frame_input, &mut scene);

                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);
                draw_tiles(&scene, &metrics);
                draw_tile_grid(
                    &metrics,
                    &scene.tile_grid,
                    to_macroquad_color(scene.tile_grid.line_color),
                );
                draw_guests(&scene.guests, &scene.tile_grid, &metrics);

                let panel_context = draw_control_panel(&scene, screen_width, screen_height);
                let mut control_panel_ui = macroquad::ui::root_ui();
                let ControlPanelUiResult {
                    selected_tool,
                    clear_all,
                } = draw_control_panel_ui(&mut control_panel_ui, panel_context);
                if let Some(tool) = selected_tool {
                    control_panel_input.register_tool(tool);
                }
                if clear_all {
                    control_panel_input.register_clear_all();
                }

                if let Some(FpsMetrics {
                    per_second,
                    trailing_ten_seconds,
                }) = fps_counter.record_frame(frame_dt)
                {
                    if show_fps {
                        info!("FPS: {per_second:.2} (10s avg: {trailing_ten_seconds:.2})");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
struct SceneMetrics {
    scale: f32,
    grid_offset_x: f32,
    grid_offset_y: f32,
    grid_width_scaled: f32,
    grid_height_scaled: f32,
    cell_step: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let tile_grid = scene.tile_grid;
        let world_width = tile_grid.width();
        let world_height = tile_grid.height();
        let available_width = (screen_width - CONTROL_PANEL_WIDTH).max(0.0);
        let scale = if world_width == 0.0 || world_height == 0.0 {
            1.0
        } else {
            (available_width / world_width).min(screen_height / world_height)
        };

        let grid_width_scaled = world_width * scale;
        let grid_height_scaled = world_height * scale;

        Self {
            scale,
            grid_offset_x: ((available_width - grid_width_scaled) * 0.5).max(0.0),
            grid_offset_y: ((screen_height - grid_height_scaled) * 0.5).max(0.0),
            grid_width_scaled,
            grid_height_scaled,
            cell_step: tile_grid.cell_length * scale,
        }
    }

    fn to_screen(&self, grid_position: Vec2) -> Vec2 {
        Vec2::new(
            self.grid_offset_x + grid_position.x * self.scale,
            self.grid_offset_y + grid_position.y * self.scale,
        )
    }
}

fn gather_frame_input(
    scene: &Scene,
    metrics: &SceneMetrics,
    control_panel_input: &mut ControlPanelInputState,
    keyboard: KeyboardShortcuts,
) -> FrameInput {
    let (cursor_x, cursor_y) = mouse_position();
    let click = is_mouse_button_pressed(MouseButton::Left);
    let ui_tool = control_panel_input.take_tool();
    let ui_clear_all = control_panel_input.take_clear_all();
    gather_frame_input_from_observations(
        scene,
        metrics,
        Vec2::new(cursor_x, cursor_y),
        click,
        ui_tool,
        ui_clear_all,
        keyboard,
    )
}

fn gather_frame_input_from_observations(
    scene: &Scene,
    metrics: &SceneMetrics,
    cursor_position: Vec2,
    click: bool,
    ui_tool: Option<Tool>,
    ui_clear_all: bool,
    keyboard: KeyboardShortcuts,
) -> FrameInput {
    let mut input = FrameInput {
        selected_tool: ui_tool.or(keyboard.tool),
        clear_all: ui_clear_all || keyboard.clear_all,
        spawn_guest: keyboard.spawn_guest,
        ..FrameInput::default()
    };

    if metrics.scale <= f32::EPSILON {
        return input;
    }

    let grid_position = Vec2::new(
        (cursor_position.x - metrics.grid_offset_x) / metrics.scale,
        (cursor_position.y - metrics.grid_offset_y) / metrics.scale,
    );
    input.cursor_cell = scene.tile_grid.cell_at(grid_position);
    input.paint_action = click && input.cursor_cell.is_some();

    input
}

fn draw_control_panel(
    scene: &Scene,
    screen_width: f32,
    screen_height: f32,
) -> ControlPanelUiContext {
    let left = (screen_width - CONTROL_PANEL_WIDTH).max(0.0);
    let background = to_macroquad_color(CONTROL_PANEL_BACKGROUND);
    macroquad::shapes::draw_rectangle(left, 0.0, CONTROL_PANEL_WIDTH, screen_height, background);

    ControlPanelUiContext {
        origin: MacroquadVec2::new(left, 0.0),
        size: MacroquadVec2::new(CONTROL_PANEL_WIDTH, screen_height),
        background,
        selected_tool: scene.selected_tool,
        guest_count: scene.guests.len(),
    }
}

fn draw_tiles(scene: &Scene, metrics: &SceneMetrics) {
    let tile_grid = scene.tile_grid;
    for (index, tile) in scene.tiles.iter().enumerate() {
        let Ok(index) = u32::try_from(index) else {
            break;
        };
        if tile_grid.columns == 0 {
            break;
        }
        let origin = metrics.to_screen(Vec2::new(
            (index % tile_grid.columns) as f32 * tile_grid.cell_length,
            (index / tile_grid.columns) as f32 * tile_grid.cell_length,
        ));
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            metrics.cell_step,
            metrics.cell_step,
            to_macroquad_color(scene.palette.color_for(*tile)),
        );
    }
}

fn draw_tile_grid(
    metrics: &SceneMetrics,
    tile_grid: &TileGridPresentation,
    grid_color: macroquad::color::Color,
) {
    for column in 0..=tile_grid.columns {
        let x = metrics.grid_offset_x + column as f32 * metrics.cell_step;
        macroquad::shapes::draw_line(
            x,
            metrics.grid_offset_y,
            x,
            metrics.grid_offset_y + metrics.grid_height_scaled,
            1.0,
            grid_color,
        );
    }

    for row in 0..=tile_grid.rows {
        let y = metrics.grid_offset_y + row as f32 * metrics.cell_step;
        macroquad::shapes::draw_line(
            metrics.grid_offset_x,
            y,
            metrics.grid_offset_x + metrics.grid_width_scaled,
            y,
            1.0,
            grid_color,
        );
    }
}

fn draw_guests(
    guests: &[GuestPresentation],
    tile_grid: &TileGridPresentation,
    metrics: &SceneMetrics,
) {
    for guest in guests {
        let (center, radius) = guest.marker(tile_grid);
        let center = metrics.to_screen(center);
        macroquad::shapes::draw_circle(
            center.x,
            center.y,
            radius * metrics.scale,
            to_macroquad_color(guest.color),
        );
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
