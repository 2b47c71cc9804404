#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Mini Park adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use park_core::{CellCoord, GuestView, Tile, Tool};
use std::{fmt::Write as _, time::Duration};
use thiserror::Error;

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
}

/// Colors assigned to each tile kind and to guest markers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePalette {
    /// Fill for [`Tile::Empty`]; matches the window background.
    pub empty: Color,
    /// Fill for [`Tile::Path`].
    pub path: Color,
    /// Fill for [`Tile::Ride`].
    pub ride: Color,
    /// Fill for [`Tile::Ferris`].
    pub ferris: Color,
    /// Fill for guest markers.
    pub guest: Color,
}

impl TilePalette {
    /// Fill color for the provided tile kind.
    #[must_use]
    pub const fn color_for(&self, tile: Tile) -> Color {
        match tile {
            Tile::Empty => self.empty,
            Tile::Path => self.path,
            Tile::Ride => self.ride,
            Tile::Ferris => self.ferris,
        }
    }
}

impl Default for TilePalette {
    fn default() -> Self {
        Self {
            empty: Color::from_rgb_u8(238, 238, 238),
            path: Color::from_rgb_u8(128, 128, 128),
            ride: Color::from_rgb_u8(0, 0, 255),
            ferris: Color::from_rgb_u8(0, 255, 0),
            guest: Color::from_rgb_u8(255, 0, 0),
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Grid cell under the cursor, if the cursor lies inside the grid.
    pub cursor_cell: Option<CellCoord>,
    /// Whether the player clicked the grid on this frame.
    pub paint_action: bool,
    /// Tool chosen through a button or shortcut on this frame.
    pub selected_tool: Option<Tool>,
    /// Whether the player requested that every tile be cleared.
    pub clear_all: bool,
    /// Whether the player requested an additional guest.
    pub spawn_guest: bool,
}

impl FrameInput {
    /// Cell that should receive the active tool on this frame.
    #[must_use]
    pub fn painted_cell(&self) -> Option<CellCoord> {
        if self.paint_action {
            self.cursor_cell
        } else {
            None
        }
    }
}

/// Describes a square-celled tile grid that can be rendered by adapters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single cell expressed in pixels.
    pub cell_length: f32,
    /// Color used when drawing grid lines.
    pub line_color: Color,
}

impl TileGridPresentation {
    /// Cell size used by the reference window, in pixels.
    pub const DEFAULT_CELL_LENGTH: f32 = 30.0;

    /// Creates a new tile grid descriptor.
    ///
    /// Returns an error when `cell_length` is not strictly positive.
    pub fn new(
        columns: u32,
        rows: u32,
        cell_length: f32,
        line_color: Color,
    ) -> Result<Self, RenderingError> {
        if !(cell_length.is_finite() && cell_length > 0.0) {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self {
            columns,
            rows,
            cell_length,
            line_color,
        })
    }

    /// Calculates the total width of the grid.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Calculates the total height of the grid.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }

    /// Converts a grid-relative pixel position into the cell beneath it.
    ///
    /// Uses integer division by the cell length; returns `None` outside the grid.
    #[must_use]
    pub fn cell_at(&self, position: Vec2) -> Option<CellCoord> {
        if position.x < 0.0 || position.y < 0.0 {
            return None;
        }

        let column = (position.x / self.cell_length).floor() as u32;
        let row = (position.y / self.cell_length).floor() as u32;
        if column >= self.columns || row >= self.rows {
            return None;
        }

        Some(CellCoord::new(column, row))
    }

    /// Pixel position of the upper-left corner of `cell`.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            cell.column() as f32 * self.cell_length,
            cell.row() as f32 * self.cell_length,
        )
    }
}

/// Guest rendered as a small filled circle centred inside its cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuestPresentation {
    /// Zero-based column index of the cell that contains the guest.
    pub column: u32,
    /// Zero-based row index of the cell that contains the guest.
    pub row: u32,
    /// Fill color of the marker.
    pub color: Color,
}

impl GuestPresentation {
    /// Creates a new guest presentation descriptor.
    #[must_use]
    pub const fn new(column: u32, row: u32, color: Color) -> Self {
        Self { column, row, color }
    }

    /// Marker center and radius in grid-relative pixels.
    ///
    /// The marker spans the middle half of the cell.
    #[must_use]
    pub fn marker(&self, tile_grid: &TileGridPresentation) -> (Vec2, f32) {
        let origin = tile_grid.cell_origin(CellCoord::new(self.column, self.row));
        let half = tile_grid.cell_length * 0.5;
        (origin + Vec2::splat(half), half * 0.5)
    }
}

/// Scene description combining the tile grid, tiles and guests.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Grid layout in screen units.
    pub tile_grid: TileGridPresentation,
    /// Row-major tiles, one per grid cell.
    pub tiles: Vec<Tile>,
    /// Guests currently visible within the park.
    pub guests: Vec<GuestPresentation>,
    /// Colors used for tiles and guests.
    pub palette: TilePalette,
    /// Tool applied by the next click.
    pub selected_tool: Tool,
}

impl Scene {
    /// Creates a scene with no tiles or guests; [`Scene::update`] fills it.
    ///
    /// Cells without a tile are drawn as empty.
    #[must_use]
    pub fn new(tile_grid: TileGridPresentation, palette: TilePalette) -> Self {
        Self {
            tile_grid,
            tiles: Vec::new(),
            guests: Vec::new(),
            palette,
            selected_tool: Tool::default(),
        }
    }

    /// Replaces the scene contents with the latest park state.
    pub fn update(&mut self, tiles: &[Tile], guests: &GuestView, selected_tool: Tool) {
        self.tiles.clear();
        self.tiles.extend_from_slice(tiles);
        self.guests.clear();
        let color = self.palette.guest;
        self.guests.extend(
            guests
                .iter()
                .map(|guest| GuestPresentation::new(guest.cell.column(), guest.cell.row(), color)),
        );
        self.selected_tool = selected_tool;
    }

    /// Tile drawn at the provided cell, if the cell lies inside the grid.
    #[must_use]
    pub fn tile_at(&self, cell: CellCoord) -> Option<Tile> {
        if cell.column() >= self.tile_grid.columns || cell.row() >= self.tile_grid.rows {
            return None;
        }
        let index = cell.row() as usize * self.tile_grid.columns as usize + cell.column() as usize;
        self.tiles.get(index).copied()
    }

    /// Renders the scene as text, one line per row.
    ///
    /// Empty cells are `.`, paths `#`, rides `R`, ferris wheels `F`, and any
    /// cell holding a guest is drawn as `o`.
    #[must_use]
    pub fn text(&self) -> String {
        let columns = self.tile_grid.columns;
        let mut out = String::with_capacity((columns as usize + 1) * self.tile_grid.rows as usize);
        for row in 0..self.tile_grid.rows {
            for column in 0..columns {
                let occupied = self
                    .guests
                    .iter()
                    .any(|guest| guest.column == column && guest.row == row);
                let glyph = if occupied {
                    'o'
                } else {
                    match self.tile_at(CellCoord::new(column, row)) {
                        Some(Tile::Path) => '#',
                        Some(Tile::Ride) => 'R',
                        Some(Tile::Ferris) => 'F',
                        Some(Tile::Empty) | None => '.',
                    }
                };
                out.push(glyph);
            }
            let _ = writeln!(out);
        }
        out
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Mini Park scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and refreshes the scene before it is
    /// drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Error)]
pub enum RenderingError {
    /// Cells must have a positive, finite side length.
    #[error("cell_length must be positive (received {cell_length})")]
    InvalidCellLength {
        /// Provided length that failed validation.
        cell_length: f32,
    },
}
