#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative tile grid for Mini Park.

use log::debug;
use park_core::{CellCoord, Command, Event, Tile};

/// Largest edge length a grid may have.
pub const MAX_GRID_SIZE: u32 = 1024;

/// Dense square grid holding exactly one [`Tile`] per cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParkGrid {
    size: u32,
    tiles: Vec<Tile>,
}

impl ParkGrid {
    /// Creates an all-empty grid with `size` cells along each edge.
    ///
    /// Sizes above [`MAX_GRID_SIZE`] are clamped to it.
    #[must_use]
    pub fn new(size: u32) -> Self {
        let size = size.min(MAX_GRID_SIZE);
        let edge = size as usize;
        Self {
            size,
            tiles: vec![Tile::Empty; edge * edge],
        }
    }

    /// Number of cells along each edge of the grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.size && cell.row() < self.size
    }

    /// Writes `tile` into `cell`.
    ///
    /// Out-of-bounds cells are ignored and leave the grid untouched. Returns
    /// whether the write happened.
    pub fn set_tile(&mut self, cell: CellCoord, tile: Tile) -> bool {
        let Some(index) = self.index(cell) else {
            return false;
        };
        match self.tiles.get_mut(index) {
            Some(slot) => {
                *slot = tile;
                true
            }
            None => false,
        }
    }

    /// Resets every cell to [`Tile::Empty`].
    pub fn clear_all(&mut self) {
        self.tiles.fill(Tile::Empty);
    }

    /// Tile stored in `cell`, or `None` when the cell lies outside the grid.
    #[must_use]
    pub fn tile_at(&self, cell: CellCoord) -> Option<Tile> {
        self.index(cell)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Reports whether a guest may stand on `cell`.
    ///
    /// Out-of-bounds cells are never walkable.
    #[must_use]
    pub fn is_walkable(&self, cell: CellCoord) -> bool {
        self.tile_at(cell).is_some_and(Tile::is_walkable)
    }

    /// Number of walkable cells currently in the grid.
    #[must_use]
    pub fn walkable_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_walkable()).count()
    }

    /// Row-major slice of every tile in the grid.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Iterates over every cell together with its tile in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, Tile)> + '_ {
        let size = self.size;
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let index = index as u32;
            (CellCoord::new(index % size, index / size), *tile)
        })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.size).ok()?;
        Some(row * width + column)
    }
}

/// Applies the provided command to the grid and reports accepted mutations.
pub fn apply(grid: &mut ParkGrid, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PaintTile { cell, tile } => {
            if grid.set_tile(cell, tile) {
                debug!(
                    "painted {tile:?} at ({}, {})",
                    cell.column(),
                    cell.row()
                );
                out_events.push(Event::TilePainted { cell, tile });
            }
        }
        Command::ClearAll => {
            grid.clear_all();
            debug!("cleared every tile");
            out_events.push(Event::GridCleared);
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
        }
    }
}

/// Query functions that provide read-only access to the grid.
pub mod query {
    use super::ParkGrid;
    use park_core::Tile;

    /// Row-major slice of every tile, suitable for rendering.
    #[must_use]
    pub fn tiles(grid: &ParkGrid) -> &[Tile] {
        grid.tiles()
    }
}
