#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the opening Mini Park layout.

use log::info;
use park_core::{CellCoord, Command, Event, SpawnError, Tile, WELCOME_BANNER};
use park_system_guests::GuestSimulator;
use park_world::{self as world, ParkGrid};

/// Number of guests placed into a freshly opened park.
pub const DEFAULT_INITIAL_GUESTS: u32 = 2;

/// Prepares the grid and guest population shown when the experience starts.
#[derive(Clone, Copy, Debug)]
pub struct Bootstrap {
    initial_guests: u32,
    starter_corridor: bool,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_GUESTS, true)
    }
}

impl Bootstrap {
    /// Creates a bootstrap that spawns `initial_guests` guests and optionally
    /// paints the starter corridor first.
    #[must_use]
    pub const fn new(initial_guests: u32, starter_corridor: bool) -> Self {
        Self {
            initial_guests,
            starter_corridor,
        }
    }

    /// Banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        WELCOME_BANNER
    }

    /// Paints the starter corridor and spawns the initial guests.
    ///
    /// Stops at the first guest that cannot be placed and reports why.
    pub fn populate(
        &self,
        grid: &mut ParkGrid,
        guests: &mut GuestSimulator,
        out_events: &mut Vec<Event>,
    ) -> Result<(), SpawnError> {
        if self.starter_corridor {
            for cell in starter_corridor(grid.size()) {
                world::apply(
                    grid,
                    Command::PaintTile {
                        cell,
                        tile: Tile::Path,
                    },
                    out_events,
                );
            }
        }

        for _ in 0..self.initial_guests {
            let guest = guests.spawn_guest(grid)?;
            if let Some(snapshot) = guests.guest(guest) {
                out_events.push(Event::GuestSpawned {
                    guest,
                    cell: snapshot.cell,
                });
            }
        }

        info!(
            "park opened with {} guest(s) on {} path tile(s)",
            guests.len(),
            grid.walkable_count()
        );
        Ok(())
    }
}

/// Horizontal path across the middle row, spanning the central half of the grid.
///
/// On the default 20×20 grid this is `(5, 10)` through `(14, 10)`.
#[must_use]
pub fn starter_corridor(size: u32) -> Vec<CellCoord> {
    let row = size / 2;
    (size / 4..size - size / 4)
        .map(|column| CellCoord::new(column, row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corridor_matches_reference_layout_on_default_grid() {
        let cells = starter_corridor(20);
        let expected: Vec<_> = (5..15).map(|column| CellCoord::new(column, 10)).collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn corridor_fits_inside_small_grids() {
        for size in 0..8 {
            for cell in starter_corridor(size) {
                assert!(cell.column() < size && cell.row() < size, "{cell:?} in {size}");
            }
        }
        assert_eq!(starter_corridor(1), vec![CellCoord::new(0, 0)]);
        assert!(starter_corridor(0).is_empty());
    }
}
