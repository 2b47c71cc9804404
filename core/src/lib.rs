#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Mini Park engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative park grid, and pure systems. Adapters submit [`Command`]
//! values describing desired tile edits or elapsed time, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values for systems to react to. Systems read the grid, never mutate it, and
//! report what they did through further events.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Mini Park.";

/// Number of tiles along each edge of the default park grid.
pub const DEFAULT_GRID_SIZE: u32 = 20;

/// Content occupying a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Nothing has been built on the cell.
    #[default]
    Empty,
    /// Walkway that guests may wander along.
    Path,
    /// Generic ride.
    Ride,
    /// Ferris wheel.
    Ferris,
}

impl Tile {
    /// Reports whether guests may occupy or move onto the tile.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Path)
    }
}

/// Editing tool applied by the next click on the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Paints [`Tile::Path`].
    #[default]
    Path,
    /// Paints [`Tile::Ride`].
    Ride,
    /// Paints [`Tile::Ferris`].
    Ferris,
    /// Resets the clicked cell to [`Tile::Empty`].
    Clear,
}

impl Tool {
    /// Every tool in the order presented by adapters.
    pub const ALL: [Tool; 4] = [Tool::Path, Tool::Ride, Tool::Ferris, Tool::Clear];

    /// Tile written into the grid when the tool is applied to a cell.
    #[must_use]
    pub const fn tile(self) -> Tile {
        match self {
            Self::Path => Tile::Path,
            Self::Ride => Tile::Ride,
            Self::Ferris => Tile::Ferris,
            Self::Clear => Tile::Empty,
        }
    }

    /// Human readable label used on buttons.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Path => "Build Path",
            Self::Ride => "Build Ride",
            Self::Ferris => "Build Ferris Wheel",
            Self::Clear => "Clear Tile",
        }
    }
}

/// Commands that express all permissible grid mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Writes a tile into a single cell. Out-of-bounds cells are ignored.
    PaintTile {
        /// Cell receiving the tile.
        cell: CellCoord,
        /// Tile written into the cell.
        tile: Tile,
    },
    /// Resets every cell of the grid to [`Tile::Empty`].
    ClearAll,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast after processing commands or advancing systems.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a cell now holds the provided tile.
    TilePainted {
        /// Cell that was edited.
        cell: CellCoord,
        /// Tile now stored in the cell.
        tile: Tile,
    },
    /// Confirms that every cell was reset to [`Tile::Empty`].
    GridCleared,
    /// Confirms that a guest entered the park.
    GuestSpawned {
        /// Identifier assigned to the new guest.
        guest: GuestId,
        /// Cell the guest occupies after spawning.
        cell: CellCoord,
    },
    /// Confirms that a guest moved between two neighbouring cells.
    GuestMoved {
        /// Identifier of the guest that moved.
        guest: GuestId,
        /// Cell the guest occupied before moving.
        from: CellCoord,
        /// Cell the guest occupies after moving.
        to: CellCoord,
    },
}

/// Cardinal movement directions available to guests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All four directions, each equally likely when sampled uniformly.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit offset `(column, row)` applied by a step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Identifier of a guest; equal to its slot in the guest collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuestId(u32);

impl GuestId {
    /// Creates a new guest identifier with the provided numeric value.
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
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
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

    /// Neighbouring cell one step away in `direction`.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    /// Upper bounds depend on the grid and are checked by the grid itself.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<CellCoord> {
        let (dx, dy) = direction.offset();
        let column = self.column.checked_add_signed(dx)?;
        let row = self.row.checked_add_signed(dy)?;
        Some(CellCoord::new(column, row))
    }
}

/// Immutable representation of a single guest used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GuestSnapshot {
    /// Identifier of the guest.
    pub id: GuestId,
    /// Grid cell currently occupied by the guest.
    pub cell: CellCoord,
}

/// Read-only snapshot describing every guest in the park.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuestView {
    snapshots: Vec<GuestSnapshot>,
}

impl GuestView {
    /// Creates a new guest view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<GuestSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured guest snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &GuestSnapshot> {
        self.snapshots.iter()
    }

    /// Number of guests captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view contains no guests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<GuestSnapshot> {
        self.snapshots
    }
}

/// Reasons a guest could not be placed into the park.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum SpawnError {
    /// The grid holds no walkable tile.
    #[error("no walkable tile available for spawning")]
    NoWalkableTile,
}
