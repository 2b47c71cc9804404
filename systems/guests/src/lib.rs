#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Guest simulation: rejection-sampled spawning and a bounded random walk
//! along path tiles.
//!
//! Spawning first rejection-samples uniformly over the whole grid. If the
//! sample budget runs out it falls back to a uniform pick among the walkable
//! cells, so a spawn only fails when the grid has no walkable tile at all.
//!
//! The simulator owns every guest position and reads the [`ParkGrid`] without
//! ever mutating it. Guests move independently of one another; several may
//! share a cell.

use std::time::Duration;

use log::{debug, trace};
use park_core::{CellCoord, Direction, Event, GuestId, GuestSnapshot, GuestView, SpawnError};
use park_world::ParkGrid;
use rand::{
    seq::{IteratorRandom, SliceRandom},
    Rng, SeedableRng,
};
use rand_chacha::ChaCha8Rng;

/// Interval between guest steps used by the reference experience.
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(100);

/// Coordinates sampled by rejection before a spawn falls back to scanning the grid.
pub const DEFAULT_SPAWN_ATTEMPTS: u32 = 10_000;

/// Configuration parameters required to construct the guest simulator.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    step_interval: Duration,
    rng_seed: u64,
    spawn_attempts: u32,
}

impl Config {
    /// Creates a configuration using the provided step cadence and seed.
    #[must_use]
    pub const fn new(step_interval: Duration, rng_seed: u64) -> Self {
        Self {
            step_interval,
            rng_seed,
            spawn_attempts: DEFAULT_SPAWN_ATTEMPTS,
        }
    }

    /// Overrides how many coordinates a spawn samples before scanning the grid.
    #[must_use]
    pub const fn with_spawn_attempts(mut self, spawn_attempts: u32) -> Self {
        self.spawn_attempts = spawn_attempts;
        self
    }
}

#[derive(Clone, Copy, Debug)]
struct Guest {
    id: GuestId,
    cell: CellCoord,
}

/// Owns the guest population and advances it one random step per tick.
#[derive(Debug)]
pub struct GuestSimulator {
    guests: Vec<Guest>,
    rng: ChaCha8Rng,
    step_interval: Duration,
    spawn_attempts: u32,
    accumulator: Duration,
}

impl GuestSimulator {
    /// Creates an empty simulator using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            guests: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            step_interval: config.step_interval,
            spawn_attempts: config.spawn_attempts,
            accumulator: Duration::ZERO,
        }
    }

    /// Places a new guest on a uniformly sampled walkable cell.
    ///
    /// Fails only when the grid has no walkable tile.
    pub fn spawn_guest(&mut self, grid: &ParkGrid) -> Result<GuestId, SpawnError> {
        if grid.walkable_count() == 0 {
            return Err(SpawnError::NoWalkableTile);
        }

        let cell = match self.sample_walkable(grid) {
            Some(cell) => cell,
            None => grid
                .cells()
                .filter(|(_, tile)| tile.is_walkable())
                .map(|(cell, _)| cell)
                .choose(&mut self.rng)
                .ok_or(SpawnError::NoWalkableTile)?,
        };

        let id = GuestId::new(self.guests.len() as u32);
        self.guests.push(Guest { id, cell });
        debug!(
            "guest {} spawned at ({}, {})",
            id.get(),
            cell.column(),
            cell.row()
        );
        Ok(id)
    }

    fn sample_walkable(&mut self, grid: &ParkGrid) -> Option<CellCoord> {
        let size = grid.size();
        (0..self.spawn_attempts).find_map(|_| {
            let cell = CellCoord::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            grid.is_walkable(cell).then_some(cell)
        })
    }

    /// Advances every guest by one random orthogonal step.
    ///
    /// A guest whose candidate cell is outside the grid or not walkable stays
    /// where it is for this tick.
    pub fn step(&mut self, grid: &ParkGrid, out_events: &mut Vec<Event>) {
        for guest in &mut self.guests {
            let Some(direction) = Direction::ALL.choose(&mut self.rng).copied() else {
                continue;
            };

            let from = guest.cell;
            let Some(to) = from.neighbor(direction) else {
                continue;
            };
            if !grid.is_walkable(to) {
                continue;
            }

            guest.cell = to;
            trace!(
                "guest {} moved {direction:?} to ({}, {})",
                guest.id.get(),
                to.column(),
                to.row()
            );
            out_events.push(Event::GuestMoved {
                guest: guest.id,
                from,
                to,
            });
        }
    }

    /// Consumes world events and steps once per whole elapsed interval.
    pub fn handle(&mut self, events: &[Event], grid: &ParkGrid, out_events: &mut Vec<Event>) {
        if self.step_interval.is_zero() {
            return;
        }

        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                self.accumulator = self.accumulator.saturating_add(*dt);
            }
        }

        while self.accumulator >= self.step_interval {
            self.accumulator -= self.step_interval;
            self.step(grid, out_events);
        }
    }

    /// Captures a read-only view of every guest.
    #[must_use]
    pub fn guests(&self) -> GuestView {
        GuestView::from_snapshots(
            self.guests
                .iter()
                .map(|guest| GuestSnapshot {
                    id: guest.id,
                    cell: guest.cell,
                })
                .collect(),
        )
    }

    /// Snapshot of a single guest, if the identifier exists.
    #[must_use]
    pub fn guest(&self, id: GuestId) -> Option<GuestSnapshot> {
        self.guests
            .get(id.get() as usize)
            .map(|guest| GuestSnapshot {
                id: guest.id,
                cell: guest.cell,
            })
    }

    /// Number of guests in the park.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guests.len()
    }

    /// Reports whether the park has no guests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }
}
