use std::{fs, path::Path, time::Duration};

use anyhow::{ensure, Context, Result};
use park_core::{Tool, DEFAULT_GRID_SIZE};
use park_rendering::TileGridPresentation;
use park_system_bootstrap::DEFAULT_INITIAL_GUESTS;
use park_system_guests::DEFAULT_STEP_INTERVAL;
use park_world::MAX_GRID_SIZE;
use serde::Deserialize;

/// Partial park configuration. Every field is optional so that a TOML file and
/// command-line flags can each supply a subset and be layered.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ParkConfig {
    pub(crate) seed: Option<u64>,
    pub(crate) grid_size: Option<u32>,
    pub(crate) cell_size: Option<f32>,
    pub(crate) tick_ms: Option<u64>,
    pub(crate) guests: Option<u32>,
    pub(crate) starter_corridor: Option<bool>,
    pub(crate) default_tool: Option<Tool>,
}

impl ParkConfig {
    /// Reads and parses a TOML configuration file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub(crate) fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse park configuration")
    }

    /// Layers `overrides` on top of `self`; values present in `overrides` win.
    #[must_use]
    pub(crate) fn merge(self, overrides: ParkConfig) -> ParkConfig {
        ParkConfig {
            seed: overrides.seed.or(self.seed),
            grid_size: overrides.grid_size.or(self.grid_size),
            cell_size: overrides.cell_size.or(self.cell_size),
            tick_ms: overrides.tick_ms.or(self.tick_ms),
            guests: overrides.guests.or(self.guests),
            starter_corridor: overrides.starter_corridor.or(self.starter_corridor),
            default_tool: overrides.default_tool.or(self.default_tool),
        }
    }

    /// Fills unset values with defaults and validates the result.
    ///
    /// `random_seed` is only invoked when no seed was configured.
    pub(crate) fn resolve(self, random_seed: impl FnOnce() -> u64) -> Result<Settings> {
        let grid_size = self.grid_size.unwrap_or(DEFAULT_GRID_SIZE);
        ensure!(
            (1..=MAX_GRID_SIZE).contains(&grid_size),
            "grid_size must be between 1 and {MAX_GRID_SIZE} (received {grid_size})"
        );

        let tick_interval = match self.tick_ms {
            Some(tick_ms) => {
                ensure!(tick_ms >= 1, "tick_ms must be at least 1 (received {tick_ms})");
                Duration::from_millis(tick_ms)
            }
            None => DEFAULT_STEP_INTERVAL,
        };

        let cell_size = self
            .cell_size
            .unwrap_or(TileGridPresentation::DEFAULT_CELL_LENGTH);
        ensure!(
            cell_size.is_finite() && cell_size > 0.0,
            "cell_size must be a positive number of pixels (received {cell_size})"
        );

        Ok(Settings {
            seed: self.seed.unwrap_or_else(random_seed),
            grid_size,
            cell_size,
            tick_interval,
            guests: self.guests.unwrap_or(DEFAULT_INITIAL_GUESTS),
            starter_corridor: self.starter_corridor.unwrap_or(true),
            default_tool: self.default_tool.unwrap_or_default(),
        })
    }
}

/// Fully resolved session settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Settings {
    pub(crate) seed: u64,
    pub(crate) grid_size: u32,
    pub(crate) cell_size: f32,
    pub(crate) tick_interval: Duration,
    pub(crate) guests: u32,
    pub(crate) starter_corridor: bool,
    pub(crate) default_tool: Tool,
}
