#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Mini Park experience.

mod config;
mod session;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use park_core::Tool;
use park_rendering::{
    Color, FrameInput, Presentation, RenderingBackend, Scene, TileGridPresentation, TilePalette,
};
use park_rendering_macroquad::MacroquadBackend;
use park_system_bootstrap::Bootstrap;

use self::{
    config::{ParkConfig, Settings},
    session::Session,
};

const WINDOW_TITLE: &str = "Mini Park";

/// Light gray grid lines drawn over the tiles.
const GRID_LINE_COLOR: Color = Color::from_rgb_u8(192, 192, 192);

/// Command-line arguments. Any value given here overrides the config file.
#[derive(Debug, Parser)]
#[command(name = "mini-park", version, about = "Paint paths and rides and watch guests wander.")]
struct CliArgs {
    /// TOML file providing default settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for guest placement and movement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of cells along each side of the square grid.
    #[arg(long, value_name = "CELLS")]
    grid_size: Option<u32>,
    /// Side length of a cell in pixels.
    #[arg(long, value_name = "PIXELS")]
    cell_size: Option<f32>,
    /// Milliseconds between guest steps.
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,
    /// Number of guests placed when the park opens.
    #[arg(long, value_name = "COUNT")]
    guests: Option<u32>,
    /// Start from an empty grid instead of the starter path.
    #[arg(long)]
    no_corridor: bool,
    /// Tool selected when the park opens.
    #[arg(long, value_enum, value_name = "TOOL")]
    tool: Option<ToolArg>,
    /// Run the given number of ticks without a window and print the park.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u32>,
    /// Synchronise presentation with the display refresh rate (default).
    #[arg(long, overrides_with = "no_vsync")]
    vsync: bool,
    /// Render as fast as possible.
    #[arg(long, overrides_with = "vsync")]
    no_vsync: bool,
    /// Log frame rate once per second.
    #[arg(long)]
    show_fps: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum ToolArg {
    Path,
    Ride,
    Ferris,
    Clear,
}

impl From<ToolArg> for Tool {
    fn from(value: ToolArg) -> Self {
        match value {
            ToolArg::Path => Tool::Path,
            ToolArg::Ride => Tool::Ride,
            ToolArg::Ferris => Tool::Ferris,
            ToolArg::Clear => Tool::Clear,
        }
    }
}

impl CliArgs {
    fn overrides(&self) -> ParkConfig {
        ParkConfig {
            seed: self.seed,
            grid_size: self.grid_size,
            cell_size: self.cell_size,
            tick_ms: self.tick_ms,
            guests: self.guests,
            starter_corridor: self.no_corridor.then_some(false),
            default_tool: self.tool.map(Tool::from),
        }
    }

    fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => ParkConfig::load(path)?,
            None => ParkConfig::default(),
        };
        file.merge(self.overrides()).resolve(rand::random)
    }

    fn vsync(&self) -> bool {
        !self.no_vsync
    }
}

/// Entry point for the Mini Park command-line interface.
fn main() -> Result<()> {
    env_logger::init();

    let args = CliArgs::parse();
    let settings = args.settings()?;
    info!(
        "starting session: seed {}, {}x{} grid, {} ms tick",
        settings.seed,
        settings.grid_size,
        settings.grid_size,
        settings.tick_interval.as_millis()
    );

    let bootstrap = Bootstrap::new(settings.guests, settings.starter_corridor);
    println!("{}", bootstrap.welcome_banner());

    let mut session = Session::new(&settings);
    session.open(&bootstrap);

    let tile_grid = TileGridPresentation::new(
        settings.grid_size,
        settings.grid_size,
        settings.cell_size,
        GRID_LINE_COLOR,
    )
    .context("invalid grid presentation")?;
    let palette = TilePalette::default();
    let mut scene = Scene::new(tile_grid, palette);
    session.populate_scene(&mut scene);

    if let Some(ticks) = args.headless {
        run_headless(&mut session, &mut scene, ticks, settings.tick_interval);
        return Ok(());
    }

    let presentation = Presentation::new(WINDOW_TITLE, palette.empty, scene);
    MacroquadBackend::default()
        .with_vsync(args.vsync())
        .with_show_fps(args.show_fps)
        .run(presentation, move |dt, input, scene| {
            let _ = session.advance(dt, input);
            session.populate_scene(scene);
        })
}

fn run_headless(session: &mut Session, scene: &mut Scene, ticks: u32, tick_interval: Duration) {
    let mut moves = 0;
    for _ in 0..ticks {
        moves += session.advance(tick_interval, FrameInput::default());
    }
    session.populate_scene(scene);

    print!("{}", scene.text());
    info!(
        "headless run finished after {ticks} tick(s): {} guest(s), {moves} move(s), {} walkable tile(s)",
        session.guest_count(),
        session.grid().walkable_count()
    );
}
