use std::time::Duration;

use log::warn;
use park_core::{Command, Event};
use park_rendering::{FrameInput, Scene};
use park_system_bootstrap::Bootstrap;
use park_system_builder::{Builder, BuilderInput};
use park_system_guests::{Config as GuestConfig, GuestSimulator};
use park_world::{self as world, query, ParkGrid};

use crate::config::Settings;

/// Owns the park and drives it one frame at a time.
#[derive(Debug)]
pub(crate) struct Session {
    grid: ParkGrid,
    guests: GuestSimulator,
    builder: Builder,
    commands: Vec<Command>,
    events: Vec<Event>,
    guest_events: Vec<Event>,
}

impl Session {
    pub(crate) fn new(settings: &Settings) -> Self {
        Self {
            grid: ParkGrid::new(settings.grid_size),
            guests: GuestSimulator::new(GuestConfig::new(settings.tick_interval, settings.seed)),
            builder: Builder::with_tool(settings.default_tool),
            commands: Vec::new(),
            events: Vec::new(),
            guest_events: Vec::new(),
        }
    }

    /// Lays out the opening park. A failed spawn is logged and the session
    /// carries on with whatever guests were placed.
    pub(crate) fn open(&mut self, bootstrap: &Bootstrap) {
        self.events.clear();
        if let Err(error) = bootstrap.populate(&mut self.grid, &mut self.guests, &mut self.events) {
            warn!("could not place every initial guest: {error}");
        }
    }

    /// Applies one frame of input followed by `dt` of simulated time.
    ///
    /// Returns how many guests moved.
    pub(crate) fn advance(&mut self, dt: Duration, input: FrameInput) -> usize {
        self.commands.clear();
        self.events.clear();
        self.guest_events.clear();

        self.builder.handle(
            BuilderInput::new(input.selected_tool, input.clear_all, input.painted_cell()),
            &mut self.commands,
        );
        self.commands.push(Command::Tick { dt });
        for command in self.commands.drain(..) {
            world::apply(&mut self.grid, command, &mut self.events);
        }

        if input.spawn_guest {
            self.spawn_guest();
        }

        self.guests
            .handle(&self.events, &self.grid, &mut self.guest_events);
        self.guest_events
            .iter()
            .filter(|event| matches!(event, Event::GuestMoved { .. }))
            .count()
    }

    pub(crate) fn spawn_guest(&mut self) {
        match self.guests.spawn_guest(&self.grid) {
            Ok(guest) => {
                if let Some(snapshot) = self.guests.guest(guest) {
                    self.guest_events.push(Event::GuestSpawned {
                        guest,
                        cell: snapshot.cell,
                    });
                }
            }
            Err(error) => warn!("guest could not enter the park: {error}"),
        }
    }

    /// Copies the current park state into `scene`.
    pub(crate) fn populate_scene(&self, scene: &mut Scene) {
        scene.update(query::tiles(&self.grid), &self.guests.guests(), self.builder.tool());
    }

    pub(crate) fn guest_count(&self) -> usize {
        self.guests.len()
    }

    pub(crate) fn grid(&self) -> &ParkGrid {
        &self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use park_core::{CellCoord, Tile, Tool};
    use park_rendering::{Color, TileGridPresentation, TilePalette};

    fn settings() -> Settings {
        Settings {
            seed: 5,
            grid_size: 20,
            cell_size: 30.0,
            tick_interval: Duration::from_millis(100),
            guests: 2,
            starter_corridor: true,
            default_tool: Tool::Path,
        }
    }

    fn opened() -> Session {
        let settings = settings();
        let mut session = Session::new(&settings);
        session.open(&Bootstrap::new(settings.guests, settings.starter_corridor));
        session
    }

    #[test]
    fn open_places_corridor_and_guests() {
        let session = opened();

        assert_eq!(session.guest_count(), 2);
        assert_eq!(session.grid().walkable_count(), 10);
        for column in 5..15 {
            assert_eq!(session.grid().tile_at(CellCoord::new(column, 10)), Some(Tile::Path));
        }
    }

    #[test]
    fn open_without_corridor_keeps_session_alive() {
        let settings = settings();
        let mut session = Session::new(&settings);
        session.open(&Bootstrap::new(2, false));

        assert_eq!(session.guest_count(), 0);
        assert_eq!(session.advance(Duration::from_secs(1), FrameInput::default()), 0);
    }

    #[test]
    fn click_paints_with_selected_tool() {
        let mut session = opened();
        let input = FrameInput {
            cursor_cell: Some(CellCoord::new(0, 0)),
            paint_action: true,
            selected_tool: Some(Tool::Ride),
            ..FrameInput::default()
        };

        let _ = session.advance(Duration::ZERO, input);

        assert_eq!(session.grid().tile_at(CellCoord::new(0, 0)), Some(Tile::Ride));
    }

    #[test]
    fn clear_all_empties_grid_but_keeps_guests() {
        let mut session = opened();
        let input = FrameInput {
            clear_all: true,
            ..FrameInput::default()
        };

        let moved = session.advance(Duration::from_millis(500), input);

        assert_eq!(moved, 0, "no tile is walkable after clearing");
        assert_eq!(session.grid().walkable_count(), 0);
        assert_eq!(session.guest_count(), 2);
    }

    #[test]
    fn spawn_request_adds_guest() {
        let mut session = opened();
        let input = FrameInput {
            spawn_guest: true,
            ..FrameInput::default()
        };

        let _ = session.advance(Duration::ZERO, input);

        assert_eq!(session.guest_count(), 3);
    }

    #[test]
    fn scene_reflects_session_state() {
        let mut session = opened();
        let _ = session.advance(
            Duration::ZERO,
            FrameInput {
                selected_tool: Some(Tool::Ferris),
                ..FrameInput::default()
            },
        );
        let grid = TileGridPresentation::new(20, 20, 30.0, Color::from_rgb_u8(192, 192, 192))
            .expect("valid grid");
        let mut scene = Scene::new(grid, TilePalette::default());

        session.populate_scene(&mut scene);

        assert_eq!(scene.selected_tool, Tool::Ferris);
        assert_eq!(scene.guests.len(), 2);
        assert!(scene.guests.iter().all(|guest| guest.row == 10));
        let text = scene.text();
        assert_eq!(text.lines().count(), 20);
        assert!(text.lines().nth(10).is_some_and(|row| row.contains('o')));
    }
}
