use std::time::Duration;

use park_core::{CellCoord, Event, SpawnError, Tile, WELCOME_BANNER};
use park_system_bootstrap::{starter_corridor, Bootstrap};
use park_system_guests::{Config, GuestSimulator};
use park_world::ParkGrid;

fn simulator() -> GuestSimulator {
    GuestSimulator::new(Config::new(Duration::from_millis(100), 0xabad_1dea))
}

#[test]
fn default_bootstrap_opens_reference_park() {
    let mut grid = ParkGrid::new(20);
    let mut guests = simulator();
    let mut events = Vec::new();

    Bootstrap::default()
        .populate(&mut grid, &mut guests, &mut events)
        .expect("corridor guarantees a walkable tile");

    for column in 0..20 {
        let expected = if (5..15).contains(&column) {
            Tile::Path
        } else {
            Tile::Empty
        };
        assert_eq!(grid.tile_at(CellCoord::new(column, 10)), Some(expected));
    }
    assert_eq!(grid.walkable_count(), 10);

    let view = guests.guests();
    assert_eq!(view.len(), 2);
    for guest in view.iter() {
        assert_eq!(guest.cell.row(), 10);
        assert!((5..=14).contains(&guest.cell.column()));
    }

    let painted = events
        .iter()
        .filter(|event| matches!(event, Event::TilePainted { .. }))
        .count();
    let spawned: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::GuestSpawned { guest, cell } => Some((*guest, *cell)),
            _ => None,
        })
        .collect();
    assert_eq!(painted, starter_corridor(20).len());
    assert_eq!(
        spawned,
        view.iter()
            .map(|snapshot| (snapshot.id, snapshot.cell))
            .collect::<Vec<_>>()
    );
}

#[test]
fn bootstrap_without_corridor_reports_spawn_failure() {
    let mut grid = ParkGrid::new(20);
    let mut guests = simulator();
    let mut events = Vec::new();

    let result = Bootstrap::new(2, false).populate(&mut grid, &mut guests, &mut events);

    assert_eq!(result, Err(SpawnError::NoWalkableTile));
    assert!(guests.is_empty());
    assert!(events.is_empty());
}

#[test]
fn bootstrap_honours_guest_count() {
    let mut grid = ParkGrid::new(10);
    let mut guests = simulator();
    let mut events = Vec::new();

    Bootstrap::new(5, true)
        .populate(&mut grid, &mut guests, &mut events)
        .expect("corridor guarantees a walkable tile");

    assert_eq!(guests.len(), 5);
}

#[test]
fn banner_greets_player() {
    assert_eq!(Bootstrap::default().welcome_banner(), WELCOME_BANNER);
}
