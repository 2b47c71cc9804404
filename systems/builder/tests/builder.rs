use park_core::{CellCoord, Command, Tile, Tool};
use park_system_builder::{Builder, BuilderInput};

#[test]
fn default_tool_paints_path() {
    let mut builder = Builder::default();
    let mut commands = Vec::new();

    builder.handle(
        BuilderInput {
            clicked_cell: Some(CellCoord::new(4, 7)),
            ..BuilderInput::default()
        },
        &mut commands,
    );

    assert_eq!(builder.tool(), Tool::Path);
    assert_eq!(
        commands,
        vec![Command::PaintTile {
            cell: CellCoord::new(4, 7),
            tile: Tile::Path,
        }],
        "a click with the default tool should paint a path",
    );
}

#[test]
fn selected_tool_applies_to_click_on_same_frame() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        BuilderInput::new(Some(Tool::Ferris), false, Some(CellCoord::new(1, 1))),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::PaintTile {
            cell: CellCoord::new(1, 1),
            tile: Tile::Ferris,
        }],
    );
}

#[test]
fn tool_selection_persists_across_frames() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(BuilderInput::new(Some(Tool::Ride), false, None), &mut commands);
    assert!(commands.is_empty(), "selecting a tool emits nothing");

    builder.handle(
        BuilderInput::new(None, false, Some(CellCoord::new(0, 3))),
        &mut commands,
    );

    assert_eq!(builder.tool(), Tool::Ride);
    assert_eq!(
        commands,
        vec![Command::PaintTile {
            cell: CellCoord::new(0, 3),
            tile: Tile::Ride,
        }],
    );
}

#[test]
fn clear_tool_paints_empty() {
    let mut builder = Builder::with_tool(Tool::Clear);
    let mut commands = Vec::new();

    builder.handle(
        BuilderInput::new(None, false, Some(CellCoord::new(9, 9))),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::PaintTile {
            cell: CellCoord::new(9, 9),
            tile: Tile::Empty,
        }],
    );
}

#[test]
fn clear_all_precedes_click() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        BuilderInput::new(None, true, Some(CellCoord::new(2, 2))),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::ClearAll,
            Command::PaintTile {
                cell: CellCoord::new(2, 2),
                tile: Tile::Path,
            },
        ],
    );
}

#[test]
fn idle_input_emits_nothing() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(BuilderInput::default(), &mut commands);

    assert!(commands.is_empty());
    assert_eq!(builder.tool(), Tool::Path);
}
