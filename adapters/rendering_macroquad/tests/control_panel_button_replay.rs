use park_core::Tool;
use park_rendering_macroquad::ControlPanelInputState;

fn run_tool_sequence(sequence: &[Option<Tool>]) -> Vec<Option<Tool>> {
    let mut state = ControlPanelInputState::default();
    let mut selections = Vec::new();
    for &pressed in sequence {
        selections.push(state.take_tool());
        if let Some(tool) = pressed {
            state.register_tool(tool);
        }
    }

    // Flush any trailing latched press so the harness observes the final selection.
    selections.push(state.take_tool());
    selections
}

fn run_clear_all_sequence(sequence: &[bool]) -> Vec<bool> {
    let mut state = ControlPanelInputState::default();
    let mut presses = Vec::new();
    for &pressed in sequence {
        presses.push(state.take_clear_all());
        if pressed {
            state.register_clear_all();
        }
    }
    presses.push(state.take_clear_all());
    presses
}

#[test]
fn tool_button_sequence_is_deterministic() {
    let button_sequence = [None, Some(Tool::Ride), None, Some(Tool::Ferris), Some(Tool::Clear)];
    let expected = vec![
        None,
        None,
        Some(Tool::Ride),
        None,
        Some(Tool::Ferris),
        Some(Tool::Clear),
    ];

    let first_run = run_tool_sequence(&button_sequence);
    let second_run = run_tool_sequence(&button_sequence);

    assert_eq!(first_run, expected);
    assert_eq!(first_run, second_run);
}

#[test]
fn latest_tool_press_within_a_frame_wins() {
    let mut state = ControlPanelInputState::default();
    state.register_tool(Tool::Ride);
    state.register_tool(Tool::Path);

    assert_eq!(state.take_tool(), Some(Tool::Path));
    assert_eq!(state.take_tool(), None);
}

#[test]
fn clear_all_button_sequence_is_deterministic() {
    let button_sequence = [true, false, true, false, false, true];
    let expected = vec![false, true, false, true, false, false, true];

    let first_run = run_clear_all_sequence(&button_sequence);
    let second_run = run_clear_all_sequence(&button_sequence);

    assert_eq!(first_run, expected);
    assert_eq!(first_run, second_run);
}
