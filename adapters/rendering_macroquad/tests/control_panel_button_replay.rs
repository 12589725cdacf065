use waypoint_defence_core::TowerKind;
use waypoint_defence_rendering::UiAction;
use waypoint_defence_rendering_macroquad::ControlPanelInputState;

fn run_sequence(sequence: &[Option<UiAction>]) -> Vec<Vec<UiAction>> {
    let mut state = ControlPanelInputState::default();
    let mut frames = Vec::new();
    for pressed in sequence {
        frames.push(state.take_actions());
        if let Some(action) = pressed {
            state.register(*action);
        }
    }

    // Flush any trailing latched press so the harness observes the final action.
    frames.push(state.take_actions());
    frames
}

#[test]
fn button_presses_are_delivered_once_on_the_next_frame() {
    let sequence = [
        None,
        Some(UiAction::SelectTower(Some(TowerKind::Mortar))),
        None,
        Some(UiAction::StartWave),
        Some(UiAction::Restart),
    ];

    let first_run = run_sequence(&sequence);
    let second_run = run_sequence(&sequence);

    assert_eq!(
        first_run,
        vec![
            vec![],
            vec![],
            vec![UiAction::SelectTower(Some(TowerKind::Mortar))],
            vec![],
            vec![UiAction::StartWave],
            vec![UiAction::Restart],
        ]
    );
    assert_eq!(first_run, second_run);
}

#[test]
fn actions_raised_in_one_frame_keep_their_order() {
    let mut state = ControlPanelInputState::default();
    state.register(UiAction::SelectTower(None));
    state.register(UiAction::StartWave);

    assert_eq!(
        state.take_actions(),
        vec![UiAction::SelectTower(None), UiAction::StartWave]
    );
    assert!(state.take_actions().is_empty());
}
