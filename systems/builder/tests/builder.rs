use waypoint_defence_core::{Command, PlacementError, TowerKind, WorldPoint};
use waypoint_defence_system_builder::{Builder, PlacementPreview, WorldPointKey};

#[test]
fn click_without_selection_is_rejected_first() {
    let builder = Builder::default();
    let mut commands = Vec::new();

    let outcome = builder.handle_click(WorldPoint::new(300.0, 260.0), &mut commands);

    assert_eq!(outcome, Err(PlacementError::NoTowerSelected));
    assert!(
        commands.is_empty(),
        "no command should be emitted without a selection"
    );
}

#[test]
fn click_with_selection_emits_place_command() {
    let mut builder = Builder::new();
    builder.select(Some(TowerKind::Frost));
    let mut commands = Vec::new();

    let outcome = builder.handle_click(WorldPoint::new(305.0, 250.0), &mut commands);

    assert_eq!(outcome, Ok(TowerKind::Frost));
    assert_eq!(
        commands,
        vec![Command::PlaceTower {
            kind: TowerKind::Frost,
            position: WorldPoint::new(305.0, 250.0),
        }],
        "the world snaps the click, the builder forwards it untouched",
    );
}

#[test]
fn clearing_the_selection_disables_previews() {
    let mut builder = Builder::new();
    builder.select(Some(TowerKind::Blaster));
    builder.select(None);

    let preview = builder.preview(Some(WorldPoint::new(10.0, 10.0)), |_, point| Ok(point));

    assert_eq!(preview, None);
    assert_eq!(builder.selected(), None);
}

#[test]
fn preview_reports_rejections_on_the_snapped_cell() {
    let mut builder = Builder::new();
    builder.select(Some(TowerKind::Mortar));

    let preview = builder.preview(Some(WorldPoint::new(105.0, 95.0)), |_, _| {
        Err(PlacementError::OnPath)
    });

    assert_eq!(
        preview,
        Some(PlacementPreview {
            kind: TowerKind::Mortar,
            cell: WorldPointKey { x: 100, y: 100 },
            rejection: Some(PlacementError::OnPath),
        })
    );
    assert!(preview.is_some_and(|preview| !preview.placeable()));
}
