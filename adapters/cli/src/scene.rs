//! Translation between the simulation and the rendering contract.

use anyhow::{Context, Result};
use glam::Vec2;
use waypoint_defence_core::{FIELD_HEIGHT, FIELD_WIDTH};
use waypoint_defence_rendering::{
    to_vec2, to_world_point, Color, ControlPanelView, EnemyPresentation, FieldPresentation,
    FrameInput, HudPresentation, MessageLine, MessageTone, ParticlePresentation,
    ProjectilePresentation, Scene, TowerOffer, TowerPresentation, TowerPreview, UiAction,
};
use waypoint_defence_simulation::{MessageKind, Simulation};

const CONTROL_PANEL_WIDTH: f32 = 300.0;

/// Builds the initial scene for `simulation`.
pub(crate) fn initial_scene(simulation: &Simulation) -> Result<Scene> {
    let field = FieldPresentation::new(
        FIELD_WIDTH,
        FIELD_HEIGHT,
        simulation.grid_size(),
        simulation.path().iter().copied().map(to_vec2).collect(),
    )
    .context("failed to describe the play field")?;

    let mut scene = Scene::new(
        field,
        hud(simulation),
        Some(ControlPanelView::new(
            CONTROL_PANEL_WIDTH,
            Color::from_rgb_u8(0x22, 0x24, 0x2b),
        )),
    );
    populate_scene(simulation, None, &mut scene);
    Ok(scene)
}

/// Forwards the player's input for this frame to the simulation.
pub(crate) fn apply_input(simulation: &mut Simulation, input: &FrameInput) {
    for action in &input.actions {
        match action {
            UiAction::StartWave => {
                let _ = simulation.start_next_wave();
            }
            UiAction::SelectTower(kind) => simulation.select_tower_type(*kind),
            UiAction::Restart => simulation.restart(),
        }
    }

    if input.cancel_action {
        simulation.select_tower_type(None);
    }

    if input.confirm_action {
        if let Some(cursor) = input.cursor_world_space {
            let _ = simulation.place_tower_at(to_world_point(cursor));
        }
    }
}

/// Refreshes every scene channel from the simulation's read-only views.
pub(crate) fn populate_scene(simulation: &Simulation, cursor: Option<Vec2>, scene: &mut Scene) {
    scene.enemies.clear();
    scene
        .enemies
        .extend(simulation.enemies().iter().map(EnemyPresentation::from_snapshot));

    scene.towers.clear();
    scene
        .towers
        .extend(simulation.towers().iter().map(TowerPresentation::from_snapshot));

    scene.projectiles.clear();
    scene.projectiles.extend(
        simulation
            .projectiles()
            .iter()
            .map(ProjectilePresentation::from_snapshot),
    );

    scene.particles.clear();
    scene.particles.extend(
        simulation
            .particles()
            .iter()
            .map(ParticlePresentation::from_snapshot),
    );

    scene.tower_preview = simulation
        .preview(cursor.map(to_world_point))
        .map(|preview| {
            TowerPreview::new(
                preview.kind,
                to_vec2(preview.cell.to_point()),
                preview.placeable(),
                preview.rejection,
            )
        });

    scene.hud = hud(simulation);
    scene.build_menu = TowerOffer::catalogue(scene.hud.money, simulation.selected_tower());

    scene.messages.clear();
    scene.messages.extend(simulation.messages().iter().map(|message| MessageLine {
        tone: tone(message.kind),
        text: message.text.clone(),
    }));
}

fn hud(simulation: &Simulation) -> HudPresentation {
    let status = simulation.status();
    HudPresentation {
        money: status.money,
        lives: status.lives,
        wave: status.wave,
        play_mode: status.mode,
        generating: simulation.is_generating(),
        oracle_live: simulation.oracle_is_live(),
        pending_enemies: simulation.pending_enemies(),
    }
}

fn tone(kind: MessageKind) -> MessageTone {
    match kind {
        MessageKind::Briefing => MessageTone::Briefing,
        MessageKind::Advice => MessageTone::Advice,
        MessageKind::Notice => MessageTone::Notice,
        MessageKind::Warning => MessageTone::Warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_defence_core::{PlayMode, TowerKind};
    use waypoint_defence_oracle::OfflineOracle;
    use waypoint_defence_simulation::SimulationConfig;

    fn simulation() -> Simulation {
        Simulation::new(SimulationConfig::default(), Box::new(OfflineOracle::new()))
    }

    fn input(actions: Vec<UiAction>) -> FrameInput {
        FrameInput {
            actions,
            ..FrameInput::default()
        }
    }

    #[test]
    fn initial_scene_describes_the_path_and_menu() {
        let simulation = simulation();
        let scene = initial_scene(&simulation).expect("default field is valid");

        assert_eq!(scene.field.path.len(), simulation.path().len());
        assert_eq!(scene.build_menu.len(), TowerKind::ALL.len());
        assert_eq!(scene.hud.money, 150);
        assert!(!scene.hud.oracle_live);
        assert_eq!(
            scene.messages.first().map(|line| line.tone),
            Some(MessageTone::Notice)
        );
    }

    #[test]
    fn selecting_and_clicking_builds_a_tower() {
        let mut simulation = simulation();
        let mut scene = initial_scene(&simulation).expect("default field is valid");

        apply_input(
            &mut simulation,
            &input(vec![UiAction::SelectTower(Some(TowerKind::Blaster))]),
        );
        let click = FrameInput {
            cursor_world_space: Some(Vec2::new(385.0, 225.0)),
            confirm_action: true,
            ..FrameInput::default()
        };
        apply_input(&mut simulation, &click);
        populate_scene(&simulation, click.cursor_world_space, &mut scene);

        assert_eq!(scene.towers.len(), 1);
        assert_eq!(scene.towers[0].position, Vec2::new(380.0, 220.0));
        assert_eq!(scene.hud.money, 100);
        assert_eq!(scene.selected_tower(), Some(TowerKind::Blaster));
        let preview = scene.tower_preview.expect("selection previews the hovered cell");
        assert!(!preview.placeable, "the hovered cell is now occupied");
    }

    #[test]
    fn cancel_clears_the_selection() {
        let mut simulation = simulation();
        apply_input(
            &mut simulation,
            &input(vec![UiAction::SelectTower(Some(TowerKind::Frost))]),
        );
        apply_input(
            &mut simulation,
            &FrameInput {
                cancel_action: true,
                ..FrameInput::default()
            },
        );

        assert_eq!(simulation.selected_tower(), None);
    }

    #[test]
    fn start_wave_action_enters_attack_after_the_reply() {
        let mut simulation = simulation();
        let mut scene = initial_scene(&simulation).expect("default field is valid");

        apply_input(&mut simulation, &input(vec![UiAction::StartWave]));
        populate_scene(&simulation, None, &mut scene);
        assert!(scene.hud.generating);

        simulation.update();
        populate_scene(&simulation, None, &mut scene);
        assert_eq!(scene.hud.play_mode, PlayMode::Attack);
        assert_eq!(scene.hud.wave, 1);
        assert!(scene
            .messages
            .iter()
            .any(|line| line.tone == MessageTone::Briefing));
    }
}
