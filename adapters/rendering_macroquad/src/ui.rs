//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, Skin, Ui},
};
use waypoint_defence_core::PlayMode;
use waypoint_defence_rendering::{HudPresentation, TowerOffer, UiAction};

/// Outcome of rendering the control panel UI for the current frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ControlPanelUiResult {
    /// Commands raised by buttons pressed during this frame.
    pub actions: Vec<UiAction>,
}

/// Snapshot of the control panel's UI layout and data for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ControlPanelUiContext<'a> {
    /// Top-left corner of the panel in screen coordinates.
    pub origin: Vec2,
    /// Panel dimensions in screen space.
    pub size: Vec2,
    /// Background colour applied to the window skin so the UI matches the
    /// adapter's solid rectangle.
    pub background: Color,
    /// Economy and progression figures.
    pub hud: HudPresentation,
    /// Purchasable towers.
    pub build_menu: &'a [TowerOffer],
}

/// Outcome of the fatal error screen for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct FatalScreenResult {
    /// Whether the player asked to start over.
    pub restart_pressed: bool,
}

fn panel_skin(ui: &mut Ui, background: Color) -> Skin {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(background)
        .color_hovered(background)
        .color_clicked(background)
        .color_selected(background)
        .color_selected_hovered(background)
        .color_inactive(background)
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .margin(RectOffset::new(16.0, 16.0, 16.0, 16.0))
        .build();
    skin.window_style = window_style;

    let label_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 4.0))
        .build();
    skin.label_style = label_style;

    let button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(Color::from_rgba(70, 70, 70, 255))
        .color_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_clicked(Color::from_rgba(56, 56, 56, 255))
        .color_selected(Color::from_rgba(70, 70, 70, 255))
        .color_selected_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_inactive(Color::from_rgba(56, 56, 56, 200))
        .margin(RectOffset::new(0.0, 0.0, 8.0, 8.0))
        .build();
    skin.button_style = button_style;

    skin
}

/// Renders the control panel's interactive elements for the current frame.
pub(crate) fn draw_control_panel_ui(
    ui: &mut Ui,
    context: ControlPanelUiContext<'_>,
) -> ControlPanelUiResult {
    let skin = panel_skin(ui, context.background);
    ui.push_skin(&skin);

    let mut actions = Vec::new();
    let hud = context.hud;
    let _ = ui.window(hash!("control_panel"), context.origin, context.size, |ui| {
        ui.label(None, &format!("Money: ${}", hud.money));
        ui.label(None, &format!("Lives: {}", hud.lives));
        ui.label(None, &format!("Wave: {}", hud.wave));
        ui.label(None, mode_label(hud.play_mode));
        ui.label(
            None,
            if hud.oracle_live {
                "Waves: generated live"
            } else {
                "Waves: offline simulation"
            },
        );

        if hud.generating {
            ui.label(None, "Generating next wave...");
        } else if hud.play_mode == PlayMode::Attack {
            ui.label(None, &format!("Incoming: {}", hud.pending_enemies));
        }

        ui.separator();
        ui.label(None, "Build (1-4, Esc clears):");
        for offer in context.build_menu {
            if ui.button(None, offer_label(offer).as_str()) {
                let selection = if offer.selected { None } else { Some(offer.kind) };
                actions.push(UiAction::SelectTower(selection));
            }
        }

        ui.separator();
        if hud.can_start_wave() && ui.button(None, "Start Wave (Space)") {
            actions.push(UiAction::StartWave);
        }
        if hud.play_mode == PlayMode::GameOver && ui.button(None, "Restart (R)") {
            actions.push(UiAction::Restart);
        }
    });

    ui.pop_skin();

    ControlPanelUiResult { actions }
}

/// Renders the fatal error screen and its restart button.
pub(crate) fn draw_fatal_screen_ui(
    ui: &mut Ui,
    origin: Vec2,
    size: Vec2,
    message: &str,
) -> FatalScreenResult {
    let background = Color::from_rgba(60, 20, 24, 255);
    let skin = panel_skin(ui, background);
    ui.push_skin(&skin);

    let mut restart_pressed = false;
    let _ = ui.window(hash!("fatal_screen"), origin, size, |ui| {
        ui.label(None, "The game stopped after an internal error.");
        for line in crate::wrap_text(message, 48) {
            ui.label(None, &line);
        }
        ui.separator();
        restart_pressed = ui.button(None, "Restart");
    });

    ui.pop_skin();

    FatalScreenResult { restart_pressed }
}

fn mode_label(mode: PlayMode) -> &'static str {
    match mode {
        PlayMode::Builder => "Mode: Builder",
        PlayMode::Attack => "Mode: Attack",
        PlayMode::GameOver => "Mode: Game Over",
    }
}

pub(crate) fn offer_label(offer: &TowerOffer) -> String {
    let marker = if offer.selected { ">" } else { " " };
    let price = if offer.affordable {
        format!("${}", offer.cost)
    } else {
        format!("(${})", offer.cost)
    };
    format!(
        "{marker} {} {price} R{:.0} D{:.0}",
        offer.name, offer.range, offer.damage
    )
}
