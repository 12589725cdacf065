#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Waypoint Defence.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The adapter uses Macroquad's immediate-mode UI module for the control
//! panel and the fatal error screen. All UI-specific calls live inside the
//! local `ui` module to avoid leaking Macroquad UI types throughout the
//! renderer.

mod ui;

use self::ui::{
    draw_control_panel_ui, draw_fatal_screen_ui, ControlPanelUiContext, ControlPanelUiResult,
    FatalScreenResult,
};
use anyhow::Result;
use glam::Vec2;
use macroquad::math::Vec2 as MacroquadVec2;
use macroquad::{
    color::BLACK,
    input::{is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton},
};
use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    time::{Duration, Instant},
};
use waypoint_defence_core::{PlayMode, TowerKind};
use waypoint_defence_rendering::{
    Color, EnemyPresentation, FieldPresentation, FrameInput, FrameSimulationBreakdown,
    MessageLine, ParticlePresentation, Presentation, ProjectilePresentation, RenderingBackend,
    Scene, TowerPresentation, TowerPreview, UiAction,
};

const MESSAGE_FONT_SIZE: f32 = 18.0;
const MESSAGE_LINE_HEIGHT: f32 = 20.0;
const MESSAGE_WRAP_COLUMNS: usize = 34;
const PANEL_WIDGET_HEIGHT: f32 = 420.0;

/// Tracks UI-sourced interactions so they can be merged with physical input on the next frame.
#[doc(hidden)]
#[derive(Clone, Debug, Default)]
pub struct ControlPanelInputState {
    latched: Vec<UiAction>,
}

impl ControlPanelInputState {
    /// Records an action requested through the control panel this frame.
    pub fn register(&mut self, action: UiAction) {
        self.latched.push(action);
    }

    /// Returns the latched actions in the order they were raised, clearing the
    /// latch so each action fires only once.
    pub fn take_actions(&mut self) -> Vec<UiAction> {
        std::mem::take(&mut self.latched)
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` quits the game loop.
    quit_requested: bool,
    /// `Space` or `Enter` requests the next wave.
    start_wave: bool,
    /// `Escape` clears the tower selection.
    cancel: bool,
    /// `R` restarts after game over.
    restart: bool,
    /// `1` to `4` select a tower from the build menu.
    select: Option<usize>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let select = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3, KeyCode::Key4]
            .iter()
            .position(|key| is_key_pressed(*key));

        Self {
            quit_requested: is_key_pressed(KeyCode::Q),
            start_wave: is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter),
            cancel: is_key_pressed(KeyCode::Escape),
            restart: is_key_pressed(KeyCode::R),
            select,
        }
    }

    fn actions(&self, scene: &Scene) -> Vec<UiAction> {
        let mut actions = Vec::new();
        if let Some(kind) = self.select.and_then(|index| TowerKind::ALL.get(index)) {
            actions.push(UiAction::SelectTower(Some(*kind)));
        }
        if self.start_wave && scene.hud.can_start_wave() {
            actions.push(UiAction::StartWave);
        }
        if self.restart && scene.hud.play_mode == PlayMode::GameOver {
            actions.push(UiAction::Restart);
        }
        actions
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    simulation: Duration,
    scene_population: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    simulation_accum: Duration,
    scene_population_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    avg_simulation: Duration,
    avg_scene_population: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the averages once one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.simulation_accum += breakdown.simulation;
        self.scene_population_accum += breakdown.scene_population;
        self.render_accum += breakdown.render;

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames.max(1);
        let metrics = FpsMetrics {
            per_second: self.frames as f32 / seconds,
            avg_simulation: self.simulation_accum / frames,
            avg_scene_population: self.scene_population_accum / frames,
            avg_render: self.render_accum / frames,
        };
        *self = Self::default();
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameSimulationBreakdown + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let panel_width = scene.control_panel.map(|panel| panel.width).unwrap_or(0.0);
        let mut config = macroquad::window::Conf {
            window_title,
            window_width: (scene.field.width + panel_width).round() as i32,
            window_height: scene.field.height.round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut control_panel_input = ControlPanelInputState::default();
            let mut fatal_error: Option<String> = None;

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();

                if let Some(message) = fatal_error.as_deref() {
                    let width = (screen_width * 0.6).max(320.0);
                    let height = (screen_height * 0.4).max(200.0);
                    let origin = MacroquadVec2::new(
                        (screen_width - width) * 0.5,
                        (screen_height - height) * 0.5,
                    );
                    let FatalScreenResult { restart_pressed } = {
                        let mut fatal_ui = macroquad::ui::root_ui();
                        draw_fatal_screen_ui(
                            &mut fatal_ui,
                            origin,
                            MacroquadVec2::new(width, height),
                            message,
                        )
                    };
                    if restart_pressed || keyboard.restart {
                        control_panel_input.register(UiAction::Restart);
                        fatal_error = None;
                    }
                    macroquad::window::next_frame().await;
                    continue;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);

                let mut actions = control_panel_input.take_actions();
                actions.extend(keyboard.actions(&scene));
                let frame_input = gather_frame_input(&scene, &metrics, keyboard.cancel, actions);

                let simulation_breakdown = match panic::catch_unwind(AssertUnwindSafe(|| {
                    update_scene(frame_dt, frame_input, &mut scene)
                })) {
                    Ok(breakdown) => breakdown,
                    Err(payload) => {
                        let message = panic_message(payload.as_ref());
                        tracing::warn!(%message, "frame update panicked, showing fatal screen");
                        fatal_error = Some(message);
                        FrameSimulationBreakdown::default()
                    }
                };

                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);
                let render_start = Instant::now();

                draw_field(&scene.field, scene.hud.play_mode, &metrics);
                if let Some(preview) = active_builder_preview(&scene) {
                    draw_range_indicator(preview.center, preview.range(), &metrics);
                }
                draw_towers(&scene.towers, &metrics);
                draw_enemies(&scene.enemies, &metrics);
                draw_projectiles(&scene.projectiles, &metrics);
                draw_particles(&scene.particles, &metrics);
                if let Some(preview) = active_builder_preview(&scene) {
                    draw_tower_preview(preview, scene.field.grid_size, &metrics);
                }

                if let Some(panel_context) =
                    draw_control_panel(&scene, screen_width, screen_height)
                {
                    let mut control_panel_ui = macroquad::ui::root_ui();
                    let ControlPanelUiResult { actions } =
                        draw_control_panel_ui(&mut control_panel_ui, panel_context);
                    for action in actions {
                        control_panel_input.register(action);
                    }
                    draw_message_log(
                        &scene.messages,
                        panel_context.origin.x,
                        PANEL_WIDGET_HEIGHT,
                        screen_height,
                    );
                }

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    simulation: simulation_breakdown.simulation,
                    scene_population: simulation_breakdown.scene_population,
                    render: render_start.elapsed(),
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        avg_simulation,
                        avg_scene_population,
                        avg_render,
                    }) = fps_metrics
                    {
                        println!(
                            "FPS: {:.2} | sim: {:>6.2}ms scene: {:>6.2}ms render: {:>6.2}ms",
                            per_second,
                            avg_simulation.as_secs_f64() * 1_000.0,
                            avg_scene_population.as_secs_f64() * 1_000.0,
                            avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_owned()
    }
}

/// Splits `text` into lines of at most `columns` characters at word boundaries.
pub(crate) fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > columns && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[derive(Clone, Copy, Debug)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    field_width_scaled: f32,
    field_height_scaled: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let field = &scene.field;
        let panel_width = scene
            .control_panel
            .map(|panel| panel.width.max(0.0))
            .unwrap_or(0.0)
            .min(screen_width);
        let available_width = (screen_width - panel_width).max(0.0);
        let scale = (available_width / field.width)
            .min(screen_height / field.height)
            .max(0.0);

        let field_width_scaled = field.width * scale;
        let field_height_scaled = field.height * scale;

        Self {
            scale,
            offset_x: ((available_width - field_width_scaled) * 0.5).max(0.0),
            offset_y: ((screen_height - field_height_scaled) * 0.5).max(0.0),
            field_width_scaled,
            field_height_scaled,
        }
    }

    fn to_screen(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + position.x * self.scale,
            self.offset_y + position.y * self.scale,
        )
    }

    fn to_world(&self, position: Vec2) -> Option<Vec2> {
        if self.scale <= f32::EPSILON {
            return None;
        }
        Some(Vec2::new(
            (position.x - self.offset_x) / self.scale,
            (position.y - self.offset_y) / self.scale,
        ))
    }
}

fn gather_frame_input(
    scene: &Scene,
    metrics: &SceneMetrics,
    cancel: bool,
    actions: Vec<UiAction>,
) -> FrameInput {
    let (cursor_x, cursor_y) = mouse_position();
    let confirm_click = is_mouse_button_pressed(MouseButton::Left);
    let cancel_click = is_mouse_button_pressed(MouseButton::Right);
    gather_frame_input_from_observations(
        scene,
        metrics,
        Vec2::new(cursor_x, cursor_y),
        confirm_click,
        cancel || cancel_click,
        actions,
    )
}

fn gather_frame_input_from_observations(
    scene: &Scene,
    metrics: &SceneMetrics,
    cursor_position: Vec2,
    confirm_click: bool,
    cancel: bool,
    actions: Vec<UiAction>,
) -> FrameInput {
    let mut input = FrameInput {
        cancel_action: cancel,
        actions,
        ..FrameInput::default()
    };

    let Some(world_position) = metrics.to_world(cursor_position) else {
        return input;
    };

    if scene.field.contains(world_position) {
        input.cursor_world_space = Some(world_position);
        input.confirm_action = confirm_click;
    }

    input
}

fn draw_control_panel<'a>(
    scene: &'a Scene,
    screen_width: f32,
    screen_height: f32,
) -> Option<ControlPanelUiContext<'a>> {
    let panel = scene.control_panel?;
    if panel.width <= f32::EPSILON {
        return None;
    }

    let left = (screen_width - panel.width).max(0.0);
    let background_color = to_macroquad_color(panel.background);
    macroquad::shapes::draw_rectangle(left, 0.0, panel.width, screen_height, background_color);

    Some(ControlPanelUiContext {
        origin: MacroquadVec2::new(left, 0.0),
        size: MacroquadVec2::new(panel.width, PANEL_WIDGET_HEIGHT.min(screen_height)),
        background: background_color,
        hud: scene.hud,
        build_menu: &scene.build_menu,
    })
}

fn draw_message_log(messages: &[MessageLine], left: f32, top: f32, screen_height: f32) {
    let mut lines = Vec::new();
    for message in messages {
        for line in wrap_text(&message.text, MESSAGE_WRAP_COLUMNS) {
            lines.push((line, message.tone.color()));
        }
    }

    let capacity = ((screen_height - top - 16.0) / MESSAGE_LINE_HEIGHT).max(0.0) as usize;
    let skip = lines.len().saturating_sub(capacity);
    for (index, (line, color)) in lines.iter().skip(skip).enumerate() {
        let baseline = top + 16.0 + MESSAGE_LINE_HEIGHT * (index as f32 + 1.0);
        let _ = macroquad::text::draw_text(
            line,
            left + 16.0,
            baseline,
            MESSAGE_FONT_SIZE,
            to_macroquad_color(*color),
        );
    }
}

fn active_builder_preview(scene: &Scene) -> Option<TowerPreview> {
    if scene.hud.play_mode == PlayMode::Builder {
        scene.tower_preview
    } else {
        None
    }
}

fn draw_field(field: &FieldPresentation, play_mode: PlayMode, metrics: &SceneMetrics) {
    macroquad::shapes::draw_rectangle(
        metrics.offset_x,
        metrics.offset_y,
        metrics.field_width_scaled,
        metrics.field_height_scaled,
        to_macroquad_color(field.ground_color),
    );

    if play_mode == PlayMode::Builder {
        draw_grid(field, metrics);
    }

    let band = field.path_width() * metrics.scale;
    let path_color = to_macroquad_color(field.path_color);
    for segment in field.path.windows(2) {
        let start = metrics.to_screen(segment[0]);
        let end = metrics.to_screen(segment[1]);
        macroquad::shapes::draw_line(start.x, start.y, end.x, end.y, band, path_color);
    }
    for waypoint in &field.path {
        let centre = metrics.to_screen(*waypoint);
        macroquad::shapes::draw_circle(centre.x, centre.y, band * 0.5, path_color);
    }
}

fn draw_grid(field: &FieldPresentation, metrics: &SceneMetrics) {
    let step = field.grid_size * metrics.scale;
    if step <= f32::EPSILON {
        return;
    }

    let color = to_macroquad_color(field.grid_color);
    let columns = (field.width / field.grid_size).floor() as u32;
    let rows = (field.height / field.grid_size).floor() as u32;
    for column in 0..=columns {
        let x = metrics.offset_x + column as f32 * step;
        macroquad::shapes::draw_line(
            x,
            metrics.offset_y,
            x,
            metrics.offset_y + metrics.field_height_scaled,
            1.0,
            color,
        );
    }
    for row in 0..=rows {
        let y = metrics.offset_y + row as f32 * step;
        macroquad::shapes::draw_line(
            metrics.offset_x,
            y,
            metrics.offset_x + metrics.field_width_scaled,
            y,
            1.0,
            color,
        );
    }
}

fn draw_range_indicator(center: Vec2, range: f32, metrics: &SceneMetrics) {
    let radius = range * metrics.scale;
    if radius <= f32::EPSILON {
        return;
    }

    let centre = metrics.to_screen(center);
    let fill = macroquad::color::Color::new(1.0, 1.0, 1.0, 0.08);
    let outline = macroquad::color::Color::new(1.0, 1.0, 1.0, 0.35);
    macroquad::shapes::draw_circle(centre.x, centre.y, radius, fill);
    macroquad::shapes::draw_circle_lines(centre.x, centre.y, radius, 1.0, outline);
}

fn draw_towers(towers: &[TowerPresentation], metrics: &SceneMetrics) {
    let half = 15.0 * metrics.scale;
    for tower in towers {
        let centre = metrics.to_screen(tower.position);
        let base = tower.color();
        let body = if tower.reloading {
            base
        } else {
            base.lighten(0.25)
        };
        macroquad::shapes::draw_rectangle(
            centre.x - half,
            centre.y - half,
            half * 2.0,
            half * 2.0,
            to_macroquad_color(body),
        );
        macroquad::shapes::draw_rectangle_lines(
            centre.x - half,
            centre.y - half,
            half * 2.0,
            half * 2.0,
            2.0,
            BLACK,
        );
        macroquad::shapes::draw_circle(
            centre.x,
            centre.y,
            half * 0.45,
            to_macroquad_color(base.lighten(0.6)),
        );
    }
}

fn draw_enemies(enemies: &[EnemyPresentation], metrics: &SceneMetrics) {
    for enemy in enemies {
        let centre = metrics.to_screen(enemy.position);
        let radius = enemy.radius * metrics.scale;
        macroquad::shapes::draw_circle(centre.x, centre.y, radius, to_macroquad_color(enemy.color));
        let outline = if enemy.slowed {
            macroquad::color::Color::new(0.5, 0.86, 1.0, 1.0)
        } else {
            BLACK
        };
        macroquad::shapes::draw_circle_lines(
            centre.x,
            centre.y,
            radius,
            (radius * 0.15).max(1.0),
            outline,
        );

        let bar_width = radius * 2.0;
        let bar_height = (4.0 * metrics.scale).max(2.0);
        let bar_left = centre.x - radius;
        let bar_top = centre.y - radius - bar_height - 3.0;
        macroquad::shapes::draw_rectangle(bar_left, bar_top, bar_width, bar_height, BLACK);
        let fill_width = bar_width * enemy.health_fraction;
        if fill_width > f32::EPSILON {
            let fill = macroquad::color::Color::new(
                1.0 - enemy.health_fraction,
                0.8 * enemy.health_fraction,
                0.1,
                1.0,
            );
            macroquad::shapes::draw_rectangle(bar_left, bar_top, fill_width, bar_height, fill);
        }
    }
}

fn draw_projectiles(projectiles: &[ProjectilePresentation], metrics: &SceneMetrics) {
    for projectile in projectiles {
        let centre = metrics.to_screen(projectile.position);
        macroquad::shapes::draw_circle(
            centre.x,
            centre.y,
            (projectile.radius * metrics.scale).max(1.0),
            to_macroquad_color(projectile.color),
        );
    }
}

fn draw_particles(particles: &[ParticlePresentation], metrics: &SceneMetrics) {
    for particle in particles {
        let centre = metrics.to_screen(particle.position);
        macroquad::shapes::draw_circle(
            centre.x,
            centre.y,
            (particle.size * metrics.scale).max(0.5),
            to_macroquad_color(particle.color),
        );
    }
}

fn draw_tower_preview(preview: TowerPreview, grid_size: f32, metrics: &SceneMetrics) {
    let Some((x, y, size)) = preview_square(preview, grid_size, metrics) else {
        return;
    };

    let (fill_color, outline_color) = if preview.placeable {
        let base = Color::from_rgb_u8(78, 128, 52);
        let outline = base.lighten(0.4);
        (base.with_alpha(0.35), outline.with_alpha(0.7))
    } else {
        let base = Color::from_rgb_u8(176, 52, 68);
        let outline = base.lighten(0.3);
        (base.with_alpha(0.45), outline.with_alpha(0.8))
    };

    macroquad::shapes::draw_rectangle(x, y, size, size, to_macroquad_color(fill_color));
    macroquad::shapes::draw_rectangle_lines(
        x,
        y,
        size,
        size,
        (size * 0.05).max(1.0),
        to_macroquad_color(outline_color),
    );
}

fn preview_square(
    preview: TowerPreview,
    grid_size: f32,
    metrics: &SceneMetrics,
) -> Option<(f32, f32, f32)> {
    let size = grid_size * metrics.scale;
    if size <= f32::EPSILON {
        return None;
    }

    let centre = metrics.to_screen(preview.center);
    Some((centre.x - size * 0.5, centre.y - size * 0.5, size))
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_defence_core::{PlacementError, WAYPOINTS};
    use waypoint_defence_rendering::{
        to_vec2, ControlPanelView, HudPresentation, TowerOffer,
    };

    fn scene() -> Scene {
        let field = FieldPresentation::new(
            800.0,
            600.0,
            40.0,
            WAYPOINTS.iter().copied().map(to_vec2).collect(),
        )
        .expect("valid field");
        let hud = HudPresentation {
            money: 150,
            lives: 20,
            wave: 0,
            play_mode: PlayMode::Builder,
            generating: false,
            oracle_live: false,
            pending_enemies: 0,
        };
        Scene::new(
            field,
            hud,
            Some(ControlPanelView::new(
                280.0,
                Color::from_rgb_u8(30, 30, 30),
            )),
        )
    }

    #[test]
    fn metrics_fit_field_beside_the_panel() {
        let metrics = SceneMetrics::from_scene(&scene(), 1080.0, 600.0);

        assert!((metrics.scale - 1.0).abs() < f32::EPSILON);
        assert_eq!(metrics.offset_x, 0.0);
        assert_eq!(metrics.to_screen(Vec2::new(100.0, 50.0)), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn metrics_round_trip_cursor_positions_when_scaled() {
        let metrics = SceneMetrics::from_scene(&scene(), 680.0, 300.0);

        assert!((metrics.scale - 0.5).abs() < f32::EPSILON);
        let world = metrics
            .to_world(Vec2::new(200.0, 100.0))
            .expect("scaled metrics map back to world");
        assert_eq!(world, Vec2::new(400.0, 200.0));
    }

    #[test]
    fn clicks_outside_the_field_do_not_confirm() {
        let scene = scene();
        let metrics = SceneMetrics::from_scene(&scene, 1080.0, 600.0);

        let on_panel = gather_frame_input_from_observations(
            &scene,
            &metrics,
            Vec2::new(900.0, 100.0),
            true,
            false,
            Vec::new(),
        );
        assert!(!on_panel.confirm_action);
        assert!(on_panel.cursor_world_space.is_none());

        let on_field = gather_frame_input_from_observations(
            &scene,
            &metrics,
            Vec2::new(380.0, 220.0),
            true,
            false,
            vec![UiAction::StartWave],
        );
        assert!(on_field.confirm_action);
        assert_eq!(on_field.cursor_world_space, Some(Vec2::new(380.0, 220.0)));
        assert_eq!(on_field.actions, vec![UiAction::StartWave]);
    }

    #[test]
    fn preview_square_is_centred_on_the_cell() {
        let scene = scene();
        let metrics = SceneMetrics::from_scene(&scene, 1080.0, 600.0);
        let preview = TowerPreview::new(
            TowerKind::Blaster,
            Vec2::new(60.0, 60.0),
            false,
            Some(PlacementError::OnPath),
        );

        assert_eq!(
            preview_square(preview, scene.field.grid_size, &metrics),
            Some((40.0, 40.0, 40.0))
        );
    }

    #[test]
    fn wrap_text_breaks_at_word_boundaries() {
        let lines = wrap_text("Wave 3 approaches from the north ridge", 12);

        assert_eq!(lines, vec!["Wave 3", "approaches", "from the", "north ridge"]);
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn panic_payloads_are_described() {
        let text: Box<dyn Any + Send> = Box::new("boom");
        let owned: Box<dyn Any + Send> = Box::new(String::from("bang"));
        let other: Box<dyn Any + Send> = Box::new(7_u8);

        assert_eq!(panic_message(text.as_ref()), "boom");
        assert_eq!(panic_message(owned.as_ref()), "bang");
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }

    #[test]
    fn offer_labels_mark_selection_and_price() {
        let offers = TowerOffer::catalogue(60, Some(TowerKind::Blaster));

        assert_eq!(ui::offer_label(&offers[0]), "> Blaster $50 R120 D10");
        assert!(ui::offer_label(&offers[1]).contains("($120)"));
    }
}
