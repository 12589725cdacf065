#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Waypoint Defence adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::time::Duration;
use thiserror::Error;
use waypoint_defence_core::{
    EnemySnapshot, ParticleSnapshot, PlacementError, PlayMode, ProjectileSnapshot, Rgb,
    TowerId, TowerKind, TowerSnapshot, WorldPoint,
};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with the alpha channel replaced.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb_u8(rgb.red(), rgb.green(), rgb.blue())
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Converts a world point into the vector type used by the rendering contract.
#[must_use]
pub fn to_vec2(point: WorldPoint) -> Vec2 {
    Vec2::new(point.x(), point.y())
}

/// Converts a rendering vector back into a world point.
#[must_use]
pub fn to_world_point(position: Vec2) -> WorldPoint {
    WorldPoint::new(position.x, position.y)
}

/// Player command raised by the control panel or a keyboard shortcut.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    /// Request the next wave.
    StartWave,
    /// Select a tower type in the build menu, or clear the selection.
    SelectTower(Option<TowerKind>),
    /// Throw away the current game and start over.
    Restart,
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Cursor position expressed in world units, present while hovering the field.
    pub cursor_world_space: Option<Vec2>,
    /// Whether the adapter detected a placement click on the field this frame.
    pub confirm_action: bool,
    /// Whether the adapter detected a request to clear the tower selection.
    pub cancel_action: bool,
    /// Commands raised through the control panel or shortcuts, in order.
    pub actions: Vec<UiAction>,
}

/// Describes the play field and the path drawn across it.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldPresentation {
    /// Width of the field in world units.
    pub width: f32,
    /// Height of the field in world units.
    pub height: f32,
    /// Side length of a placement cell.
    pub grid_size: f32,
    /// Waypoints of the enemy path in world units.
    pub path: Vec<Vec2>,
    /// Fill colour of the field.
    pub ground_color: Color,
    /// Fill colour of the path band.
    pub path_color: Color,
    /// Colour of the placement grid lines drawn in builder mode.
    pub grid_color: Color,
}

impl FieldPresentation {
    /// Creates a new field descriptor.
    ///
    /// Returns an error when the field or grid has no area, or when the path
    /// has fewer than two waypoints.
    pub fn new(
        width: f32,
        height: f32,
        grid_size: f32,
        path: Vec<Vec2>,
    ) -> std::result::Result<Self, RenderingError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(RenderingError::InvalidFieldSize { width, height });
        }
        if !grid_size.is_finite() || grid_size <= 0.0 {
            return Err(RenderingError::InvalidGridSize { grid_size });
        }
        if path.len() < 2 {
            return Err(RenderingError::DegeneratePath { points: path.len() });
        }

        Ok(Self {
            width,
            height,
            grid_size,
            path,
            ground_color: Color::from_rgb_u8(0x1b, 0x2a, 0x1f),
            path_color: Color::from_rgb_u8(0x6b, 0x5a, 0x3e),
            grid_color: Color::from_rgb_u8(0x2c, 0x3e, 0x30),
        })
    }

    /// Width of the band drawn along the path.
    #[must_use]
    pub fn path_width(&self) -> f32 {
        self.grid_size
    }

    /// Reports whether the position lies on the field.
    #[must_use]
    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= 0.0
            && position.y >= 0.0
            && position.x < self.width
            && position.y < self.height
    }
}

/// Enemy rendered as a filled circle with a health bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Centre of the enemy in world units.
    pub position: Vec2,
    /// Body radius in world units.
    pub radius: f32,
    /// Body colour.
    pub color: Color,
    /// Remaining health in the range 0.0..=1.0.
    pub health_fraction: f32,
    /// Whether the enemy currently suffers from a slow effect.
    pub slowed: bool,
}

impl EnemyPresentation {
    /// Creates a new enemy descriptor, clamping the health fraction into range.
    #[must_use]
    pub fn new(
        position: Vec2,
        radius: f32,
        color: Color,
        health_fraction: f32,
        slowed: bool,
    ) -> Self {
        let health_fraction = if health_fraction.is_finite() {
            health_fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            position,
            radius,
            color,
            health_fraction,
            slowed,
        }
    }

    /// Builds the descriptor of a world enemy.
    #[must_use]
    pub fn from_snapshot(enemy: &EnemySnapshot) -> Self {
        Self::new(
            to_vec2(enemy.position),
            enemy.kind.radius(),
            Color::from(enemy.kind.color()),
            enemy.health_fraction(),
            enemy.slow_frames > 0,
        )
    }
}

/// Tower rendered at its cell centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerPresentation {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of the tower.
    pub kind: TowerKind,
    /// Cell centre in world units.
    pub position: Vec2,
    /// Firing range in world units.
    pub range: f32,
    /// Whether the tower is still reloading.
    pub reloading: bool,
}

impl TowerPresentation {
    /// Builds the descriptor of a world tower.
    #[must_use]
    pub fn from_snapshot(tower: &TowerSnapshot) -> Self {
        Self {
            id: tower.id,
            kind: tower.kind,
            position: to_vec2(tower.position),
            range: tower.kind.range(),
            reloading: tower.cooldown > 0,
        }
    }

    /// Fill colour of the tower body.
    #[must_use]
    pub fn color(&self) -> Color {
        Color::from(self.kind.color())
    }
}

/// Projectile rendered as a small dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectilePresentation {
    /// Current position in world units.
    pub position: Vec2,
    /// Dot radius in world units.
    pub radius: f32,
    /// Dot colour, derived from the projectile's effect.
    pub color: Color,
}

impl ProjectilePresentation {
    /// Builds the descriptor of a projectile in flight.
    #[must_use]
    pub fn from_snapshot(projectile: &ProjectileSnapshot) -> Self {
        let (radius, color) = if projectile.splash {
            (4.0, Color::from_rgb_u8(0xff, 0x8c, 0x42))
        } else if projectile.slow_frames > 0 {
            (3.0, Color::from_rgb_u8(0x7f, 0xdb, 0xff))
        } else {
            (2.5, Color::from_rgb_u8(0xf2, 0xea, 0x40))
        };
        Self {
            position: to_vec2(projectile.position),
            radius,
            color,
        }
    }
}

/// Cosmetic particle fading out over its lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticlePresentation {
    /// Current position in world units.
    pub position: Vec2,
    /// Radius in world units.
    pub size: f32,
    /// Colour with the remaining lifetime folded into the alpha channel.
    pub color: Color,
}

impl ParticlePresentation {
    /// Builds the descriptor of a live particle.
    #[must_use]
    pub fn from_snapshot(particle: &ParticleSnapshot) -> Self {
        Self {
            position: to_vec2(particle.position),
            size: particle.size,
            color: Color::from(particle.color).with_alpha(particle.life_fraction),
        }
    }
}

/// Declarative builder-mode preview of the hovered cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerPreview {
    /// Kind of tower proposed for placement.
    pub kind: TowerKind,
    /// Centre of the hovered cell.
    pub center: Vec2,
    /// Indicates whether the preview location is valid for placement.
    pub placeable: bool,
    /// Reason reported by the world for rejecting the placement attempt, if any.
    pub rejection: Option<PlacementError>,
}

impl TowerPreview {
    /// Creates a new tower preview descriptor.
    #[must_use]
    pub const fn new(
        kind: TowerKind,
        center: Vec2,
        placeable: bool,
        rejection: Option<PlacementError>,
    ) -> Self {
        let placeable = if rejection.is_some() {
            false
        } else {
            placeable
        };

        Self {
            kind,
            center,
            placeable,
            rejection,
        }
    }

    /// Firing range of the previewed tower.
    #[must_use]
    pub fn range(&self) -> f32 {
        self.kind.range()
    }
}

/// Economy and progression figures shown in the control panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudPresentation {
    /// Money available for purchases.
    pub money: u32,
    /// Lives the base has left.
    pub lives: u32,
    /// Number of the current or last wave.
    pub wave: u32,
    /// Active play mode.
    pub play_mode: PlayMode,
    /// Whether the next wave is still being generated.
    pub generating: bool,
    /// Whether waves come from the remote service.
    pub oracle_live: bool,
    /// Enemies waiting in the spawn queue.
    pub pending_enemies: u32,
}

impl HudPresentation {
    /// Reports whether the start-wave command would be accepted.
    #[must_use]
    pub fn can_start_wave(&self) -> bool {
        self.play_mode == PlayMode::Builder && !self.generating
    }
}

/// Purchasable tower listed in the build menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerOffer {
    /// Kind of tower offered.
    pub kind: TowerKind,
    /// Display name.
    pub name: &'static str,
    /// Purchase price.
    pub cost: u32,
    /// Firing range in world units.
    pub range: f32,
    /// Damage per projectile.
    pub damage: f32,
    /// Whether the player can currently afford the tower.
    pub affordable: bool,
    /// Whether the tower is the active selection.
    pub selected: bool,
}

impl TowerOffer {
    /// Describes `kind` for a player holding `money`.
    #[must_use]
    pub fn new(kind: TowerKind, money: u32, selected: Option<TowerKind>) -> Self {
        Self {
            kind,
            name: kind.name(),
            cost: kind.cost(),
            range: kind.range(),
            damage: kind.damage(),
            affordable: money >= kind.cost(),
            selected: selected == Some(kind),
        }
    }

    /// Lists every tower kind in build-menu order.
    #[must_use]
    pub fn catalogue(money: u32, selected: Option<TowerKind>) -> Vec<Self> {
        TowerKind::ALL
            .iter()
            .map(|kind| Self::new(*kind, money, selected))
            .collect()
    }
}

/// Category of a message log line, used to pick a colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageTone {
    /// Wave announcements.
    Briefing,
    /// Tactical advice.
    Advice,
    /// Progress notices.
    Notice,
    /// Rejections and game over.
    Warning,
}

impl MessageTone {
    /// Text colour of lines with this tone.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Briefing => Color::from_rgb_u8(0xe8, 0xe8, 0xe8),
            Self::Advice => Color::from_rgb_u8(0x9a, 0xd1, 0xff),
            Self::Notice => Color::from_rgb_u8(0xa6, 0xe2, 0x8a),
            Self::Warning => Color::from_rgb_u8(0xff, 0x8a, 0x80),
        }
    }
}

/// Single line of the message log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageLine {
    /// Category of the line.
    pub tone: MessageTone,
    /// Text shown to the player.
    pub text: String,
}

/// Layout of the control panel docked to the right edge of the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPanelView {
    /// Width of the panel in screen pixels.
    pub width: f32,
    /// Background colour of the panel.
    pub background: Color,
}

impl ControlPanelView {
    /// Creates a new control panel descriptor.
    #[must_use]
    pub const fn new(width: f32, background: Color) -> Self {
        Self { width, background }
    }
}

/// Scene description combining the field, its inhabitants and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Play field and enemy path.
    pub field: FieldPresentation,
    /// Enemies currently on the path.
    pub enemies: Vec<EnemyPresentation>,
    /// Towers built so far.
    pub towers: Vec<TowerPresentation>,
    /// Projectiles in flight.
    pub projectiles: Vec<ProjectilePresentation>,
    /// Live cosmetic particles.
    pub particles: Vec<ParticlePresentation>,
    /// Optional placement preview for the hovered cell.
    pub tower_preview: Option<TowerPreview>,
    /// Figures shown in the control panel.
    pub hud: HudPresentation,
    /// Purchasable towers.
    pub build_menu: Vec<TowerOffer>,
    /// Recent messages, oldest first.
    pub messages: Vec<MessageLine>,
    /// Optional control panel layout.
    pub control_panel: Option<ControlPanelView>,
}

impl Scene {
    /// Creates a scene with an empty field population.
    #[must_use]
    pub fn new(
        field: FieldPresentation,
        hud: HudPresentation,
        control_panel: Option<ControlPanelView>,
    ) -> Self {
        Self {
            field,
            enemies: Vec::new(),
            towers: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            tower_preview: None,
            hud,
            build_menu: TowerOffer::catalogue(hud.money, None),
            messages: Vec::new(),
            control_panel,
        }
    }

    /// Tower currently selected in the build menu.
    #[must_use]
    pub fn selected_tower(&self) -> Option<TowerKind> {
        self.build_menu
            .iter()
            .find(|offer| offer.selected)
            .map(|offer| offer.kind)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Time spent by the adapter's update closure, reported for frame metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSimulationBreakdown {
    /// Time spent advancing the simulation.
    pub simulation: Duration,
    /// Time spent translating the simulation into the scene.
    pub scene_population: Duration,
}

/// Rendering backend capable of presenting Waypoint Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, advances the game and refreshes the
    /// scene before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameSimulationBreakdown + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// The field must have a positive, finite area.
    #[error("field size must be positive (received {width}x{height})")]
    InvalidFieldSize {
        /// Provided width.
        width: f32,
        /// Provided height.
        height: f32,
    },
    /// Cells must have a positive, finite size.
    #[error("grid size must be positive (received {grid_size})")]
    InvalidGridSize {
        /// Provided cell size that failed validation.
        grid_size: f32,
    },
    /// A path needs at least a start and an end.
    #[error("path needs at least two waypoints (received {points})")]
    DegeneratePath {
        /// Number of waypoints provided.
        points: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_defence_core::{EnemyId, EnemyKind, WAYPOINTS};

    fn field() -> FieldPresentation {
        FieldPresentation::new(
            800.0,
            600.0,
            40.0,
            WAYPOINTS.iter().copied().map(to_vec2).collect(),
        )
        .expect("valid field")
    }

    fn hud(money: u32) -> HudPresentation {
        HudPresentation {
            money,
            lives: 20,
            wave: 0,
            play_mode: PlayMode::Builder,
            generating: false,
            oracle_live: false,
            pending_enemies: 0,
        }
    }

    #[test]
    fn field_creation_rejects_zero_grid_without_panicking() {
        let error = FieldPresentation::new(800.0, 600.0, 0.0, vec![Vec2::ZERO, Vec2::ONE])
            .expect_err("zero grid size must be rejected");

        assert_eq!(error, RenderingError::InvalidGridSize { grid_size: 0.0 });
    }

    #[test]
    fn field_creation_rejects_single_point_path() {
        let error = FieldPresentation::new(800.0, 600.0, 40.0, vec![Vec2::ZERO])
            .expect_err("a single waypoint is not a path");

        assert_eq!(error, RenderingError::DegeneratePath { points: 1 });
        assert_eq!(
            error.to_string(),
            "path needs at least two waypoints (received 1)"
        );
    }

    #[test]
    fn field_contains_its_half_open_bounds() {
        let field = field();

        assert!(field.contains(Vec2::new(0.0, 0.0)));
        assert!(!field.contains(Vec2::new(-10.0, 300.0)));
        assert!(field.contains(Vec2::new(799.0, 0.0)));
        assert!(!field.contains(Vec2::new(800.0, 10.0)));
    }

    #[test]
    fn enemy_health_fraction_is_clamped() {
        let black = Color::from_rgb_u8(0, 0, 0);
        let overkilled = EnemyPresentation::new(Vec2::ZERO, 8.0, black, -0.4, false);
        let overhealed = EnemyPresentation::new(Vec2::ZERO, 8.0, black, 1.7, false);
        let broken = EnemyPresentation::new(Vec2::ZERO, 8.0, black, f32::NAN, false);

        assert_eq!(overkilled.health_fraction, 0.0);
        assert_eq!(overhealed.health_fraction, 1.0);
        assert_eq!(broken.health_fraction, 0.0);
    }

    #[test]
    fn enemy_snapshot_maps_to_presentation() {
        let snapshot = EnemySnapshot {
            id: EnemyId::new(4),
            kind: EnemyKind::Tank,
            position: WorldPoint::new(220.0, 180.0),
            hp: 60.0,
            max_hp: 120.0,
            waypoint: 2,
            slow_frames: 12,
            travelled: 300.0,
        };

        let enemy = EnemyPresentation::from_snapshot(&snapshot);

        assert_eq!(enemy.position, Vec2::new(220.0, 180.0));
        assert_eq!(enemy.radius, EnemyKind::Tank.radius());
        assert!((enemy.health_fraction - 0.5).abs() < f32::EPSILON);
        assert!(enemy.slowed);
    }

    #[test]
    fn rejected_preview_is_never_placeable() {
        let preview = TowerPreview::new(
            TowerKind::Sniper,
            Vec2::new(60.0, 60.0),
            true,
            Some(PlacementError::OnPath),
        );

        assert!(!preview.placeable);
        assert_eq!(preview.range(), TowerKind::Sniper.range());
    }

    #[test]
    fn catalogue_marks_affordability_and_selection() {
        let offers = TowerOffer::catalogue(100, Some(TowerKind::Frost));

        assert_eq!(offers.len(), TowerKind::ALL.len());
        let blaster = offers[0];
        assert_eq!(blaster.kind, TowerKind::Blaster);
        assert!(blaster.affordable);
        assert!(!blaster.selected);

        let frost = offers
            .iter()
            .find(|offer| offer.kind == TowerKind::Frost)
            .expect("frost offered");
        assert!(frost.affordable, "frost costs exactly 100");
        assert!(frost.selected);

        let mortar = offers
            .iter()
            .find(|offer| offer.kind == TowerKind::Mortar)
            .expect("mortar offered");
        assert!(!mortar.affordable);
    }

    #[test]
    fn scene_new_starts_empty_without_selection() {
        let scene = Scene::new(field(), hud(150), None);

        assert!(scene.enemies.is_empty());
        assert!(scene.towers.is_empty());
        assert!(scene.tower_preview.is_none());
        assert_eq!(scene.build_menu.len(), TowerKind::ALL.len());
        assert_eq!(scene.selected_tower(), None);
        assert!(scene.hud.can_start_wave());
    }

    #[test]
    fn particle_alpha_follows_remaining_life() {
        let particle = ParticlePresentation::from_snapshot(&ParticleSnapshot {
            position: WorldPoint::new(1.0, 2.0),
            color: Rgb::from_rgb(255, 0, 0),
            size: 2.0,
            life_fraction: 0.25,
        });

        assert_eq!(particle.color, Color::new(1.0, 0.0, 0.0, 0.25));
    }

    #[test]
    fn lighten_moves_channels_towards_white() {
        let color = Color::from_rgb_u8(0, 0, 0).lighten(0.5);

        assert_eq!(color, Color::new(0.5, 0.5, 0.5, 1.0));
    }
}
