#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Waypoint Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command batches.
//!
//! The static stat tables for enemies and towers, the fixed waypoint path and
//! the play-field grid also live here so every crate agrees on them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Waypoint Defence.";

/// Width of the play field in world units.
pub const FIELD_WIDTH: f32 = 800.0;

/// Height of the play field in world units.
pub const FIELD_HEIGHT: f32 = 600.0;

/// Side length of a single placement cell in world units.
pub const GRID_SIZE: f32 = 40.0;

/// Distance a projectile covers per frame.
pub const PROJECTILE_SPEED: f32 = 8.0;

/// Radius around the impact point that splash projectiles damage.
pub const SPLASH_RADIUS: f32 = 60.0;

/// Fixed ordered path enemies follow from the spawn point to the base.
pub const WAYPOINTS: [WorldPoint; 9] = [
    WorldPoint::new(0.0, 100.0),
    WorldPoint::new(220.0, 100.0),
    WorldPoint::new(220.0, 340.0),
    WorldPoint::new(500.0, 340.0),
    WorldPoint::new(500.0, 140.0),
    WorldPoint::new(700.0, 140.0),
    WorldPoint::new(700.0, 460.0),
    WorldPoint::new(100.0, 460.0),
    WorldPoint::new(100.0, 600.0),
];

/// Describes the active gameplay mode for the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayMode {
    /// Between waves: the simulation is paused and the player plans defences.
    Builder,
    /// A wave is running and the simulation advances every frame.
    Attack,
    /// The base ran out of lives. Only a full restart leaves this mode.
    GameOver,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by a single frame.
    Tick,
    /// Starts the provided wave using the supplied spawn groups.
    BeginWave {
        /// Number of the wave being started.
        wave: u32,
        /// Ordered spawn groups composing the wave.
        groups: Vec<SpawnGroup>,
    },
    /// Requests that a new enemy enter the path at the first waypoint.
    SpawnEnemy {
        /// Kind of enemy to create.
        kind: EnemyKind,
        /// Factor applied to the kind's base hit points.
        hp_multiplier: f32,
    },
    /// Signals that the spawn queue drained and no enemies remain.
    CompleteWave,
    /// Moves an enemy to a new position along the path.
    MoveEnemy {
        /// Identifier of the enemy being moved.
        enemy: EnemyId,
        /// Position the enemy occupies after moving.
        position: WorldPoint,
        /// Index of the waypoint the enemy is now heading towards.
        waypoint: usize,
        /// Distance covered during this frame.
        travelled: f32,
        /// Slow frames left after this move.
        slow_frames: u32,
    },
    /// Reports that an enemy exhausted the path and reached the base.
    LeakEnemy {
        /// Identifier of the enemy that reached the base.
        enemy: EnemyId,
    },
    /// Requests that a tower fire a projectile at the provided enemy.
    FireProjectile {
        /// Tower that fires.
        tower: TowerId,
        /// Enemy the projectile homes in on.
        target: EnemyId,
        /// Parameters of the projectile leaving the tower.
        shot: Shot,
    },
    /// Moves every projectile and resolves impacts.
    AdvanceProjectiles,
    /// Ages every cosmetic particle.
    AdvanceParticles,
    /// Requests placement of a tower at the provided click position.
    PlaceTower {
        /// Type of tower to construct.
        kind: TowerKind,
        /// Unsnapped world position of the click.
        position: WorldPoint,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced by one frame.
    FrameAdvanced {
        /// Index of the frame that just started.
        frame: u64,
    },
    /// Announces that the simulation entered a new play mode.
    PlayModeChanged {
        /// Mode that became active after processing commands.
        mode: PlayMode,
    },
    /// Announces that a wave started and carries its spawn groups.
    WaveStarted {
        /// Number of the wave that started.
        wave: u32,
        /// Spawn groups to be consumed front to back.
        groups: Vec<SpawnGroup>,
    },
    /// Announces that the current wave finished.
    WaveCompleted {
        /// Number of the wave that finished.
        wave: u32,
    },
    /// Confirms that an enemy entered the path.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Kind of the enemy.
        kind: EnemyKind,
        /// Hit points the enemy starts with.
        hp: f32,
    },
    /// Reports that an enemy reached the base.
    EnemyLeaked {
        /// Identifier of the enemy that leaked.
        enemy: EnemyId,
        /// Lives left after the leak.
        lives_remaining: u32,
    },
    /// Reports damage applied to an enemy.
    EnemyDamaged {
        /// Identifier of the damaged enemy.
        enemy: EnemyId,
        /// Damage that was applied.
        damage: f32,
        /// Hit points remaining after the damage.
        remaining: f32,
    },
    /// Reports that an enemy was destroyed and its bounty credited.
    EnemyKilled {
        /// Identifier of the destroyed enemy.
        enemy: EnemyId,
        /// Kind of the destroyed enemy.
        kind: EnemyKind,
        /// Money credited for the kill.
        bounty: u32,
    },
    /// Confirms that a tower fired.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Tower that fired.
        tower: TowerId,
        /// Enemy the projectile homes in on.
        target: EnemyId,
    },
    /// Reports that a projectile hit its target.
    ProjectileImpacted {
        /// Identifier of the projectile.
        projectile: ProjectileId,
        /// Enemy the projectile hit.
        target: EnemyId,
    },
    /// Reports that a projectile was dropped because its target vanished.
    ProjectileDiscarded {
        /// Identifier of the projectile.
        projectile: ProjectileId,
        /// Enemy that could no longer be resolved.
        target: EnemyId,
    },
    /// Confirms that a tower was placed into the world.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Snapped cell centre the tower occupies.
        position: WorldPoint,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Type of tower requested for placement.
        kind: TowerKind,
        /// Click position provided in the placement request.
        position: WorldPoint,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that the base ran out of lives.
    GameOver {
        /// Wave during which the base fell.
        wave: u32,
    },
}

/// Point in world space measured in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a new point from its coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance_to(self, other: WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Moves `step` units along the straight line towards `target`.
    ///
    /// Returns the target itself when it is closer than `step`.
    #[must_use]
    pub fn step_towards(self, target: WorldPoint, step: f32) -> WorldPoint {
        let distance = self.distance_to(target);
        if distance <= step || distance <= f32::EPSILON {
            return target;
        }

        let scale = step / distance;
        WorldPoint::new(
            self.x + (target.x - self.x) * scale,
            self.y + (target.y - self.y) * scale,
        )
    }

    /// Returns the point translated by the provided offsets.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> WorldPoint {
        WorldPoint::new(self.x + dx, self.y + dy)
    }

    /// Snaps the point to the centre of the grid cell containing it.
    #[must_use]
    pub fn snapped_to_grid(self) -> WorldPoint {
        WorldPoint::new(
            (self.x / GRID_SIZE).floor() * GRID_SIZE + GRID_SIZE / 2.0,
            (self.y / GRID_SIZE).floor() * GRID_SIZE + GRID_SIZE / 2.0,
        )
    }

    /// Reports whether the point lies inside the play field.
    #[must_use]
    pub fn is_within_field(self) -> bool {
        self.x >= 0.0 && self.x < FIELD_WIDTH && self.y >= 0.0 && self.y < FIELD_HEIGHT
    }
}

/// Byte RGB colour used for entities and particles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a new colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the projectile identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Types of enemies that can walk the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    /// Baseline walker.
    Basic,
    /// Quick but fragile runner.
    Fast,
    /// Slow, heavily armoured walker.
    Tank,
    /// Rare, very durable walker appearing every tenth wave.
    Boss,
}

impl EnemyKind {
    /// Every enemy kind in declaration order.
    pub const ALL: [EnemyKind; 4] = [Self::Basic, Self::Fast, Self::Tank, Self::Boss];

    /// Hit points before any wave multiplier is applied.
    #[must_use]
    pub const fn base_hp(self) -> f32 {
        match self {
            Self::Basic => 30.0,
            Self::Fast => 15.0,
            Self::Tank => 120.0,
            Self::Boss => 500.0,
        }
    }

    /// Distance covered per frame while not slowed.
    #[must_use]
    pub const fn speed(self) -> f32 {
        match self {
            Self::Basic => 1.5,
            Self::Fast => 3.0,
            Self::Tank => 0.8,
            Self::Boss => 0.6,
        }
    }

    /// Money credited when an enemy of this kind is destroyed.
    #[must_use]
    pub const fn bounty(self) -> u32 {
        match self {
            Self::Basic => 10,
            Self::Fast => 8,
            Self::Tank => 25,
            Self::Boss => 150,
        }
    }

    /// Drawing radius in world units.
    #[must_use]
    pub const fn radius(self) -> f32 {
        match self {
            Self::Basic => 10.0,
            Self::Fast => 8.0,
            Self::Tank => 14.0,
            Self::Boss => 20.0,
        }
    }

    /// Body colour used by renderers and death particles.
    #[must_use]
    pub const fn color(self) -> Rgb {
        match self {
            Self::Basic => Rgb::from_rgb(0xe0, 0x4f, 0x4f),
            Self::Fast => Rgb::from_rgb(0xf2, 0xc1, 0x2e),
            Self::Tank => Rgb::from_rgb(0x7a, 0x4f, 0xd6),
            Self::Boss => Rgb::from_rgb(0x1f, 0x1f, 0x1f),
        }
    }

    /// Lower-case name used by the wave generator wire format.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Fast => "fast",
            Self::Tank => "tank",
            Self::Boss => "boss",
        }
    }
}

/// Types of towers that can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TowerKind {
    /// Cheap rapid-fire tower.
    Blaster,
    /// Long-range, slow, hard-hitting tower.
    Sniper,
    /// Splash-damage tower.
    Mortar,
    /// Tower whose projectiles slow their target.
    Frost,
}

impl TowerKind {
    /// Every tower kind in build-menu order.
    pub const ALL: [TowerKind; 4] = [Self::Blaster, Self::Sniper, Self::Mortar, Self::Frost];

    /// Display name shown in the build menu.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blaster => "Blaster",
            Self::Sniper => "Sniper",
            Self::Mortar => "Mortar",
            Self::Frost => "Frost",
        }
    }

    /// Purchase price.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Blaster => 50,
            Self::Sniper => 120,
            Self::Mortar => 150,
            Self::Frost => 100,
        }
    }

    /// Targeting radius in world units.
    #[must_use]
    pub const fn range(self) -> f32 {
        match self {
            Self::Blaster => 120.0,
            Self::Sniper => 260.0,
            Self::Mortar => 150.0,
            Self::Frost => 110.0,
        }
    }

    /// Damage carried by each projectile.
    #[must_use]
    pub const fn damage(self) -> f32 {
        match self {
            Self::Blaster => 10.0,
            Self::Sniper => 45.0,
            Self::Mortar => 18.0,
            Self::Frost => 4.0,
        }
    }

    /// Frames between two consecutive shots.
    #[must_use]
    pub const fn cooldown(self) -> u32 {
        match self {
            Self::Blaster => 20,
            Self::Sniper => 80,
            Self::Mortar => 60,
            Self::Frost => 30,
        }
    }

    /// Whether projectiles damage everything within [`SPLASH_RADIUS`].
    #[must_use]
    pub const fn splash(self) -> bool {
        matches!(self, Self::Mortar)
    }

    /// Frames of slow applied by a hit, zero when the tower does not slow.
    #[must_use]
    pub const fn slow_frames(self) -> u32 {
        match self {
            Self::Frost => 90,
            _ => 0,
        }
    }

    /// Colour used by renderers and placement particles.
    #[must_use]
    pub const fn color(self) -> Rgb {
        match self {
            Self::Blaster => Rgb::from_rgb(0x3d, 0x8b, 0xd9),
            Self::Sniper => Rgb::from_rgb(0x2e, 0xa0, 0x4e),
            Self::Mortar => Rgb::from_rgb(0xd9, 0x7b, 0x29),
            Self::Frost => Rgb::from_rgb(0x8f, 0xe3, 0xf2),
        }
    }
}

/// One group of identical enemies within a wave.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnGroup {
    /// Kind of enemy spawned by the group.
    #[serde(rename = "enemyType")]
    pub kind: EnemyKind,
    /// Number of enemies still to spawn.
    pub count: u32,
    /// Frames between two spawns of the group.
    #[serde(rename = "spawnInterval")]
    pub interval: u32,
    /// Factor applied to the kind's base hit points.
    pub hp_multiplier: f32,
}

impl SpawnGroup {
    /// Creates a new spawn group.
    #[must_use]
    pub const fn new(kind: EnemyKind, count: u32, interval: u32, hp_multiplier: f32) -> Self {
        Self {
            kind,
            count,
            interval,
            hp_multiplier,
        }
    }
}

/// Enemy composition of a single wave plus the flavour text announcing it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WavePlan {
    /// Short narrative shown to the player when the wave starts.
    pub briefing: String,
    /// Ordered spawn groups, consumed front to back.
    pub groups: Vec<SpawnGroup>,
}

impl WavePlan {
    /// Total number of enemies across every group.
    #[must_use]
    pub fn total_enemies(&self) -> u32 {
        self.groups.iter().map(|group| group.count).sum()
    }

    /// Number of groups spawning the provided kind.
    #[must_use]
    pub fn groups_of(&self, kind: EnemyKind) -> usize {
        self.groups.iter().filter(|group| group.kind == kind).count()
    }
}

/// Reasons a tower placement request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// No tower type is selected in the build menu.
    #[error("select a tower first")]
    NoTowerSelected,
    /// The base already fell.
    #[error("the game is over")]
    GameOver,
    /// The tower costs more than the available money.
    #[error("not enough money")]
    InsufficientFunds,
    /// Another tower already occupies the cell.
    #[error("that cell is already occupied")]
    Occupied,
    /// The cell overlaps the enemy path.
    #[error("cannot build on the path")]
    OnPath,
    /// The click landed outside the play field.
    #[error("outside the play field")]
    OutOfBounds,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Kind of the enemy.
    pub kind: EnemyKind,
    /// Current position.
    pub position: WorldPoint,
    /// Current hit points; may be negative for one frame before removal.
    pub hp: f32,
    /// Hit points the enemy spawned with.
    pub max_hp: f32,
    /// Index of the waypoint the enemy heads towards.
    pub waypoint: usize,
    /// Remaining frames of slow effect.
    pub slow_frames: u32,
    /// Cumulative distance covered along the path.
    pub travelled: f32,
}

impl EnemySnapshot {
    /// Health fraction clamped to `0.0..=1.0` for presentation.
    #[must_use]
    pub fn health_fraction(&self) -> f32 {
        if self.max_hp <= f32::EPSILON {
            return 0.0;
        }
        (self.hp / self.max_hp).clamp(0.0, 1.0)
    }
}

/// Read-only snapshot describing all enemies on the path.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up an enemy by identifier.
    #[must_use]
    pub fn get(&self, id: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Cell centre the tower occupies.
    pub position: WorldPoint,
    /// Frames until the tower may fire again.
    pub cooldown: u32,
}

/// Read-only snapshot describing all towers.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a tower by identifier.
    #[must_use]
    pub fn get(&self, id: TowerId) -> Option<&TowerSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of towers of the provided kind.
    #[must_use]
    pub fn count_of(&self, kind: TowerKind) -> usize {
        self.snapshots
            .iter()
            .filter(|snapshot| snapshot.kind == kind)
            .count()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile.
    pub id: ProjectileId,
    /// Current position.
    pub position: WorldPoint,
    /// Enemy the projectile homes in on.
    pub target: EnemyId,
    /// Whether the projectile deals splash damage.
    pub splash: bool,
    /// Frames of slow applied on impact.
    pub slow_frames: u32,
}

/// Parameters a projectile carries from the moment it is fired.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shot {
    /// Damage dealt to every enemy the impact reaches.
    pub damage: f32,
    /// Distance travelled per frame.
    pub speed: f32,
    /// Whether the impact damages everything within [`SPLASH_RADIUS`].
    pub splash: bool,
    /// Slow frames applied to the primary target on impact.
    pub slow_frames: u32,
}

/// Immutable representation of a cosmetic particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSnapshot {
    /// Current position.
    pub position: WorldPoint,
    /// Fill colour.
    pub color: Rgb,
    /// Drawing radius in world units.
    pub size: f32,
    /// Remaining lifetime as a fraction of the initial lifetime.
    pub life_fraction: f32,
}

/// Target assignment produced by the tower targeting system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerTarget {
    /// Tower that acquired the target.
    pub tower: TowerId,
    /// Enemy selected by the tower.
    pub enemy: EnemyId,
    /// Position of the tower.
    pub tower_position: WorldPoint,
    /// Position of the enemy when it was selected.
    pub enemy_position: WorldPoint,
}

/// Economy and progression figures shown by the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameStatus {
    /// Money available for purchases.
    pub money: u32,
    /// Lives left before the base falls.
    pub lives: u32,
    /// Number of the current (or last completed) wave.
    pub wave: u32,
    /// Active play mode.
    pub mode: PlayMode,
}
