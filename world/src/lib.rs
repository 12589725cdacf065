#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Waypoint Defence.

mod particles;
mod towers;

use waypoint_defence_core::{
    Command, EnemyId, EnemyKind, EnemySnapshot, Event, PlayMode, ProjectileId, Rgb, Shot, TowerId,
    TowerKind, WorldPoint, GRID_SIZE, SPLASH_RADIUS, WAYPOINTS, WELCOME_BANNER,
};

use particles::ParticleField;
use towers::TowerRegistry;

const DEFAULT_STARTING_MONEY: u32 = 150;
const DEFAULT_STARTING_LIVES: u32 = 20;
const DEFAULT_PARTICLE_SEED: u64 = 0x5eed_0f_d3f3_11ce;

const DEATH_PARTICLES: usize = 12;
const IMPACT_PARTICLES: usize = 4;
const PLACEMENT_PARTICLES: usize = 10;
const IMPACT_COLOR: Rgb = Rgb::from_rgb(0xff, 0xf4, 0xd6);

/// Tunables applied when a world is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    /// Money available before the first purchase.
    pub starting_money: u32,
    /// Lives the base starts with.
    pub starting_lives: u32,
    /// Seed driving the cosmetic particle generator.
    pub particle_seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            starting_money: DEFAULT_STARTING_MONEY,
            starting_lives: DEFAULT_STARTING_LIVES,
            particle_seed: DEFAULT_PARTICLE_SEED,
        }
    }
}

/// Represents the authoritative Waypoint Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    money: u32,
    lives: u32,
    wave: u32,
    mode: PlayMode,
    frame: u64,
    enemies: Vec<Enemy>,
    next_enemy_id: EnemyId,
    towers: TowerRegistry,
    projectiles: Vec<Projectile>,
    next_projectile_id: ProjectileId,
    particles: ParticleField,
}

impl World {
    /// Creates a new world using the default economy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates a new world using the provided economy and seed.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            money: config.starting_money,
            lives: config.starting_lives,
            wave: 0,
            mode: PlayMode::Builder,
            frame: 0,
            enemies: Vec::new(),
            next_enemy_id: EnemyId::new(0),
            towers: TowerRegistry::new(),
            projectiles: Vec::new(),
            next_projectile_id: ProjectileId::new(0),
            particles: ParticleField::new(config.particle_seed),
        }
    }

    fn enemy_index(&self, enemy: EnemyId) -> Option<usize> {
        self.enemies.iter().position(|candidate| candidate.id == enemy)
    }

    fn set_mode(&mut self, mode: PlayMode, out_events: &mut Vec<Event>) {
        if self.mode != mode {
            self.mode = mode;
            out_events.push(Event::PlayModeChanged { mode });
        }
    }

    fn spawn_enemy(&mut self, kind: EnemyKind, hp_multiplier: f32, out_events: &mut Vec<Event>) {
        let id = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(id.get().saturating_add(1));
        let hp = kind.base_hp() * hp_multiplier;
        self.enemies.push(Enemy {
            id,
            kind,
            position: WAYPOINTS[0],
            hp,
            max_hp: hp,
            waypoint: 1,
            slow_frames: 0,
            travelled: 0.0,
        });
        out_events.push(Event::EnemySpawned {
            enemy: id,
            kind,
            hp,
        });
    }

    fn leak_enemy(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        let Some(index) = self.enemy_index(enemy) else {
            return;
        };
        let _ = self.enemies.remove(index);
        self.lives = self.lives.saturating_sub(1);
        out_events.push(Event::EnemyLeaked {
            enemy,
            lives_remaining: self.lives,
        });

        if self.lives == 0 {
            self.set_mode(PlayMode::GameOver, out_events);
            out_events.push(Event::GameOver { wave: self.wave });
        }
    }

    fn fire_projectile(
        &mut self,
        tower: TowerId,
        target: EnemyId,
        shot: Shot,
        out_events: &mut Vec<Event>,
    ) {
        if self.enemy_index(target).is_none() {
            return;
        }
        let Some(state) = self.towers.get_mut(tower) else {
            return;
        };
        if state.cooldown > 0 {
            return;
        }

        state.cooldown = state.kind.cooldown();
        let origin = state.position;

        let id = self.next_projectile_id;
        self.next_projectile_id = ProjectileId::new(id.get().saturating_add(1));
        self.projectiles.push(Projectile {
            id,
            position: origin,
            target,
            damage: shot.damage,
            speed: shot.speed,
            splash: shot.splash,
            slow_frames: shot.slow_frames,
        });
        out_events.push(Event::ProjectileFired {
            projectile: id,
            tower,
            target,
        });
    }

    fn advance_projectiles(&mut self, out_events: &mut Vec<Event>) {
        let projectiles = std::mem::take(&mut self.projectiles);
        let mut survivors = Vec::with_capacity(projectiles.len());

        for mut projectile in projectiles {
            let Some(index) = self.enemy_index(projectile.target) else {
                out_events.push(Event::ProjectileDiscarded {
                    projectile: projectile.id,
                    target: projectile.target,
                });
                continue;
            };

            let target_position = self.enemies[index].position;
            if projectile.position.distance_to(target_position) > projectile.speed {
                projectile.position = projectile
                    .position
                    .step_towards(target_position, projectile.speed);
                survivors.push(projectile);
                continue;
            }

            self.resolve_impact(&projectile, target_position, out_events);
        }

        self.projectiles = survivors;
    }

    fn resolve_impact(
        &mut self,
        projectile: &Projectile,
        impact: WorldPoint,
        out_events: &mut Vec<Event>,
    ) {
        for enemy in &mut self.enemies {
            let hit = if projectile.splash {
                enemy.position.distance_to(impact) <= SPLASH_RADIUS
            } else {
                enemy.id == projectile.target
            };
            if !hit {
                continue;
            }

            enemy.hp -= projectile.damage;
            out_events.push(Event::EnemyDamaged {
                enemy: enemy.id,
                damage: projectile.damage,
                remaining: enemy.hp,
            });
        }

        let mut index = 0;
        while index < self.enemies.len() {
            if self.enemies[index].hp > 0.0 {
                index += 1;
                continue;
            }
            let enemy = self.enemies.remove(index);
            let bounty = enemy.kind.bounty();
            self.money = self.money.saturating_add(bounty);
            self.particles
                .burst(enemy.position, enemy.kind.color(), DEATH_PARTICLES);
            out_events.push(Event::EnemyKilled {
                enemy: enemy.id,
                kind: enemy.kind,
                bounty,
            });
        }

        if projectile.slow_frames > 0 {
            if let Some(index) = self.enemy_index(projectile.target) {
                self.enemies[index].slow_frames = projectile.slow_frames;
            }
        }

        self.particles.burst(impact, IMPACT_COLOR, IMPACT_PARTICLES);
        out_events.push(Event::ProjectileImpacted {
            projectile: projectile.id,
            target: projectile.target,
        });
    }

    fn place_tower(&mut self, kind: TowerKind, position: WorldPoint, out_events: &mut Vec<Event>) {
        match query::placement_check(self, kind, position) {
            Ok(cell) => {
                self.money -= kind.cost();
                let tower = self.towers.insert(kind, cell);
                self.particles.burst(cell, kind.color(), PLACEMENT_PARTICLES);
                out_events.push(Event::TowerPlaced {
                    tower,
                    kind,
                    position: cell,
                });
            }
            Err(reason) => out_events.push(Event::TowerPlacementRejected {
                kind,
                position,
                reason,
            }),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Frame-driven gameplay commands are ignored unless a wave is running, so
/// stepping the world outside [`PlayMode::Attack`] never changes enemies,
/// towers, projectiles or the economy. Particles age in every mode.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    let attacking = world.mode == PlayMode::Attack;
    match command {
        Command::Tick => {
            if !attacking {
                return;
            }
            world.frame = world.frame.saturating_add(1);
            world.towers.tick_cooldowns();
            out_events.push(Event::FrameAdvanced { frame: world.frame });
        }
        Command::BeginWave { wave, groups } => {
            if world.mode != PlayMode::Builder {
                return;
            }
            world.wave = wave;
            world.set_mode(PlayMode::Attack, out_events);
            out_events.push(Event::WaveStarted { wave, groups });
        }
        Command::SpawnEnemy {
            kind,
            hp_multiplier,
        } => {
            if attacking {
                world.spawn_enemy(kind, hp_multiplier, out_events);
            }
        }
        Command::CompleteWave => {
            if !attacking || !world.enemies.is_empty() {
                return;
            }
            world.projectiles.clear();
            world.set_mode(PlayMode::Builder, out_events);
            out_events.push(Event::WaveCompleted { wave: world.wave });
        }
        Command::MoveEnemy {
            enemy,
            position,
            waypoint,
            travelled,
            slow_frames,
        } => {
            if !attacking {
                return;
            }
            if let Some(index) = world.enemy_index(enemy) {
                let state = &mut world.enemies[index];
                state.position = position;
                state.waypoint = waypoint;
                state.travelled += travelled;
                state.slow_frames = slow_frames;
            }
        }
        Command::LeakEnemy { enemy } => {
            if attacking {
                world.leak_enemy(enemy, out_events);
            }
        }
        Command::FireProjectile {
            tower,
            target,
            shot,
        } => {
            if attacking {
                world.fire_projectile(tower, target, shot, out_events);
            }
        }
        Command::AdvanceProjectiles => {
            if attacking {
                world.advance_projectiles(out_events);
            }
        }
        Command::AdvanceParticles => world.particles.advance(),
        Command::PlaceTower { kind, position } => world.place_tower(kind, position, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use waypoint_defence_core::{
        EnemyView, GameStatus, ParticleSnapshot, PlacementError, PlayMode, ProjectileSnapshot,
        TowerKind, TowerView, WorldPoint, GRID_SIZE, WAYPOINTS,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Ordered waypoints every enemy follows.
    #[must_use]
    pub fn path(_world: &World) -> &'static [WorldPoint] {
        &WAYPOINTS
    }

    /// Side length of a placement cell in world units.
    #[must_use]
    pub fn grid_size(_world: &World) -> f32 {
        GRID_SIZE
    }

    /// Reports the active play mode.
    #[must_use]
    pub fn play_mode(world: &World) -> PlayMode {
        world.mode
    }

    /// Number of frames simulated since the world was created.
    #[must_use]
    pub fn frame(world: &World) -> u64 {
        world.frame
    }

    /// Economy and progression figures.
    #[must_use]
    pub fn status(world: &World) -> GameStatus {
        GameStatus {
            money: world.money,
            lives: world.lives,
            wave: world.wave,
            mode: world.mode,
        }
    }

    /// Captures a read-only view of the enemies walking the path.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(super::Enemy::snapshot).collect())
    }

    /// Captures a read-only view of every constructed tower.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(world.towers.iter().map(|tower| tower.snapshot()).collect())
    }

    /// Captures every projectile in flight ordered by identifier.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world
            .projectiles
            .iter()
            .map(|projectile| ProjectileSnapshot {
                id: projectile.id,
                position: projectile.position,
                target: projectile.target,
                splash: projectile.splash,
                slow_frames: projectile.slow_frames,
            })
            .collect()
    }

    /// Captures every live particle.
    #[must_use]
    pub fn particles(world: &World) -> Vec<ParticleSnapshot> {
        world.particles.snapshots()
    }

    /// Validates a placement request without mutating the world.
    ///
    /// Returns the snapped cell centre the tower would occupy.
    pub fn placement_check(
        world: &World,
        kind: TowerKind,
        click: WorldPoint,
    ) -> Result<WorldPoint, PlacementError> {
        if world.mode == PlayMode::GameOver {
            return Err(PlacementError::GameOver);
        }
        if world.money < kind.cost() {
            return Err(PlacementError::InsufficientFunds);
        }

        let cell = click.snapped_to_grid();
        if world.towers.occupies(cell) {
            return Err(PlacementError::Occupied);
        }
        if super::overlaps_path(cell) {
            return Err(PlacementError::OnPath);
        }
        if !click.is_within_field() {
            return Err(PlacementError::OutOfBounds);
        }

        Ok(cell)
    }
}

#[derive(Clone, Debug)]
struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    position: WorldPoint,
    hp: f32,
    max_hp: f32,
    waypoint: usize,
    slow_frames: u32,
    travelled: f32,
}

impl Enemy {
    fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            hp: self.hp,
            max_hp: self.max_hp,
            waypoint: self.waypoint,
            slow_frames: self.slow_frames,
            travelled: self.travelled,
        }
    }
}

#[derive(Clone, Debug)]
struct Projectile {
    id: ProjectileId,
    position: WorldPoint,
    target: EnemyId,
    damage: f32,
    speed: f32,
    splash: bool,
    slow_frames: u32,
}

/// Reports whether a cell centre lies inside any path segment's bounding box
/// inflated by half a cell.
fn overlaps_path(cell: WorldPoint) -> bool {
    let margin = GRID_SIZE / 2.0;
    WAYPOINTS.windows(2).any(|segment| {
        let (from, to) = (segment[0], segment[1]);
        let min_x = from.x().min(to.x()) - margin;
        let max_x = from.x().max(to.x()) + margin;
        let min_y = from.y().min(to.y()) - margin;
        let max_y = from.y().max(to.y()) + margin;
        cell.x() >= min_x && cell.x() <= max_x && cell.y() >= min_y && cell.y() <= max_y
    })
}
