#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Single owner of the Waypoint Defence game state.
//!
//! [`Simulation`] composes the authoritative world, the pure systems and the
//! wave oracle. Adapters call the player-facing operations
//! ([`Simulation::start_next_wave`], [`Simulation::select_tower_type`],
//! [`Simulation::place_tower_at`], [`Simulation::restart`]) and advance the
//! game once per rendered frame with [`Simulation::update`].

mod messages;

use tracing::{debug, info, warn};
use waypoint_defence_core::{
    Command, EnemyView, Event, GameStatus, ParticleSnapshot, PlacementError, PlayMode,
    ProjectileSnapshot, TowerId, TowerKind, TowerTarget, TowerView, WavePlan, WorldPoint,
};
use waypoint_defence_oracle::{
    AdviceRequest, Oracle, OracleReply, PlanSource, Ticket, WaveRequest,
};
use waypoint_defence_system_builder::{Builder, PlacementPreview};
use waypoint_defence_system_movement::Movement;
use waypoint_defence_system_spawning::Spawning;
use waypoint_defence_system_tower_combat::TowerCombat;
use waypoint_defence_system_tower_targeting::TowerTargeting;
use waypoint_defence_system_wave_generation::{WaveGeneration, DEFAULT_DIFFICULTY_RAMP};
use waypoint_defence_world::{self as world, query, World, WorldConfig};

pub use messages::{Message, MessageKind, MessageLog, MESSAGE_LOG_CAPACITY};

const DEFAULT_REPLY_TIMEOUT_FRAMES: u32 = 600;

/// Tunables applied when the simulation is created or restarted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Economy and particle seed of every new world.
    pub world: WorldConfig,
    /// Growth of the difficulty multiplier per wave.
    pub difficulty_ramp: f32,
    /// Frames to wait for the oracle before generating a wave locally.
    pub reply_timeout_frames: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            difficulty_ramp: DEFAULT_DIFFICULTY_RAMP,
            reply_timeout_frames: DEFAULT_REPLY_TIMEOUT_FRAMES,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct PendingWave {
    ticket: Ticket,
    request: WaveRequest,
    waited_frames: u32,
}

/// Game state owner driving the world, systems and oracle.
pub struct Simulation {
    config: SimulationConfig,
    world: World,
    spawning: Spawning,
    movement: Movement,
    targeting: TowerTargeting,
    combat: TowerCombat,
    builder: Builder,
    generator: WaveGeneration,
    oracle: Box<dyn Oracle>,
    generation: u64,
    pending_wave: Option<PendingWave>,
    pending_advice: Option<Ticket>,
    messages: MessageLog,
    events: Vec<Event>,
    commands: Vec<Command>,
    targets: Vec<TowerTarget>,
    replies: Vec<OracleReply>,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("config", &self.config)
            .field("world", &self.world)
            .field("generation", &self.generation)
            .field("pending_wave", &self.pending_wave)
            .field("oracle_live", &self.oracle.is_live())
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Creates a simulation in builder mode using the provided oracle.
    #[must_use]
    pub fn new(config: SimulationConfig, oracle: Box<dyn Oracle>) -> Self {
        let mut simulation = Self {
            config,
            world: World::with_config(config.world),
            spawning: Spawning::new(),
            movement: Movement::new(),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            builder: Builder::new(),
            generator: WaveGeneration::new(config.difficulty_ramp),
            oracle,
            generation: 0,
            pending_wave: None,
            pending_advice: None,
            messages: MessageLog::default(),
            events: Vec::new(),
            commands: Vec::new(),
            targets: Vec::new(),
            replies: Vec::new(),
        };
        simulation.greet();
        simulation
    }

    fn greet(&mut self) {
        let banner = query::welcome_banner(&self.world);
        self.messages.push(MessageKind::Notice, banner);
    }

    /// Requests the next wave from the oracle.
    ///
    /// Ignored unless the game is in builder mode and no wave is already being
    /// generated. Returns whether a request was issued.
    pub fn start_next_wave(&mut self) -> bool {
        if query::play_mode(&self.world) != PlayMode::Builder || self.pending_wave.is_some() {
            return false;
        }

        let status = query::status(&self.world);
        let wave = status.wave.saturating_add(1);
        let ticket = Ticket::new(self.generation, wave);
        let request = WaveRequest {
            wave,
            difficulty: self.generator.difficulty(wave),
        };
        let towers = query::tower_view(&self.world);
        let advice = AdviceRequest {
            wave,
            money: status.money,
            lives: status.lives,
            towers: TowerKind::ALL
                .iter()
                .map(|kind| (*kind, towers.count_of(*kind)))
                .filter(|(_, count)| *count > 0)
                .collect(),
        };

        info!(
            wave,
            difficulty = request.difficulty,
            live = self.oracle.is_live(),
            "requesting wave"
        );
        self.oracle.request_wave(ticket, request);
        self.oracle.request_advice(ticket, advice);
        self.pending_wave = Some(PendingWave {
            ticket,
            request,
            waited_frames: 0,
        });
        self.pending_advice = Some(ticket);
        true
    }

    /// Selects the tower type placed by subsequent clicks, or clears it.
    pub fn select_tower_type(&mut self, kind: Option<TowerKind>) {
        self.builder.select(kind);
    }

    /// Places the selected tower at the cell containing `click`.
    pub fn place_tower_at(&mut self, click: WorldPoint) -> Result<TowerId, PlacementError> {
        self.commands.clear();
        let outcome = match self.builder.handle_click(click, &mut self.commands) {
            Ok(_) => {
                let mut events = Vec::new();
                for command in self.commands.drain(..) {
                    world::apply(&mut self.world, command, &mut events);
                }
                events
                    .iter()
                    .find_map(|event| match event {
                        Event::TowerPlaced { tower, .. } => Some(Ok(*tower)),
                        Event::TowerPlacementRejected { reason, .. } => Some(Err(*reason)),
                        _ => None,
                    })
                    .unwrap_or(Err(PlacementError::NoTowerSelected))
            }
            Err(reason) => Err(reason),
        };

        match outcome {
            Ok(tower) => debug!(tower = tower.get(), x = click.x(), y = click.y(), "tower placed"),
            Err(reason) => {
                debug!(%reason, x = click.x(), y = click.y(), "placement rejected");
                self.messages.push(MessageKind::Warning, reason.to_string());
            }
        }
        outcome
    }

    /// Advances the game by one frame.
    ///
    /// Applies oracle replies that belong to the current game, enforces the
    /// reply deadline and then runs the frame pipeline when a wave is active.
    /// Particles fade every frame, including between waves.
    pub fn update(&mut self) {
        self.events.clear();
        self.receive_replies();
        self.enforce_reply_deadline();
        self.step();
        world::apply(&mut self.world, Command::AdvanceParticles, &mut self.events);
        self.record_events();
    }

    /// Throws away the current game and starts over in builder mode.
    ///
    /// Replies to requests issued before the restart are ignored.
    pub fn restart(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.world = World::with_config(self.config.world);
        self.spawning = Spawning::new();
        self.movement = Movement::new();
        self.targeting = TowerTargeting::new();
        self.combat = TowerCombat::new();
        self.builder = Builder::new();
        self.pending_wave = None;
        self.pending_advice = None;
        self.events.clear();
        self.messages.clear();
        info!(generation = self.generation, "game restarted");
        self.greet();
    }

    fn receive_replies(&mut self) {
        self.replies.clear();
        self.oracle.poll(&mut self.replies);
        let replies = std::mem::take(&mut self.replies);

        for reply in &replies {
            match reply {
                OracleReply::Wave {
                    ticket,
                    plan,
                    source,
                } => {
                    let expected = self.pending_wave.map(|pending| pending.ticket);
                    if expected != Some(*ticket) {
                        debug!(?ticket, "ignoring stale wave reply");
                        continue;
                    }
                    self.begin_wave(ticket.wave, plan.clone(), *source);
                }
                OracleReply::Advice { ticket, text } => {
                    if self.pending_advice != Some(*ticket) {
                        debug!(?ticket, "ignoring stale advice reply");
                        continue;
                    }
                    self.pending_advice = None;
                    self.messages.push(MessageKind::Advice, text.clone());
                }
            }
        }

        self.replies = replies;
    }

    fn enforce_reply_deadline(&mut self) {
        let Some(pending) = self.pending_wave.as_mut() else {
            return;
        };

        pending.waited_frames = pending.waited_frames.saturating_add(1);
        if pending.waited_frames < self.config.reply_timeout_frames {
            return;
        }

        let request = pending.request;
        warn!(
            wave = request.wave,
            frames = pending.waited_frames,
            "oracle did not answer in time, generating wave locally"
        );
        let plan = self.generator.generate(request.wave);
        self.begin_wave(request.wave, plan, PlanSource::Fallback);
    }

    fn begin_wave(&mut self, wave: u32, plan: WavePlan, source: PlanSource) {
        self.pending_wave = None;
        info!(
            wave,
            groups = plan.groups.len(),
            enemies = plan.total_enemies(),
            ?source,
            "wave started"
        );
        self.messages.push(MessageKind::Briefing, plan.briefing);

        let mark = self.events.len();
        world::apply(
            &mut self.world,
            Command::BeginWave {
                wave,
                groups: plan.groups,
            },
            &mut self.events,
        );
        self.spawning.handle(
            &self.events[mark..],
            query::play_mode(&self.world),
            query::enemy_view(&self.world).len(),
            &mut self.commands,
        );
        self.flush_commands();
    }

    fn step(&mut self) {
        if query::play_mode(&self.world) != PlayMode::Attack {
            return;
        }

        let mark = self.events.len();
        world::apply(&mut self.world, Command::Tick, &mut self.events);
        self.spawning.handle(
            &self.events[mark..],
            PlayMode::Attack,
            query::enemy_view(&self.world).len(),
            &mut self.commands,
        );
        self.flush_commands();

        let enemies = query::enemy_view(&self.world);
        self.movement.handle(
            &self.events[mark..],
            query::play_mode(&self.world),
            &enemies,
            query::path(&self.world),
            &mut self.commands,
        );
        self.flush_commands();

        let mode = query::play_mode(&self.world);
        if mode != PlayMode::Attack {
            return;
        }

        let towers = query::tower_view(&self.world);
        let enemies = query::enemy_view(&self.world);
        self.targeting
            .handle(mode, &towers, &enemies, &mut self.targets);
        self.combat
            .handle(mode, &towers, &self.targets, &mut self.commands);
        self.flush_commands();

        world::apply(&mut self.world, Command::AdvanceProjectiles, &mut self.events);
    }

    fn flush_commands(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    fn record_events(&mut self) {
        for event in &self.events {
            match event {
                Event::WaveCompleted { wave } => {
                    info!(wave, "wave cleared");
                    self.messages
                        .push(MessageKind::Notice, format!("Wave {wave} cleared."));
                }
                Event::GameOver { wave } => {
                    info!(wave, "base destroyed");
                    self.messages.push(
                        MessageKind::Warning,
                        format!("The base fell during wave {wave}. Restart to try again."),
                    );
                }
                _ => {}
            }
        }
    }

    /// Events produced by the most recent [`Simulation::update`].
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Economy and progression figures.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        query::status(&self.world)
    }

    /// Reports whether a wave request is awaiting its reply.
    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.pending_wave.is_some()
    }

    /// Reports whether the oracle talks to the remote service.
    #[must_use]
    pub fn oracle_is_live(&self) -> bool {
        self.oracle.is_live()
    }

    /// Tower type currently selected in the build menu.
    #[must_use]
    pub fn selected_tower(&self) -> Option<TowerKind> {
        self.builder.selected()
    }

    /// Placement preview for the hovered position.
    #[must_use]
    pub fn preview(&self, cursor: Option<WorldPoint>) -> Option<PlacementPreview> {
        self.builder.preview(cursor, |kind, point| {
            query::placement_check(&self.world, kind, point)
        })
    }

    /// Number of simulated frames since the game started.
    #[must_use]
    pub fn frame(&self) -> u64 {
        query::frame(&self.world)
    }

    /// Enemies still waiting in the current wave's spawn queue.
    #[must_use]
    pub fn pending_enemies(&self) -> u32 {
        self.spawning.pending_enemies()
    }

    /// Ordered waypoints enemies follow.
    #[must_use]
    pub fn path(&self) -> &'static [WorldPoint] {
        query::path(&self.world)
    }

    /// Side length of a placement cell.
    #[must_use]
    pub fn grid_size(&self) -> f32 {
        query::grid_size(&self.world)
    }

    /// Read-only view of the enemies.
    #[must_use]
    pub fn enemies(&self) -> EnemyView {
        query::enemy_view(&self.world)
    }

    /// Read-only view of the towers.
    #[must_use]
    pub fn towers(&self) -> TowerView {
        query::tower_view(&self.world)
    }

    /// Projectiles in flight.
    #[must_use]
    pub fn projectiles(&self) -> Vec<ProjectileSnapshot> {
        query::projectiles(&self.world)
    }

    /// Live particles.
    #[must_use]
    pub fn particles(&self) -> Vec<ParticleSnapshot> {
        query::particles(&self.world)
    }

    /// Player-facing message log.
    #[must_use]
    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }
}
