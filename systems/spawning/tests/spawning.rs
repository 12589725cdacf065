use waypoint_defence_core::{Command, EnemyKind, Event, PlayMode, SpawnGroup};
use waypoint_defence_system_spawning::Spawning;
use waypoint_defence_world::{self as world, query, World};

fn run_frames(
    world: &mut World,
    spawning: &mut Spawning,
    events: &mut Vec<Event>,
    frames: usize,
) -> usize {
    let mut spawned = 0;
    for _ in 0..frames {
        let mut commands = Vec::new();
        world::apply(world, Command::Tick, events);
        spawning.handle(
            events,
            query::play_mode(world),
            query::enemy_view(world).len(),
            &mut commands,
        );
        events.clear();
        for command in commands {
            world::apply(world, command, events);
        }
        spawned += events
            .iter()
            .filter(|event| matches!(event, Event::EnemySpawned { .. }))
            .count();
    }
    spawned
}

fn start_wave(world: &mut World, spawning: &mut Spawning, groups: Vec<SpawnGroup>) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::BeginWave { wave: 1, groups }, &mut events);
    let mut commands = Vec::new();
    spawning.handle(&events, query::play_mode(world), 0, &mut commands);
    assert!(commands.is_empty(), "starting a wave must not spawn immediately");
    events.clear();
    events
}

#[test]
fn three_basics_spawn_within_thirty_one_frames() {
    let mut world = World::new();
    let mut spawning = Spawning::new();
    let mut events = start_wave(
        &mut world,
        &mut spawning,
        vec![SpawnGroup::new(EnemyKind::Basic, 3, 10, 1.0)],
    );

    let spawned = run_frames(&mut world, &mut spawning, &mut events, 31);

    assert_eq!(spawned, 3, "one spawn every ten frames");
    assert_eq!(query::enemy_view(&world).len(), 3);
    assert_eq!(spawning.pending_enemies(), 0);
}

#[test]
fn groups_are_consumed_front_to_back() {
    let mut world = World::new();
    let mut spawning = Spawning::new();
    let mut events = start_wave(
        &mut world,
        &mut spawning,
        vec![
            SpawnGroup::new(EnemyKind::Fast, 2, 2, 1.0),
            SpawnGroup::new(EnemyKind::Tank, 1, 3, 2.0),
        ],
    );

    let _ = run_frames(&mut world, &mut spawning, &mut events, 7);

    let kinds: Vec<EnemyKind> = query::enemy_view(&world)
        .iter()
        .map(|enemy| enemy.kind)
        .collect();
    assert_eq!(kinds, vec![EnemyKind::Fast, EnemyKind::Fast, EnemyKind::Tank]);
    let tank = query::enemy_view(&world).into_vec()[2];
    assert_eq!(tank.max_hp, EnemyKind::Tank.base_hp() * 2.0);
}

#[test]
fn builder_mode_never_spawns() {
    let mut spawning = Spawning::new();
    let mut commands = Vec::new();

    spawning.handle(
        &[
            Event::WaveStarted {
                wave: 1,
                groups: vec![SpawnGroup::new(EnemyKind::Basic, 3, 1, 1.0)],
            },
            Event::FrameAdvanced { frame: 1 },
        ],
        PlayMode::Builder,
        0,
        &mut commands,
    );

    assert!(commands.is_empty());
    assert_eq!(spawning.pending_enemies(), 3, "queue is loaded but untouched");
}

#[test]
fn completion_is_requested_once_the_field_is_clear() {
    let mut spawning = Spawning::new();
    let mut commands = Vec::new();
    spawning.handle(
        &[Event::WaveStarted {
            wave: 4,
            groups: Vec::new(),
        }],
        PlayMode::Attack,
        1,
        &mut commands,
    );
    assert!(commands.is_empty(), "an enemy is still on the path");

    spawning.handle(
        &[Event::FrameAdvanced { frame: 2 }],
        PlayMode::Attack,
        0,
        &mut commands,
    );
    assert_eq!(commands, vec![Command::CompleteWave]);

    commands.clear();
    spawning.handle(
        &[Event::WaveCompleted { wave: 4 }],
        PlayMode::Attack,
        0,
        &mut commands,
    );
    assert!(commands.is_empty(), "acknowledged waves are not completed twice");
}
