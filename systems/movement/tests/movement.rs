use waypoint_defence_core::{Command, EnemyKind, Event, PlayMode, SpawnGroup, WAYPOINTS};
use waypoint_defence_system_movement::Movement;
use waypoint_defence_world::{self as world, query, World, WorldConfig};

fn attacking_world(lives: u32) -> World {
    let mut world = World::with_config(WorldConfig {
        starting_lives: lives,
        ..WorldConfig::default()
    });
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::BeginWave {
            wave: 1,
            groups: vec![SpawnGroup::new(EnemyKind::Fast, 1, 1, 1.0)],
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::SpawnEnemy {
            kind: EnemyKind::Fast,
            hp_multiplier: 1.0,
        },
        &mut events,
    );
    world
}

fn pump(world: &mut World, movement: &mut Movement) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick, &mut events);
    let mut commands = Vec::new();
    movement.handle(
        &events,
        query::play_mode(world),
        &query::enemy_view(world),
        query::path(world),
        &mut commands,
    );
    events.clear();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn path_length() -> f32 {
    WAYPOINTS
        .windows(2)
        .map(|segment| segment[0].distance_to(segment[1]))
        .sum()
}

#[test]
fn enemies_follow_the_path_and_accumulate_distance() {
    let mut world = attacking_world(20);
    let mut movement = Movement::new();

    for _ in 0..10 {
        let _ = pump(&mut world, &mut movement);
    }

    let enemy = query::enemy_view(&world).into_vec()[0];
    assert!((enemy.travelled - 30.0).abs() < 1e-3, "ten frames at speed three");
    assert!((enemy.position.x() - 30.0).abs() < 1e-3);
    assert_eq!(enemy.position.y(), WAYPOINTS[0].y(), "first leg is horizontal");
}

#[test]
fn walking_the_whole_path_costs_one_life() {
    let mut world = attacking_world(20);
    let mut movement = Movement::new();
    let frames = (path_length() / EnemyKind::Fast.speed()).ceil() as usize + WAYPOINTS.len() + 2;

    let mut leaked = false;
    for _ in 0..frames {
        let events = pump(&mut world, &mut movement);
        if events
            .iter()
            .any(|event| matches!(event, Event::EnemyLeaked { .. }))
        {
            leaked = true;
            break;
        }
    }

    assert!(leaked, "enemy should reach the base within {frames} frames");
    assert!(query::enemy_view(&world).is_empty());
    assert_eq!(query::status(&world).lives, 19);
}

#[test]
fn leaking_the_last_life_halts_further_movement() {
    let mut world = attacking_world(1);
    let mut movement = Movement::new();
    let frames = (path_length() / EnemyKind::Fast.speed()).ceil() as usize + WAYPOINTS.len() + 2;

    for _ in 0..frames {
        let _ = pump(&mut world, &mut movement);
    }

    assert_eq!(query::play_mode(&world), PlayMode::GameOver);
    let frame = query::frame(&world);
    let events = pump(&mut world, &mut movement);
    assert!(events.is_empty(), "game over freezes the world");
    assert_eq!(query::frame(&world), frame);
}
