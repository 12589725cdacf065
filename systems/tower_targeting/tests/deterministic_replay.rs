use waypoint_defence_core::{
    Command, EnemyId, EnemyKind, Event, SpawnGroup, TowerKind, TowerTarget, WorldPoint,
};
use waypoint_defence_system_tower_targeting::TowerTargeting;
use waypoint_defence_world::{self as world, query, World};

fn scripted_commands() -> Vec<Command> {
    vec![
        Command::PlaceTower {
            kind: TowerKind::Sniper,
            position: WorldPoint::new(60.0, 60.0),
        },
        Command::BeginWave {
            wave: 1,
            groups: vec![SpawnGroup::new(EnemyKind::Basic, 2, 5, 1.0)],
        },
        Command::SpawnEnemy {
            kind: EnemyKind::Basic,
            hp_multiplier: 1.0,
        },
        Command::MoveEnemy {
            enemy: EnemyId::new(0),
            position: WorldPoint::new(6.0, 100.0),
            waypoint: 1,
            travelled: 6.0,
            slow_frames: 0,
        },
        Command::SpawnEnemy {
            kind: EnemyKind::Basic,
            hp_multiplier: 1.0,
        },
        Command::MoveEnemy {
            enemy: EnemyId::new(1),
            position: WorldPoint::new(6.0, 100.0),
            waypoint: 1,
            travelled: 6.0,
            slow_frames: 0,
        },
        Command::MoveEnemy {
            enemy: EnemyId::new(1),
            position: WorldPoint::new(9.0, 100.0),
            waypoint: 1,
            travelled: 3.0,
            slow_frames: 0,
        },
        Command::LeakEnemy {
            enemy: EnemyId::new(1),
        },
    ]
}

fn replay(script: Vec<Command>) -> (Vec<Vec<TowerTarget>>, Vec<Event>) {
    let mut world = World::new();
    let mut targeting = TowerTargeting::new();
    let mut events = Vec::new();
    let mut assignments = Vec::new();

    for command in script {
        world::apply(&mut world, command, &mut events);
        let mut targets = Vec::new();
        targeting.handle(
            query::play_mode(&world),
            &query::tower_view(&world),
            &query::enemy_view(&world),
            &mut targets,
        );
        assignments.push(targets);
    }

    (assignments, events)
}

#[test]
fn replay_is_deterministic_and_tracks_the_leading_enemy() {
    let first = replay(scripted_commands());
    let second = replay(scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");

    let (assignments, _) = first;
    let leaders: Vec<Option<EnemyId>> = assignments
        .iter()
        .map(|targets| targets.first().map(|target| target.enemy))
        .collect();

    assert_eq!(
        leaders,
        vec![
            None,
            None,
            Some(EnemyId::new(0)),
            Some(EnemyId::new(0)),
            Some(EnemyId::new(0)),
            Some(EnemyId::new(0)),
            Some(EnemyId::new(1)),
            Some(EnemyId::new(0)),
        ],
        "equal progress prefers the older enemy, more progress wins"
    );
}
