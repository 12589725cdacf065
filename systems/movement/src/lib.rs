#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that walks enemies along the waypoint path.

use waypoint_defence_core::{Command, EnemySnapshot, EnemyView, Event, PlayMode, WorldPoint};

const SLOW_FACTOR: f32 = 0.5;

/// Pure system that reacts to frame events and emits movement commands.
#[derive(Debug, Default)]
pub struct Movement {
    scratch: Vec<Command>,
}

impl Movement {
    /// Creates a new movement system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one `MoveEnemy` or `LeakEnemy` per enemy for every advanced frame.
    ///
    /// Enemies whose waypoint index is past the end of `path` reached the base
    /// and are reported as leaks instead of moving.
    pub fn handle(
        &mut self,
        events: &[Event],
        play_mode: PlayMode,
        enemies: &EnemyView,
        path: &[WorldPoint],
        out: &mut Vec<Command>,
    ) {
        if play_mode != PlayMode::Attack || enemies.is_empty() {
            return;
        }

        if !events
            .iter()
            .any(|event| matches!(event, Event::FrameAdvanced { .. }))
        {
            return;
        }

        self.scratch.clear();
        for enemy in enemies.iter() {
            self.scratch.push(step_enemy(enemy, path));
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

fn step_enemy(enemy: &EnemySnapshot, path: &[WorldPoint]) -> Command {
    let Some(target) = path.get(enemy.waypoint).copied() else {
        return Command::LeakEnemy { enemy: enemy.id };
    };

    let slowed = enemy.slow_frames > 0;
    let speed = if slowed {
        enemy.kind.speed() * SLOW_FACTOR
    } else {
        enemy.kind.speed()
    };

    let (position, waypoint) = if enemy.position.distance_to(target) < speed {
        (target, enemy.waypoint + 1)
    } else {
        (enemy.position.step_towards(target, speed), enemy.waypoint)
    };

    Command::MoveEnemy {
        enemy: enemy.id,
        position,
        waypoint,
        travelled: speed,
        slow_frames: enemy.slow_frames.saturating_sub(1),
    }
}
