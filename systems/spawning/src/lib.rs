#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system that drains a wave's spawn queue.

use std::collections::VecDeque;

use waypoint_defence_core::{Command, Event, PlayMode, SpawnGroup};

/// Pure system that emits spawn commands group by group while a wave runs.
#[derive(Debug, Default)]
pub struct Spawning {
    queue: VecDeque<SpawnGroup>,
    frame_counter: u32,
    wave_active: bool,
}

impl Spawning {
    /// Creates a new spawning system with an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of enemies still waiting to enter the path.
    #[must_use]
    pub fn pending_enemies(&self) -> u32 {
        self.queue.iter().map(|group| group.count).sum()
    }

    /// Consumes events and the live enemy count to emit spawn commands.
    ///
    /// `WaveStarted` loads the queue regardless of the play mode. Every
    /// `FrameAdvanced` in attack mode advances the head group by one frame.
    /// Once the queue is empty and no enemies remain, `CompleteWave` is
    /// requested until the world acknowledges it with `WaveCompleted`.
    pub fn handle(
        &mut self,
        events: &[Event],
        play_mode: PlayMode,
        enemies_remaining: usize,
        out: &mut Vec<Command>,
    ) {
        let mut frames = 0_u32;
        for event in events {
            match event {
                Event::WaveStarted { groups, .. } => {
                    self.queue = groups.iter().copied().collect();
                    self.frame_counter = 0;
                    self.wave_active = true;
                }
                Event::WaveCompleted { .. } | Event::GameOver { .. } => {
                    self.wave_active = false;
                }
                Event::FrameAdvanced { .. } => frames = frames.saturating_add(1),
                _ => {}
            }
        }

        if play_mode != PlayMode::Attack || !self.wave_active {
            return;
        }

        self.drop_exhausted_groups();
        if self.queue.is_empty() {
            if enemies_remaining == 0 {
                out.push(Command::CompleteWave);
            }
            return;
        }

        for _ in 0..frames {
            self.advance_frame(out);
        }
    }

    fn advance_frame(&mut self, out: &mut Vec<Command>) {
        let Some(group) = self.queue.front_mut() else {
            return;
        };

        self.frame_counter = self.frame_counter.saturating_add(1);
        if self.frame_counter < group.interval.max(1) {
            return;
        }

        self.frame_counter = 0;
        out.push(Command::SpawnEnemy {
            kind: group.kind,
            hp_multiplier: group.hp_multiplier,
        });
        group.count = group.count.saturating_sub(1);
        self.drop_exhausted_groups();
    }

    fn drop_exhausted_groups(&mut self) {
        while self.queue.front().is_some_and(|group| group.count == 0) {
            let _ = self.queue.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_defence_core::EnemyKind;

    #[test]
    fn zero_count_groups_are_skipped() {
        let mut spawning = Spawning::new();
        let mut out = Vec::new();
        spawning.handle(
            &[Event::WaveStarted {
                wave: 1,
                groups: vec![
                    SpawnGroup::new(EnemyKind::Tank, 0, 5, 1.0),
                    SpawnGroup::new(EnemyKind::Fast, 1, 1, 1.0),
                ],
            }],
            PlayMode::Attack,
            0,
            &mut out,
        );
        assert!(out.is_empty(), "no frame advanced yet");

        spawning.handle(
            &[Event::FrameAdvanced { frame: 1 }],
            PlayMode::Attack,
            0,
            &mut out,
        );

        assert_eq!(
            out,
            vec![Command::SpawnEnemy {
                kind: EnemyKind::Fast,
                hp_multiplier: 1.0,
            }]
        );
        assert_eq!(spawning.pending_enemies(), 0);
    }
}
