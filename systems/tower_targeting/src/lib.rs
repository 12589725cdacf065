#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic tower targets from world snapshots.

use waypoint_defence_core::{
    EnemyId, EnemyView, PlayMode, TowerId, TowerKind, TowerTarget, TowerView, WorldPoint,
};

/// Tower targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    tower_workspace: Vec<TowerWorkspace>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes targets for every tower that is ready to fire.
    ///
    /// Each ready tower picks the in-range enemy that travelled furthest along
    /// the path, preferring the lowest identifier on ties. The output buffer is
    /// cleared before populating it with the latest assignments.
    pub fn handle(
        &mut self,
        play_mode: PlayMode,
        towers: &TowerView,
        enemies: &EnemyView,
        out: &mut Vec<TowerTarget>,
    ) {
        out.clear();

        if play_mode != PlayMode::Attack || enemies.is_empty() {
            return;
        }

        self.prepare_tower_workspace(towers);
        if self.tower_workspace.is_empty() {
            return;
        }

        for tower in &self.tower_workspace {
            let range = tower.kind.range();
            let mut best: Option<BestCandidate> = None;

            for enemy in enemies.iter() {
                if tower.position.distance_to(enemy.position) > range {
                    continue;
                }

                let current = BestCandidate {
                    travelled: enemy.travelled,
                    enemy: enemy.id,
                    position: enemy.position,
                };

                match &mut best {
                    Some(existing) => {
                        if current.precedes(existing) {
                            *existing = current;
                        }
                    }
                    None => best = Some(current),
                }
            }

            if let Some(best_candidate) = best {
                out.push(TowerTarget {
                    tower: tower.id,
                    enemy: best_candidate.enemy,
                    tower_position: tower.position,
                    enemy_position: best_candidate.position,
                });
            }
        }
    }

    fn prepare_tower_workspace(&mut self, towers: &TowerView) {
        self.tower_workspace.clear();
        self.tower_workspace.extend(
            towers
                .iter()
                .filter(|snapshot| snapshot.cooldown == 0)
                .map(|snapshot| TowerWorkspace {
                    id: snapshot.id,
                    kind: snapshot.kind,
                    position: snapshot.position,
                }),
        );
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TowerWorkspace {
    id: TowerId,
    kind: TowerKind,
    position: WorldPoint,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BestCandidate {
    travelled: f32,
    enemy: EnemyId,
    position: WorldPoint,
}

impl BestCandidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.travelled != other.travelled {
            return self.travelled > other.travelled;
        }

        self.enemy < other.enemy
    }
}
