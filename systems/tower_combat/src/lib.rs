#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that arms projectiles for towers that acquired a target.
//!
//! Targeting decides who shoots at whom. This system decides what leaves the
//! barrel: the damage, flight speed, splash flag and slow duration of every
//! shot follow from the firing tower's kind. The world only carries the shot
//! out.

use waypoint_defence_core::{
    Command, PlayMode, Shot, TowerKind, TowerTarget, TowerView, PROJECTILE_SPEED,
};

/// Projectile parameters fired by a tower of the provided kind.
#[must_use]
pub const fn shot_for(kind: TowerKind) -> Shot {
    Shot {
        damage: kind.damage(),
        speed: PROJECTILE_SPEED,
        splash: kind.splash(),
        slow_frames: kind.slow_frames(),
    }
}

/// Turns target assignments into armed firing commands.
#[derive(Debug, Default)]
pub struct TowerCombat;

impl TowerCombat {
    /// Creates the combat system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits one `Command::FireProjectile` per target whose tower still stands.
    pub fn handle(
        &mut self,
        play_mode: PlayMode,
        towers: &TowerView,
        tower_targets: &[TowerTarget],
        out: &mut Vec<Command>,
    ) {
        if play_mode != PlayMode::Attack {
            return;
        }

        out.extend(tower_targets.iter().filter_map(|target| {
            let tower = towers.get(target.tower)?;
            Some(Command::FireProjectile {
                tower: target.tower,
                target: target.enemy,
                shot: shot_for(tower.kind),
            })
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_defence_core::{EnemyId, TowerId, TowerSnapshot, WorldPoint};

    fn tower(id: u32, kind: TowerKind) -> TowerSnapshot {
        TowerSnapshot {
            id: TowerId::new(id),
            kind,
            position: WorldPoint::new(60.0, 60.0),
            cooldown: 0,
        }
    }

    fn aim(tower: u32, enemy: u32) -> TowerTarget {
        TowerTarget {
            tower: TowerId::new(tower),
            enemy: EnemyId::new(enemy),
            tower_position: WorldPoint::new(60.0, 60.0),
            enemy_position: WorldPoint::new(100.0, 100.0),
        }
    }

    fn fire_all(kinds: &[TowerKind]) -> Vec<Shot> {
        let towers = TowerView::from_snapshots(
            kinds
                .iter()
                .enumerate()
                .map(|(index, kind)| tower(index as u32, *kind))
                .collect(),
        );
        let targets: Vec<TowerTarget> = (0..kinds.len() as u32).map(|id| aim(id, 9)).collect();
        let mut out = Vec::new();

        TowerCombat::new().handle(PlayMode::Attack, &towers, &targets, &mut out);

        out.into_iter()
            .map(|command| match command {
                Command::FireProjectile { shot, .. } => shot,
                other => panic!("unexpected command {other:?}"),
            })
            .collect()
    }

    #[test]
    fn only_mortars_fire_splash_shells() {
        let shots = fire_all(&TowerKind::ALL);

        let splashing: Vec<bool> = shots.iter().map(|shot| shot.splash).collect();
        assert_eq!(splashing, vec![false, false, true, false]);
    }

    #[test]
    fn frost_shots_carry_the_slow_and_little_damage() {
        let shots = fire_all(&[TowerKind::Frost, TowerKind::Sniper]);

        assert_eq!(shots[0].slow_frames, 90);
        assert_eq!(shots[0].damage, 4.0);
        assert_eq!(shots[1].slow_frames, 0);
        assert_eq!(shots[1].damage, 45.0);
    }

    #[test]
    fn every_shot_flies_at_projectile_speed() {
        let shots = fire_all(&TowerKind::ALL);

        assert_eq!(shots.len(), TowerKind::ALL.len());
        assert!(shots.iter().all(|shot| shot.speed == PROJECTILE_SPEED));
    }

    #[test]
    fn builder_mode_and_unknown_towers_fire_nothing() {
        let towers = TowerView::from_snapshots(vec![tower(1, TowerKind::Blaster)]);
        let mut out = Vec::new();
        let mut combat = TowerCombat::new();

        combat.handle(PlayMode::Builder, &towers, &[aim(1, 3)], &mut out);
        assert!(out.is_empty());

        combat.handle(PlayMode::Attack, &towers, &[aim(42, 3), aim(1, 3)], &mut out);
        assert_eq!(
            out,
            vec![Command::FireProjectile {
                tower: TowerId::new(1),
                target: EnemyId::new(3),
                shot: shot_for(TowerKind::Blaster),
            }]
        );
    }
}
