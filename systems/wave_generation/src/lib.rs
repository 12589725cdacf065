#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave generation and canned tactical advice.
//!
//! The generator here is the offline fallback used whenever the remote oracle
//! is unavailable. It also owns the sanitising rules applied to plans received
//! from the oracle, so both sources produce waves within the same bounds.

use std::ops::RangeInclusive;

use waypoint_defence_core::{EnemyKind, SpawnGroup, WavePlan};

/// Default growth of the difficulty multiplier per wave.
pub const DEFAULT_DIFFICULTY_RAMP: f32 = 0.15;

/// Accepted enemy count per group for generated plans.
pub const COUNT_RANGE: RangeInclusive<u32> = 1..=60;

/// Accepted spawn interval per group, in frames.
pub const INTERVAL_RANGE: RangeInclusive<u32> = 10..=240;

/// Accepted hit-point multiplier per group.
pub const HP_MULTIPLIER_RANGE: RangeInclusive<f32> = 0.25..=50.0;

const ADVICE_LINES: [&str; 6] = [
    "Frost towers near a corner keep enemies inside your kill zone for longer.",
    "Mortars shine where the path doubles back on itself.",
    "Snipers reach across the whole field; place them centrally.",
    "Spread Blasters early, they are cheap and fire quickly.",
    "Save some money before every tenth wave, a boss is coming.",
    "Enemies that slip past the last corner cost you a life each.",
];

/// Generates waves locally from the wave number and a difficulty ramp.
#[derive(Clone, Copy, Debug)]
pub struct WaveGeneration {
    ramp: f32,
}

impl Default for WaveGeneration {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY_RAMP)
    }
}

impl WaveGeneration {
    /// Creates a generator whose difficulty grows by `ramp` per wave.
    #[must_use]
    pub const fn new(ramp: f32) -> Self {
        Self { ramp }
    }

    /// Difficulty multiplier applied to the provided wave.
    #[must_use]
    pub fn difficulty(&self, wave: u32) -> f32 {
        difficulty_for(wave, self.ramp)
    }

    /// Produces the deterministic plan for `wave`.
    #[must_use]
    pub fn generate(&self, wave: u32) -> WavePlan {
        fallback_plan(wave, self.difficulty(wave))
    }
}

/// Computes `1 + ramp * (wave - 1)`, coercing unusable values to `1.0`.
#[must_use]
pub fn difficulty_for(wave: u32, ramp: f32) -> f32 {
    let steps = wave.saturating_sub(1) as f32;
    let difficulty = 1.0 + ramp * steps;
    if difficulty.is_finite() && difficulty > 0.0 {
        difficulty
    } else {
        1.0
    }
}

/// Builds the offline plan for `wave` at the provided difficulty.
#[must_use]
pub fn fallback_plan(wave: u32, difficulty: f32) -> WavePlan {
    let wave = wave.max(1);
    let difficulty = if difficulty.is_finite() && difficulty > 0.0 {
        difficulty
    } else {
        1.0
    };
    let elapsed = wave - 1;

    let mut groups = vec![SpawnGroup::new(
        EnemyKind::Basic,
        scaled_count(5.0, difficulty),
        60_u32.saturating_sub(elapsed.saturating_mul(3)).max(20),
        difficulty,
    )];

    if wave >= 2 {
        groups.push(SpawnGroup::new(
            EnemyKind::Fast,
            scaled_count(3.0, difficulty),
            40_u32.saturating_sub(elapsed.saturating_mul(2)).max(12),
            0.8 * difficulty,
        ));
    }

    if wave >= 4 && wave % 2 == 0 {
        groups.push(SpawnGroup::new(
            EnemyKind::Tank,
            scaled_count(2.0, difficulty),
            90,
            difficulty,
        ));
    }

    if wave % 10 == 0 {
        groups.push(SpawnGroup::new(EnemyKind::Boss, 1, 60, 5.0 * difficulty));
    }

    WavePlan {
        briefing: format!(
            "Wave {wave} approaches. Running in offline simulation mode, enemy composition estimated locally."
        ),
        groups,
    }
}

/// Canned advice line for `wave`, chosen by `wave mod len`.
#[must_use]
pub fn fallback_advice(wave: u32) -> &'static str {
    ADVICE_LINES[wave as usize % ADVICE_LINES.len()]
}

/// Clamps a remotely generated plan into the accepted bounds.
///
/// Returns `None` when nothing usable remains, in which case callers fall
/// back to [`fallback_plan`]. Only the first boss group is kept.
#[must_use]
pub fn sanitize_plan(plan: WavePlan) -> Option<WavePlan> {
    let mut boss_seen = false;
    let mut groups = Vec::with_capacity(plan.groups.len());

    for group in plan.groups {
        if group.kind == EnemyKind::Boss {
            if boss_seen {
                continue;
            }
            boss_seen = true;
        }

        let hp_multiplier = if group.hp_multiplier.is_finite() {
            group
                .hp_multiplier
                .clamp(*HP_MULTIPLIER_RANGE.start(), *HP_MULTIPLIER_RANGE.end())
        } else {
            1.0
        };
        groups.push(SpawnGroup::new(
            group.kind,
            group.count.clamp(*COUNT_RANGE.start(), *COUNT_RANGE.end()),
            group
                .interval
                .clamp(*INTERVAL_RANGE.start(), *INTERVAL_RANGE.end()),
            hp_multiplier,
        ));
    }

    if groups.is_empty() {
        return None;
    }

    let briefing = plan.briefing.trim().to_owned();
    Some(WavePlan { briefing, groups })
}

fn scaled_count(base: f32, difficulty: f32) -> u32 {
    ((base * difficulty).floor() as u32).max(1)
}
