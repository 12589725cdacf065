//! Cosmetic particle bursts driven by a seeded generator.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, UnitCircle};
use waypoint_defence_core::{ParticleSnapshot, Rgb, WorldPoint};

const BURST_SPEED_MIN: f32 = 0.5;
const BURST_SPEED_MAX: f32 = 2.5;
const LIFETIME_MIN: u32 = 20;
const LIFETIME_MAX: u32 = 40;
const SIZE_MIN: f32 = 1.5;
const SIZE_MAX: f32 = 3.5;

#[derive(Clone, Debug)]
struct Particle {
    position: WorldPoint,
    velocity: (f32, f32),
    life: u32,
    max_life: u32,
    color: Rgb,
    size: f32,
}

/// Owns every live particle together with the generator shaping new bursts.
#[derive(Debug)]
pub(crate) struct ParticleField {
    particles: Vec<Particle>,
    rng: ChaCha8Rng,
}

impl ParticleField {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Emits `count` particles radiating from `origin`.
    pub(crate) fn burst(&mut self, origin: WorldPoint, color: Rgb, count: usize) {
        self.particles.reserve(count);
        for _ in 0..count {
            let [dx, dy]: [f32; 2] = UnitCircle.sample(&mut self.rng);
            let speed = self.rng.gen_range(BURST_SPEED_MIN..BURST_SPEED_MAX);
            let life = self.rng.gen_range(LIFETIME_MIN..=LIFETIME_MAX);
            let size = self.rng.gen_range(SIZE_MIN..SIZE_MAX);
            self.particles.push(Particle {
                position: origin,
                velocity: (dx * speed, dy * speed),
                life,
                max_life: life,
                color,
                size,
            });
        }
    }

    /// Moves every particle by its velocity and drops the expired ones.
    pub(crate) fn advance(&mut self) {
        for particle in &mut self.particles {
            particle.position = particle
                .position
                .offset(particle.velocity.0, particle.velocity.1);
            particle.life = particle.life.saturating_sub(1);
        }
        self.particles.retain(|particle| particle.life > 0);
    }

    pub(crate) fn snapshots(&self) -> Vec<ParticleSnapshot> {
        self.particles
            .iter()
            .map(|particle| ParticleSnapshot {
                position: particle.position,
                color: particle.color,
                size: particle.size,
                life_fraction: particle.life as f32 / particle.max_life.max(1) as f32,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bursts_are_reproducible_for_a_seed() {
        let mut first = ParticleField::new(7);
        let mut second = ParticleField::new(7);
        let origin = WorldPoint::new(100.0, 100.0);

        first.burst(origin, Rgb::from_rgb(1, 2, 3), 6);
        second.burst(origin, Rgb::from_rgb(1, 2, 3), 6);

        assert_eq!(first.snapshots(), second.snapshots());
    }

    #[test]
    fn particles_expire_after_their_lifetime() {
        let mut field = ParticleField::new(3);
        field.burst(WorldPoint::default(), Rgb::from_rgb(0, 0, 0), 10);
        assert_eq!(field.snapshots().len(), 10);

        for _ in 0..LIFETIME_MAX {
            field.advance();
        }

        assert!(field.snapshots().is_empty(), "every particle outlived its maximum lifetime");
    }
}
