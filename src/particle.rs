//! Particle entity and initial placement.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// A single point in the field.
///
/// The position is mutated in place every frame; the speed factor is fixed
/// at creation and scales both the orbital rate and the vertical bobbing of
/// this particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Current position in world space.
    pub position: Vec3,
    /// Per-particle rate multiplier in `[0.5, 1.0)`.
    pub speed_factor: f32,
}

impl Particle {
    /// Spawn a particle at a uniform-random point inside a sphere of the
    /// given radius.
    ///
    /// The polar angle is drawn through a uniform cosine so points do not
    /// cluster at the poles; the radius is uniform in `[0, radius)`, which
    /// concentrates points toward the center the way the effect wants.
    pub fn spawn(rng: &mut SmallRng, radius: f32) -> Self {
        let r = rng.gen::<f32>() * radius;
        let theta = rng.gen::<f32>() * TAU;
        let cos_phi = rng.gen::<f32>() * 2.0 - 1.0;
        let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();

        Self {
            position: Vec3::new(
                r * sin_phi * theta.cos(),
                r * sin_phi * theta.sin(),
                r * cos_phi,
            ),
            speed_factor: 0.5 + rng.gen::<f32>() * 0.5,
        }
    }
}

/// Spawn `count` particles inside a sphere of the given radius.
pub fn spawn_particles(count: u32, radius: f32, seed: u64) -> Vec<Particle> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count).map(|_| Particle::spawn(&mut rng, radius)).collect()
}

/// Seed derived from the wall clock, different each run.
pub(crate) fn entropy_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_count() {
        assert_eq!(spawn_particles(0, 400.0, 1).len(), 0);
        assert_eq!(spawn_particles(200, 400.0, 1).len(), 200);
    }

    #[test]
    fn test_spawn_within_radius() {
        for particle in spawn_particles(500, 400.0, 7) {
            assert!(particle.position.length() <= 400.0 + 1e-3);
        }
    }

    #[test]
    fn test_speed_factor_range() {
        for particle in spawn_particles(500, 400.0, 11) {
            assert!(particle.speed_factor >= 0.5);
            assert!(particle.speed_factor < 1.0);
        }
    }

    #[test]
    fn test_seed_reproducible() {
        let a = spawn_particles(32, 100.0, 99);
        let b = spawn_particles(32, 100.0, 99);
        assert_eq!(a, b);
    }
}
