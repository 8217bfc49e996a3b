//! The particle field: per-frame motion and the connection pass.
//!
//! This is the CPU heart of the effect. A [`ParticleField`] owns a fixed set
//! of particles, advances them once per frame, and recomputes from scratch
//! which pairs sit close enough to be joined by a line. Nothing here touches
//! the GPU; the render layer uploads the results each frame.

use glam::Vec3;

use crate::config::FieldConfig;
use crate::particle::{entropy_seed, spawn_particles, Particle};

/// Rotation around the vertical axis per second of elapsed time, per unit of
/// configured speed. Note the angle applied each frame scales with total
/// elapsed time, so the orbit slowly winds up over the life of the page.
pub const ANGULAR_RATE: f32 = 0.1;

/// Amplitude of the per-frame vertical bobbing offset.
pub const BOB_AMPLITUDE: f32 = 0.5;

/// A line between two particles, alive for one frame only.
///
/// `a < b` always; opacity falls off linearly with distance and reaches zero
/// exactly at the connection distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Index of the first particle.
    pub a: usize,
    /// Index of the second particle.
    pub b: usize,
    /// Rendered opacity for this frame.
    pub opacity: f32,
}

/// A fixed-size set of particles in a 3D volume.
///
/// The particle count never changes after construction. Positions evolve
/// through [`step`](Self::step); [`connections`](Self::connections) derives
/// the current frame's line set without mutating anything.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    speed: f32,
    connection_distance: f32,
    connection_opacity: f32,
}

impl ParticleField {
    /// Spawn a field of `count` particles placed per the config.
    pub fn new(config: &FieldConfig, count: u32) -> Self {
        Self::seeded(config, count, entropy_seed())
    }

    /// Like [`new`](Self::new) but with a fixed RNG seed, for reproducible
    /// layouts.
    pub fn seeded(config: &FieldConfig, count: u32, seed: u64) -> Self {
        Self::from_particles(spawn_particles(count, config.depth, seed), config)
    }

    /// Build a field from pre-placed particles.
    pub fn from_particles(particles: Vec<Particle>, config: &FieldConfig) -> Self {
        Self {
            particles,
            speed: config.speed,
            connection_distance: config.connection_distance,
            connection_opacity: config.connection_opacity,
        }
    }

    /// Number of particles in the field.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The particles, in spawn order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance every particle for a frame at `elapsed` seconds since start.
    ///
    /// Each particle's current position rotates on the x/z plane by an angle
    /// proportional to elapsed time and its own speed factor, and bobs
    /// vertically on a sine of the same clock. Callers gate this on the
    /// reduced-motion flag; the field itself never suppresses motion.
    pub fn step(&mut self, elapsed: f32) {
        let angle_base = self.speed * ANGULAR_RATE * elapsed;

        for particle in &mut self.particles {
            let angle = angle_base * particle.speed_factor;
            let (sin, cos) = angle.sin_cos();

            let Vec3 { x, y, z } = particle.position;
            particle.position.x = x * cos - z * sin;
            particle.position.z = x * sin + z * cos;
            particle.position.y = y + (elapsed * particle.speed_factor).sin() * BOB_AMPLITUDE;
        }
    }

    /// Compute this frame's connection set from scratch.
    ///
    /// Every unordered pair closer than the connection distance produces one
    /// [`Connection`]; pairs at or beyond it produce none. O(n²) over the
    /// particle count, which is capped by configuration at a few hundred.
    pub fn connections(&self) -> Vec<Connection> {
        let mut out = Vec::new();
        let max = self.connection_distance;
        let max_sq = max * max;

        for (a, pa) in self.particles.iter().enumerate() {
            for (offset, pb) in self.particles[a + 1..].iter().enumerate() {
                let dist_sq = pa.position.distance_squared(pb.position);
                if dist_sq < max_sq {
                    let dist = dist_sq.sqrt();
                    out.push(Connection {
                        a,
                        b: a + 1 + offset,
                        opacity: self.connection_opacity * (1.0 - dist / max),
                    });
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FieldConfig {
        FieldConfig {
            reduced_motion: false,
            ..FieldConfig::default()
        }
    }

    fn particle_at(position: Vec3) -> Particle {
        Particle {
            position,
            speed_factor: 0.75,
        }
    }

    #[test]
    fn test_count_fixed_at_construction() {
        let mut field = ParticleField::seeded(&config(), 150, 3);
        assert_eq!(field.len(), 150);

        field.step(1.0);
        let _ = field.connections();
        assert_eq!(field.len(), 150);
    }

    #[test]
    fn test_empty_field() {
        let field = ParticleField::seeded(&config(), 0, 3);
        assert!(field.is_empty());
        assert!(field.connections().is_empty());
    }

    #[test]
    fn test_connection_opacity_example() {
        // Two particles 50 apart with threshold 150 and base opacity 0.15:
        // one connection at 0.15 * (1 - 50/150) = 0.10.
        let field = ParticleField::from_particles(
            vec![particle_at(Vec3::ZERO), particle_at(Vec3::new(50.0, 0.0, 0.0))],
            &config(),
        );

        let connections = field.connections();
        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].a, 0);
        assert_eq!(connections[0].b, 1);
        assert!((connections[0].opacity - 0.10).abs() < 1e-6);
    }

    #[test]
    fn test_opacity_decreases_with_distance() {
        let near = ParticleField::from_particles(
            vec![particle_at(Vec3::ZERO), particle_at(Vec3::new(30.0, 0.0, 0.0))],
            &config(),
        );
        let far = ParticleField::from_particles(
            vec![particle_at(Vec3::ZERO), particle_at(Vec3::new(120.0, 0.0, 0.0))],
            &config(),
        );

        let near_opacity = near.connections()[0].opacity;
        let far_opacity = far.connections()[0].opacity;
        assert!(near_opacity > far_opacity);
        assert!(far_opacity > 0.0);
    }

    #[test]
    fn test_no_connection_at_or_beyond_threshold() {
        for x in [150.0, 150.1, 400.0] {
            let field = ParticleField::from_particles(
                vec![particle_at(Vec3::ZERO), particle_at(Vec3::new(x, 0.0, 0.0))],
                &config(),
            );
            assert!(field.connections().is_empty(), "connected at distance {x}");
        }
    }

    #[test]
    fn test_coincident_particles_connect_at_full_opacity() {
        let field = ParticleField::from_particles(
            vec![particle_at(Vec3::ONE), particle_at(Vec3::ONE)],
            &config(),
        );

        let connections = field.connections();
        assert_eq!(connections.len(), 1);
        assert!((connections[0].opacity - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_connections_are_ordered_pairs() {
        let field = ParticleField::seeded(&config(), 100, 5);
        for connection in field.connections() {
            assert!(connection.a < connection.b);
            assert!(connection.opacity >= 0.0);
            assert!(connection.opacity <= 0.15);
        }
    }

    #[test]
    fn test_step_rotates_on_xz_plane() {
        let mut field = ParticleField::from_particles(
            vec![particle_at(Vec3::new(100.0, 0.0, 0.0))],
            &config(),
        );

        field.step(10.0);
        let pos = field.particles()[0].position;

        // Rotation preserves the x/z radius; bobbing moved y.
        let radius = (pos.x * pos.x + pos.z * pos.z).sqrt();
        assert!((radius - 100.0).abs() < 1e-3);
        assert!(pos.z != 0.0);
        assert!((pos.y - (10.0_f32 * 0.75).sin() * BOB_AMPLITUDE).abs() < 1e-5);
    }

    #[test]
    fn test_unstepped_positions_unchanged() {
        // Reduced motion means the caller skips step(); positions must be
        // bit-for-bit identical while connections keep being recomputed.
        let field = ParticleField::seeded(&config(), 120, 9);
        let before: Vec<Vec3> = field.particles().iter().map(|p| p.position).collect();

        let first = field.connections();
        let second = field.connections();

        let after: Vec<Vec3> = field.particles().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
        assert_eq!(first, second);
    }

    #[test]
    fn test_connections_within_bound() {
        let field = ParticleField::seeded(&config(), 64, 21);
        let n = field.len();
        assert!(field.connections().len() <= n * (n - 1) / 2);
    }
}
