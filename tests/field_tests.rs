//! Integration tests for the particle field through the public API.

use netfield::prelude::*;

fn quiet_config() -> FieldConfig {
    FieldConfig {
        reduced_motion: false,
        ..FieldConfig::default()
    }
}

fn particle_at(x: f32, y: f32, z: f32) -> Particle {
    Particle {
        position: Vec3::new(x, y, z),
        speed_factor: 0.5,
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_constructed_set_has_exact_count() {
    for count in [0, 1, 2, 100, 200, 333] {
        let field = ParticleField::seeded(&quiet_config(), count, 1);
        assert_eq!(field.len(), count as usize);
    }
}

#[test]
fn test_positions_bounded_by_depth() {
    let config = FieldConfig {
        depth: 250.0,
        ..quiet_config()
    };
    let field = ParticleField::seeded(&config, 400, 2);
    for particle in field.particles() {
        assert!(particle.position.length() <= 250.0 + 1e-3);
    }
}

#[test]
fn test_count_derived_from_surface_width() {
    let config = quiet_config();
    assert_eq!(config.resolved_count(400), 100);
    assert_eq!(config.resolved_count(1920), 200);
}

// ============================================================================
// Connections
// ============================================================================

#[test]
fn test_worked_example() {
    // particleCount=2, A at origin, B at distance 50, threshold 150,
    // base opacity 0.15 => one connection with opacity 0.10.
    let field = ParticleField::from_particles(
        vec![particle_at(0.0, 0.0, 0.0), particle_at(0.0, 50.0, 0.0)],
        &quiet_config(),
    );

    let connections = field.connections();
    assert_eq!(connections.len(), 1);
    assert!((connections[0].opacity - 0.10).abs() < 1e-6);
}

#[test]
fn test_opacity_strictly_decreasing_with_distance() {
    let mut last = f32::INFINITY;
    for distance in [10.0, 50.0, 100.0, 140.0, 149.0] {
        let field = ParticleField::from_particles(
            vec![particle_at(0.0, 0.0, 0.0), particle_at(distance, 0.0, 0.0)],
            &quiet_config(),
        );
        let opacity = field.connections()[0].opacity;
        assert!(opacity < last, "opacity not decreasing at distance {distance}");
        assert!(opacity > 0.0);
        last = opacity;
    }
}

#[test]
fn test_no_connection_at_threshold_or_beyond() {
    for distance in [150.0, 151.0, 1000.0] {
        let field = ParticleField::from_particles(
            vec![particle_at(0.0, 0.0, 0.0), particle_at(distance, 0.0, 0.0)],
            &quiet_config(),
        );
        assert!(field.connections().is_empty());
    }
}

#[test]
fn test_connections_recomputed_per_frame() {
    let mut field = ParticleField::from_particles(
        vec![particle_at(0.0, 0.0, 0.0), particle_at(149.0, 0.0, 0.0)],
        &FieldConfig {
            speed: 5.0,
            ..quiet_config()
        },
    );

    let before = field.connections();
    assert_eq!(before.len(), 1);

    // A big step swings the pair apart and back; whatever the geometry now
    // says is what the new frame gets.
    field.step(100.0);
    let after = field.connections();

    for connection in &after {
        assert!(connection.opacity > 0.0);
        assert!(connection.a < connection.b);
    }
}

// ============================================================================
// Reduced motion
// ============================================================================

#[test]
fn test_reduced_motion_freezes_positions() {
    // The frame loop skips step() under reduced motion. Positions must stay
    // bit-for-bit identical across any number of connection passes.
    let field = ParticleField::seeded(&quiet_config(), 200, 17);
    let before: Vec<Vec3> = field.particles().iter().map(|p| p.position).collect();

    for _ in 0..10 {
        let _ = field.connections();
    }

    let after: Vec<Vec3> = field.particles().iter().map(|p| p.position).collect();
    assert_eq!(before, after);
}

#[test]
fn test_motion_changes_positions() {
    let mut field = ParticleField::seeded(&quiet_config(), 50, 17);
    let before: Vec<Vec3> = field.particles().iter().map(|p| p.position).collect();

    field.step(5.0);

    let after: Vec<Vec3> = field.particles().iter().map(|p| p.position).collect();
    assert_ne!(before, after);
    assert_eq!(before.len(), after.len());
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn test_builder_feeds_field() {
    let background = Background::new()
        .with_particle_count(32)
        .with_connection_distance(80.0)
        .with_connection_opacity(0.5)
        .with_depth(100.0);

    let config = background.config();
    let field = ParticleField::seeded(config, config.resolved_count(1280), 3);

    assert_eq!(field.len(), 32);
    for particle in field.particles() {
        assert!(particle.position.length() <= 100.0 + 1e-3);
    }
}
