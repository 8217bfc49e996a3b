//! Field configuration.
//!
//! All values are fixed once the background starts running. Anything left at
//! its default matches the original ambient effect: a few hundred cyan points
//! inside a 400-unit sphere, joined by faint blue lines under 150 units apart.

use glam::Vec3;

/// Surface width below which the smaller particle count is used.
pub const MOBILE_WIDTH: u32 = 768;

/// Particle count for narrow surfaces.
pub const MOBILE_PARTICLE_COUNT: u32 = 100;

/// Particle count for regular surfaces.
pub const DESKTOP_PARTICLE_COUNT: u32 = 200;

/// Colors for the three visual layers of the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScheme {
    /// Point color.
    pub particles: Vec3,
    /// Connection line color.
    pub connections: Vec3,
    /// Clear color behind everything.
    pub background: Vec3,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            particles: hex(0x00eaff),   // Cyan
            connections: hex(0x2f81f7), // Blue
            background: hex(0x0d0d0d),  // Near black
        }
    }
}

/// Convert a 24-bit `0xRRGGBB` value to a linear-ish RGB triple.
pub fn hex(rgb: u32) -> Vec3 {
    Vec3::new(
        ((rgb >> 16) & 0xFF) as f32 / 255.0,
        ((rgb >> 8) & 0xFF) as f32 / 255.0,
        (rgb & 0xFF) as f32 / 255.0,
    )
}

/// Configuration for an ambient particle field.
///
/// Constructed through the [`Background`](crate::Background) builder;
/// immutable for the lifetime of the field (the one exception is
/// `reduced_motion`, which tracks the host preference at runtime).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Number of particles. `None` derives the count from the surface width.
    pub particle_count: Option<u32>,
    /// Rendered point size in world units.
    pub particle_size: f32,
    /// Distance below which two particles are connected.
    pub connection_distance: f32,
    /// Opacity of a connection at distance zero; fades linearly to 0 at the
    /// connection distance.
    pub connection_opacity: f32,
    /// Layer colors.
    pub colors: ColorScheme,
    /// Radius of the placement sphere.
    pub depth: f32,
    /// Global angular speed scalar.
    pub speed: f32,
    /// Whether the camera drifts toward the pointer.
    pub follow_mouse: bool,
    /// Suppress all motion (connections are still recomputed).
    pub reduced_motion: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: None,
            particle_size: 0.5,
            connection_distance: 150.0,
            connection_opacity: 0.15,
            colors: ColorScheme::default(),
            depth: 400.0,
            speed: 0.2,
            follow_mouse: true,
            reduced_motion: reduced_motion_preference(),
        }
    }
}

impl FieldConfig {
    /// Resolve the particle count for a surface of the given pixel width.
    pub fn resolved_count(&self, surface_width: u32) -> u32 {
        self.particle_count.unwrap_or(if surface_width < MOBILE_WIDTH {
            MOBILE_PARTICLE_COUNT
        } else {
            DESKTOP_PARTICLE_COUNT
        })
    }
}

/// Sample the host's reduced-motion preference.
///
/// Desktop environments expose no portable media-query equivalent, so the
/// `REDUCED_MOTION` environment variable stands in: set to anything but `0`
/// to start with motion suppressed. Hosts embedding the field can override
/// the sampled value through the builder, and flip it at runtime with
/// [`FieldEvent::ReducedMotion`](crate::FieldEvent).
pub fn reduced_motion_preference() -> bool {
    std::env::var_os("REDUCED_MOTION").is_some_and(|v| v != "0")
}
