//! # netfield - Ambient Particle-Network Backgrounds
//!
//! A decorative 3D "data web" for application backdrops: a few hundred
//! points drift inside a sphere while faint lines join every pair that comes
//! close enough, fading with distance. Rendered with wgpu, driven by winit.
//!
//! ## Quick Start
//!
//! ```ignore
//! use netfield::Background;
//!
//! fn main() -> Result<(), netfield::BackgroundError> {
//!     Background::new()
//!         .with_speed(0.2)
//!         .with_connection_distance(150.0)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### The field
//!
//! [`ParticleField`] owns a fixed set of particles. Once per frame each
//! particle orbits the vertical axis and bobs on a sine wave; then the field
//! recomputes, from scratch, every pair of particles within the connection
//! distance. Connections live for exactly one frame.
//!
//! ### Connections
//!
//! A [`Connection`] is an index pair plus an opacity that falls off linearly
//! with distance:
//!
//! ```text
//! opacity = connection_opacity * (1 - distance / connection_distance)
//! ```
//!
//! ### Environment signals
//!
//! The running background listens for pointer and touch movement (camera
//! drift), resizes (projection update), and [`FieldEvent::ReducedMotion`]
//! user events. With motion reduced, positions freeze but connections keep
//! being recomputed, so the picture stays alive without animating.
//!
//! ### Lifecycle
//!
//! Everything is created when the background starts and released when the
//! window closes; the frame callback guards against firing after teardown.

pub mod background;
pub mod camera;
pub mod config;
pub mod error;
pub mod field;
mod gpu;
pub mod particle;
pub mod pointer;
pub mod time;

pub use background::{Background, FieldEvent};
pub use camera::Camera;
pub use config::{ColorScheme, FieldConfig};
pub use error::{BackgroundError, GpuError};
pub use field::{Connection, ParticleField};
pub use glam::{Vec2, Vec3};
pub use particle::Particle;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use netfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::background::{Background, FieldEvent};
    pub use crate::camera::Camera;
    pub use crate::config::{ColorScheme, FieldConfig};
    pub use crate::error::{BackgroundError, GpuError};
    pub use crate::field::{Connection, ParticleField};
    pub use crate::particle::Particle;
    pub use crate::pointer::PointerTracker;
    pub use crate::time::FrameClock;
    pub use crate::{Vec2, Vec3};
}
