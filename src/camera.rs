//! Camera with pointer-follow smoothing.

use glam::{Mat4, Vec2, Vec3};

/// Fraction of the gap to the pointer target closed each frame.
pub const CAMERA_BLEND: f32 = 0.01;

const FOV_Y_DEGREES: f32 = 50.0;
const NEAR: f32 = 1.0;
const FAR: f32 = 3000.0;
const DISTANCE: f32 = 1000.0;

/// Perspective camera looking at the scene origin.
///
/// Starts on the z axis at a fixed distance; when mouse follow is enabled it
/// drifts a little toward the pointer offset each frame while staying aimed
/// at the origin.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    aspect: f32,
}

impl Camera {
    /// Create a camera for a surface with the given aspect ratio.
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, DISTANCE),
            aspect,
        }
    }

    /// Ease toward the pointer offset, closing [`CAMERA_BLEND`] of the gap.
    ///
    /// The vertical axis is inverted so the scene leans away from the
    /// pointer rather than chasing it.
    pub fn follow(&mut self, target: Vec2) {
        self.position.x += (target.x - self.position.x) * CAMERA_BLEND;
        self.position.y += (-target.y - self.position.y) * CAMERA_BLEND;
    }

    /// Update the projection aspect ratio after a resize.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Current aspect ratio.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Combined view-projection matrix for the current frame.
    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), self.aspect, NEAR, FAR);
        proj * view
    }

    /// Clip-space scale of one world unit at w == 1, per axis.
    ///
    /// Lets the point shader expand world-sized billboards after projection.
    pub fn point_scale(&self) -> Vec2 {
        let focal = 1.0 / (FOV_Y_DEGREES.to_radians() / 2.0).tan();
        Vec2::new(focal / self.aspect, focal)
    }
}
