//! Pointer and touch tracking.
//!
//! Digests raw winit events into the one value the field cares about: the
//! pointer's offset from the center of the surface, pre-scaled for camera
//! follow. Events are fire-and-forget and last-value-wins; the frame loop
//! reads the latest offset once per frame.

use glam::Vec2;
use winit::event::{TouchPhase, WindowEvent};

/// Scale applied to the pixel offset from the surface center.
pub const POINTER_SCALE: f32 = 0.05;

/// Tracks the most recent pointer position as a scaled center offset.
#[derive(Debug)]
pub struct PointerTracker {
    window_size: (u32, u32),
    offset: Vec2,
}

impl PointerTracker {
    /// Create a tracker for a surface of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            window_size: (width, height),
            offset: Vec2::ZERO,
        }
    }

    /// The latest pointer offset from center, scaled by [`POINTER_SCALE`].
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Update the surface size used for center calculation.
    pub(crate) fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    /// Process a winit window event. Only cursor and touch movement are of
    /// interest; everything else is ignored.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.set_position(position.x as f32, position.y as f32);
            }
            WindowEvent::Touch(touch) => {
                if matches!(touch.phase, TouchPhase::Started | TouchPhase::Moved) {
                    self.set_position(touch.location.x as f32, touch.location.y as f32);
                }
            }
            _ => {}
        }
    }

    fn set_position(&mut self, x: f32, y: f32) {
        let (w, h) = self.window_size;
        self.offset = Vec2::new(
            (x - w as f32 / 2.0) * POINTER_SCALE,
            (y - h as f32 / 2.0) * POINTER_SCALE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_zero_offset() {
        let mut tracker = PointerTracker::new(800, 600);
        tracker.set_position(400.0, 300.0);
        assert_eq!(tracker.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_offset_scaling() {
        let mut tracker = PointerTracker::new(800, 600);
        tracker.set_position(800.0, 0.0);
        assert_eq!(tracker.offset(), Vec2::new(400.0 * POINTER_SCALE, -300.0 * POINTER_SCALE));
    }

    #[test]
    fn test_last_value_wins() {
        let mut tracker = PointerTracker::new(800, 600);
        tracker.set_position(0.0, 0.0);
        tracker.set_position(650.0, 450.0);
        assert_eq!(tracker.offset(), Vec2::new(250.0 * POINTER_SCALE, 150.0 * POINTER_SCALE));
    }

    #[test]
    fn test_resize_moves_center() {
        let mut tracker = PointerTracker::new(800, 600);
        tracker.set_position(500.0, 500.0);
        let before = tracker.offset();

        tracker.set_window_size(1000, 1000);
        tracker.set_position(500.0, 500.0);
        assert_ne!(tracker.offset(), before);
        assert_eq!(tracker.offset(), Vec2::ZERO);
    }
}
