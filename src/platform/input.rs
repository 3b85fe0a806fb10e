//! Pointer/touch to playfield mapping
//!
//! The canvas is drawn at a fixed logical resolution and stretched to
//! whatever size the page gives it, so pointer positions have to be scaled
//! back into logical units before they can steer the ship. Clamping to the
//! ship's travel region happens in `Session::steer`.

use glam::Vec2;

use crate::tuning::Tuning;

/// On-screen rectangle of the rendering surface, in display pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Display-space to logical-space converter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMapper {
    field: Vec2,
}

impl PointerMapper {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            field: tuning.field_size(),
        }
    }

    /// Logical units per display pixel along each axis. A degenerate
    /// surface maps 1:1.
    pub fn scale(&self, surface: &SurfaceRect) -> Vec2 {
        let axis = |logical: f32, display: f32| {
            if display.is_finite() && display > 0.0 {
                logical / display
            } else {
                1.0
            }
        };
        Vec2::new(
            axis(self.field.x, surface.width),
            axis(self.field.y, surface.height),
        )
    }

    /// Map a client-space point into playfield units. The result is not
    /// clamped and may lie outside the field.
    pub fn map(&self, client: Vec2, surface: &SurfaceRect) -> Vec2 {
        let local = client - Vec2::new(surface.left, surface.top);
        local * self.scale(surface)
    }
}
