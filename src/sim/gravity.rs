//! Device tilt to world gravity

use glam::Vec2;

use crate::consts::GRAVITY_SCALE;

/// Scales a normalized tilt vector into simulation gravity
///
/// X is flipped because screen X grows right while the accelerometer reports
/// positive X when the device tilts left. The scales make balls fall faster
/// than real gravity would.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityDriver {
    pub scale: Vec2,
}

impl Default for GravityDriver {
    fn default() -> Self {
        Self {
            scale: GRAVITY_SCALE,
        }
    }
}

impl GravityDriver {
    pub fn new(scale: Vec2) -> Self {
        Self { scale }
    }

    pub fn world_gravity(&self, tilt: Vec2) -> Vec2 {
        Vec2::new(-tilt.x * self.scale.x, tilt.y * self.scale.y)
    }
}
