//! Collision speed to haptic amplitude mapping
//!
//! The ceiling starts at a speed measured by dropping a ball from the top of
//! the screen and only ever rises, so the hardest hit seen so far always
//! plays at full strength.

use std::sync::atomic::{AtomicU32, Ordering};

use glam::Vec2;

use crate::consts::{AMPLITUDE_MAX, INITIAL_MAX_VELOCITY};
use crate::error::{BounceError, Result};

/// Self-calibrating velocity ceiling shared between amplitude callers
///
/// Stored as the bit pattern of a non-negative `f32`. For non-negative
/// finite floats the IEEE-754 bit order matches the numeric order, so
/// `fetch_max` on the bits is a lock-free float max.
#[derive(Debug)]
pub struct VelocityCalibrator {
    max_bits: AtomicU32,
}

impl Default for VelocityCalibrator {
    fn default() -> Self {
        Self {
            max_bits: AtomicU32::new(INITIAL_MAX_VELOCITY.to_bits()),
        }
    }
}

impl VelocityCalibrator {
    /// Create a calibrator with the given starting ceiling
    pub fn new(initial_max: f32) -> Result<Self> {
        if !initial_max.is_finite() || initial_max <= 0.0 {
            return Err(BounceError::InvalidCalibration(initial_max));
        }
        Ok(Self {
            max_bits: AtomicU32::new(initial_max.to_bits()),
        })
    }

    /// Current ceiling
    pub fn max_velocity(&self) -> f32 {
        f32::from_bits(self.max_bits.load(Ordering::Acquire))
    }

    /// Map a speed to an amplitude in `[0, 255]`, raising the ceiling first
    /// if the speed exceeds it
    pub fn amplitude_for(&self, speed: f32) -> u8 {
        if !speed.is_finite() || speed < 0.0 {
            log::warn!("Ignoring unusable collision speed {speed}");
            return 0;
        }

        // -0.0 has the sign bit set and would win a bitwise max
        let speed = speed.abs();
        let previous = f32::from_bits(self.max_bits.fetch_max(speed.to_bits(), Ordering::AcqRel));
        let ceiling = previous.max(speed);
        if speed > previous {
            log::debug!("Velocity ceiling raised {previous:.3} -> {speed:.3}");
        }

        let scaled = (speed / ceiling * AMPLITUDE_MAX as f32).floor();
        scaled.clamp(0.0, AMPLITUDE_MAX as f32) as u8
    }

    /// Amplitude for a 2D velocity, using its magnitude
    pub fn amplitude_for_velocity(&self, velocity: Vec2) -> u8 {
        self.amplitude_for(velocity.length())
    }
}
