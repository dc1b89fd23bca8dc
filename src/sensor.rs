//! Accelerometer samples and orientation normalization

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Source of a sensor sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SensorKind {
    #[default]
    Accelerometer,
    Other,
}

/// Raw sensor reading in device coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    #[serde(default)]
    pub kind: SensorKind,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl SensorSample {
    pub fn accelerometer(x: f32, y: f32, z: f32) -> Self {
        Self {
            kind: SensorKind::Accelerometer,
            x,
            y,
            z,
        }
    }
}

/// Screen rotation relative to the device's natural orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScreenRotation {
    #[default]
    Rot0,
    Rot90,
    Rot180,
    Rot270,
}

/// Turns a raw sample into a gravity vector in screen coordinates
pub trait GravityNormalizer {
    fn normalize(&self, sample: &SensorSample) -> Vec2;
}

/// Normalizer for a screen locked to one rotation
///
/// Remaps the accelerometer axes so gravity reads the same no matter how the
/// device's natural orientation relates to the locked screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrientationLock {
    pub rotation: ScreenRotation,
}

impl OrientationLock {
    pub fn new(rotation: ScreenRotation) -> Self {
        Self { rotation }
    }
}

impl GravityNormalizer for OrientationLock {
    fn normalize(&self, s: &SensorSample) -> Vec2 {
        match self.rotation {
            ScreenRotation::Rot0 => Vec2::new(s.x, s.y),
            ScreenRotation::Rot90 => Vec2::new(-s.y, s.x),
            ScreenRotation::Rot180 => Vec2::new(-s.x, -s.y),
            ScreenRotation::Rot270 => Vec2::new(s.y, -s.x),
        }
    }
}
