//! Runtime settings
//!
//! Loaded from an optional JSON file. Every field has a default so a partial
//! file only overrides what it names.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{BounceError, Result};
use crate::sensor::ScreenRotation;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Assets ===
    /// Directory holding the pattern files
    pub assets_dir: PathBuf,
    /// Pattern played when a ball hits a wall
    pub wall_pattern: String,
    /// Pattern played when two balls hit each other
    pub ball_pattern: String,

    // === Haptics ===
    /// Starting velocity ceiling for amplitude scaling
    pub initial_max_velocity: f32,
    /// Loop count passed with every play call
    pub loop_count: u32,

    // === Simulation ===
    /// Tilt to gravity scale factors (x, y)
    pub gravity_scale: Vec2,
    /// Balls created at startup
    pub initial_balls: usize,
    pub min_balls: usize,
    pub max_balls: usize,
    /// Half-width of the random impulse range
    pub impulse_strength: f32,
    /// Seed for the impulse RNG
    pub seed: u64,
    /// Locked screen rotation
    pub rotation: ScreenRotation,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            wall_pattern: WALL_PATTERN_FILE.to_string(),
            ball_pattern: BALL_PATTERN_FILE.to_string(),

            initial_max_velocity: INITIAL_MAX_VELOCITY,
            loop_count: 0,

            gravity_scale: GRAVITY_SCALE,
            initial_balls: INITIAL_BALLS,
            min_balls: MIN_BALLS,
            max_balls: MAX_BALLS,
            impulse_strength: IMPULSE_STRENGTH,
            seed: DEFAULT_SEED,
            rotation: ScreenRotation::Rot0,
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| BounceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&json).map_err(|source| BounceError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Check bounds that the rest of the crate relies on
    pub fn validate(&self) -> Result<()> {
        if !self.initial_max_velocity.is_finite() || self.initial_max_velocity <= 0.0 {
            return Err(BounceError::InvalidCalibration(self.initial_max_velocity));
        }
        if self.min_balls < 1 {
            return Err(BounceError::InvalidSettings(
                "min_balls must be at least 1".into(),
            ));
        }
        if self.min_balls > self.max_balls {
            return Err(BounceError::InvalidSettings(format!(
                "min_balls ({}) exceeds max_balls ({})",
                self.min_balls, self.max_balls
            )));
        }
        if !(self.min_balls..=self.max_balls).contains(&self.initial_balls) {
            return Err(BounceError::InvalidSettings(format!(
                "initial_balls ({}) outside [{}, {}]",
                self.initial_balls, self.min_balls, self.max_balls
            )));
        }
        if !self.gravity_scale.is_finite() {
            return Err(BounceError::InvalidSettings(
                "gravity_scale must be finite".into(),
            ));
        }
        if !(0.0..=MAX_IMPULSE_STRENGTH).contains(&self.impulse_strength) {
            return Err(BounceError::InvalidSettings(format!(
                "impulse_strength ({}) outside [0, {MAX_IMPULSE_STRENGTH}]",
                self.impulse_strength
            )));
        }
        Ok(())
    }
}
