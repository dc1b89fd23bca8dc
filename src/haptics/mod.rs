//! Haptic feedback
//!
//! - `amplitude`: speed to intensity mapping with a rising ceiling
//! - `pattern`: effect description assets
//! - `player`: playback engine interface

pub mod amplitude;
pub mod pattern;
pub mod player;

pub use amplitude::VelocityCalibrator;
pub use pattern::{PatternBank, PatternKind, load_pattern_text};
pub use player::{HapticPlayer, LogPlayer, NullPlayer, PlayerCall, RecordingPlayer, SDK_VERSION};
