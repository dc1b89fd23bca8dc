//! RichTap Bounce - collision-driven haptics for bouncing balls
//!
//! Core modules:
//! - `sim`: Physics world boundary (body ids, collision records, population)
//! - `haptics`: Amplitude mapping, pattern assets, player interface
//! - `router`: Collision to haptic dispatch
//! - `sensor`: Accelerometer samples and orientation normalization
//! - `controller`: Event loop tying it all together
//! - `settings`: JSON configuration
//! - `scenario`: Scripted input for the headless demo

pub mod controller;
pub mod error;
pub mod haptics;
pub mod router;
pub mod scenario;
pub mod sensor;
pub mod settings;
pub mod sim;

pub use controller::{
    CollisionForwarder, Controller, ControllerEvent, HapticStats, Lifecycle, MenuAction, Outcome,
    RunEnd, UserCommand,
};
pub use error::{BounceError, Result};
pub use settings::Settings;

/// Tuning constants
pub mod consts {
    use glam::Vec2;

    /// Speed of a ball dropped from the top of the screen when it lands.
    /// Starting ceiling for amplitude scaling.
    pub const INITIAL_MAX_VELOCITY: f32 = 26.5;
    /// Strongest amplitude the haptic player accepts
    pub const AMPLITUDE_MAX: u8 = 255;

    /// Tilt to gravity multipliers; balls fall faster than real gravity
    pub const GRAVITY_SCALE: Vec2 = Vec2::new(6.0, 8.0);

    /// Ball population bounds
    pub const MIN_BALLS: usize = 1;
    pub const MAX_BALLS: usize = 5;
    pub const INITIAL_BALLS: usize = 2;

    /// Random impulse half-range (velocity units)
    pub const IMPULSE_STRENGTH: f32 = 10.0;
    /// Largest impulse strength settings accept
    pub const MAX_IMPULSE_STRENGTH: f32 = 1000.0;
    pub const DEFAULT_SEED: u64 = 0xB0A1;

    /// Pattern asset file names
    pub const WALL_PATTERN_FILE: &str = "wall.he";
    pub const BALL_PATTERN_FILE: &str = "ball.he";
}
