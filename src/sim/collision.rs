//! Collision records delivered by the physics engine
//!
//! The engine may raise callbacks off the main thread, so records carry
//! everything the consumer needs, including an optional velocity snapshot
//! taken at contact time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::BodyId;

/// Whether two bodies started or stopped touching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionPhase {
    Entered,
    Exited,
}

/// A single collision callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub phase: CollisionPhase,
    pub a: BodyId,
    pub b: BodyId,
    /// Velocity of `a` at contact, if the engine supplied one
    pub velocity_a: Option<Vec2>,
    /// Velocity of `b` at contact, if the engine supplied one
    pub velocity_b: Option<Vec2>,
}

impl CollisionEvent {
    pub fn entered(a: BodyId, b: BodyId) -> Self {
        Self {
            phase: CollisionPhase::Entered,
            a,
            b,
            velocity_a: None,
            velocity_b: None,
        }
    }

    pub fn exited(a: BodyId, b: BodyId) -> Self {
        Self {
            phase: CollisionPhase::Exited,
            a,
            b,
            velocity_a: None,
            velocity_b: None,
        }
    }

    /// Attach a contact-time velocity for one of the participants
    pub fn with_velocity(mut self, id: BodyId, velocity: Vec2) -> Self {
        if id == self.a {
            self.velocity_a = Some(velocity);
        } else if id == self.b {
            self.velocity_b = Some(velocity);
        }
        self
    }

    /// Snapshot velocity for `id`, if it is a participant and one was given
    pub fn velocity_of(&self, id: BodyId) -> Option<Vec2> {
        if id == self.a {
            self.velocity_a
        } else if id == self.b {
            self.velocity_b
        } else {
            None
        }
    }
}

/// Receives collision callbacks from a physics engine
pub trait CollisionListener {
    fn on_collision_entered(&self, a: BodyId, b: BodyId);
    fn on_collision_exited(&self, a: BodyId, b: BodyId);

    /// Entered callback with a velocity snapshot for one participant
    fn on_collision_entered_with(&self, a: BodyId, b: BodyId, ball: BodyId, velocity: Vec2);
}
