//! Physics world interface
//!
//! The rigid-body engine is external. `ScriptedWorld` stands in for it:
//! it keeps gravity and per-ball velocities that callers set directly and
//! never integrates anything.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::body::BodyId;

/// Operations the controller needs from a 2D physics world
pub trait PhysicsWorld {
    /// Set the uniform acceleration applied to every dynamic body
    fn set_gravity(&mut self, gravity: Vec2);

    fn gravity(&self) -> Vec2;

    /// Create a ball body with the given id
    fn add_ball(&mut self, id: BodyId);

    /// Destroy a ball body. Returns false if no such ball exists.
    fn remove_ball(&mut self, id: BodyId) -> bool;

    /// Current linear velocity of a ball
    fn ball_velocity(&self, id: BodyId) -> Option<Vec2>;

    fn ball_count(&self) -> usize;

    /// Kick every ball with a random linear impulse
    fn apply_random_impulse(&mut self, rng: &mut Pcg32);
}

/// Headless world whose velocities are set by the caller
#[derive(Debug, Clone)]
pub struct ScriptedWorld {
    gravity: Vec2,
    /// Ball velocities by id
    balls: BTreeMap<BodyId, Vec2>,
    /// Half-width of the random impulse range (velocity units)
    impulse_strength: f32,
}

impl Default for ScriptedWorld {
    fn default() -> Self {
        Self::new(crate::consts::IMPULSE_STRENGTH)
    }
}

impl ScriptedWorld {
    pub fn new(impulse_strength: f32) -> Self {
        Self {
            gravity: Vec2::ZERO,
            balls: BTreeMap::new(),
            impulse_strength: impulse_strength.abs(),
        }
    }

    /// Overwrite a ball's velocity. Returns false if the ball does not exist.
    pub fn set_velocity(&mut self, id: BodyId, velocity: Vec2) -> bool {
        match self.balls.get_mut(&id) {
            Some(v) => {
                *v = velocity;
                true
            }
            None => false,
        }
    }
}

impl PhysicsWorld for ScriptedWorld {
    fn set_gravity(&mut self, gravity: Vec2) {
        log::trace!("World gravity -> ({:.2}, {:.2})", gravity.x, gravity.y);
        self.gravity = gravity;
    }

    fn gravity(&self) -> Vec2 {
        self.gravity
    }

    fn add_ball(&mut self, id: BodyId) {
        if id.is_boundary() {
            log::warn!("Refusing to create a ball with reserved id {}", id.0);
            return;
        }
        self.balls.insert(id, Vec2::ZERO);
    }

    fn remove_ball(&mut self, id: BodyId) -> bool {
        self.balls.remove(&id).is_some()
    }

    fn ball_velocity(&self, id: BodyId) -> Option<Vec2> {
        self.balls.get(&id).copied()
    }

    fn ball_count(&self) -> usize {
        self.balls.len()
    }

    fn apply_random_impulse(&mut self, rng: &mut Pcg32) {
        let s = self.impulse_strength;
        if s == 0.0 {
            return;
        }
        // Iteration is in id order so a given seed always kicks the same way.
        // Sampling a unit range keeps `hi - lo` finite for any finite strength.
        for vel in self.balls.values_mut() {
            let kick = Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0));
            *vel += kick * s;
        }
    }
}
