//! Ball population
//!
//! Tracks which balls exist and hands out their ids. The physics world owns
//! the bodies themselves.

use super::body::BodyId;
use crate::consts::{MAX_BALLS, MIN_BALLS};

/// The set of live balls, bounded to `[min, max]`
#[derive(Debug, Clone)]
pub struct BallPopulation {
    /// Live ball ids, oldest first
    balls: Vec<BodyId>,
    min: usize,
    max: usize,
    /// Next ball id
    next_id: u32,
}

impl Default for BallPopulation {
    fn default() -> Self {
        Self::new(MIN_BALLS, MAX_BALLS)
    }
}

impl BallPopulation {
    /// Empty population with the given bounds. `min` is clamped to at least 1
    /// and `max` to at least `min`.
    pub fn new(min: usize, max: usize) -> Self {
        let min = min.max(1);
        let max = max.max(min);
        Self {
            balls: Vec::with_capacity(max),
            min,
            max,
            next_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn ids(&self) -> &[BodyId] {
        &self.balls
    }

    fn can_add(&self) -> bool {
        self.balls.len() < self.max && self.next_id < BodyId::FIRST_RESERVED
    }

    fn can_remove(&self) -> bool {
        self.balls.len() > self.min
    }

    /// Add a ball if below the maximum, returning its new id
    pub fn try_add(&mut self) -> Option<BodyId> {
        if !self.can_add() {
            return None;
        }
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.balls.push(id);
        Some(id)
    }

    /// Remove the most recently added ball if above the minimum
    pub fn try_remove(&mut self) -> Option<BodyId> {
        if !self.can_remove() {
            return None;
        }
        self.balls.pop()
    }
}
