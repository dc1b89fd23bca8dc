//! Body identifiers and participant classification

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a body in the physics world
///
/// Four values at the top of the range are reserved for the boundary walls;
/// every other value names a ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub u32);

impl BodyId {
    pub const BOUND_LEFT: BodyId = BodyId(u32::MAX - 3);
    pub const BOUND_RIGHT: BodyId = BodyId(u32::MAX - 2);
    pub const BOUND_TOP: BodyId = BodyId(u32::MAX - 1);
    pub const BOUND_BOTTOM: BodyId = BodyId(u32::MAX);

    /// First reserved value; ball ids stay below it
    pub const FIRST_RESERVED: u32 = u32::MAX - 3;

    pub fn is_boundary(&self) -> bool {
        self.0 >= Self::FIRST_RESERVED
    }

    pub fn is_ball(&self) -> bool {
        !self.is_boundary()
    }
}

/// One of the four static walls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    Left,
    Right,
    Top,
    Bottom,
}

impl Boundary {
    pub const ALL: [Boundary; 4] = [
        Boundary::Left,
        Boundary::Right,
        Boundary::Top,
        Boundary::Bottom,
    ];

    pub fn id(&self) -> BodyId {
        match self {
            Boundary::Left => BodyId::BOUND_LEFT,
            Boundary::Right => BodyId::BOUND_RIGHT,
            Boundary::Top => BodyId::BOUND_TOP,
            Boundary::Bottom => BodyId::BOUND_BOTTOM,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Boundary::Left => "left",
            Boundary::Right => "right",
            Boundary::Top => "top",
            Boundary::Bottom => "bottom",
        }
    }
}

/// What a collision participant is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Participant {
    Ball(BodyId),
    Boundary(Boundary),
}

impl Participant {
    pub fn classify(id: BodyId) -> Self {
        match id {
            BodyId::BOUND_LEFT => Participant::Boundary(Boundary::Left),
            BodyId::BOUND_RIGHT => Participant::Boundary(Boundary::Right),
            BodyId::BOUND_TOP => Participant::Boundary(Boundary::Top),
            BodyId::BOUND_BOTTOM => Participant::Boundary(Boundary::Bottom),
            other => Participant::Ball(other),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::Ball(id) => write!(f, "Ball-{}", id.0),
            Participant::Boundary(b) => write!(f, "Bound-{}", b.as_str()),
        }
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Participant::classify(*self).fmt(f)
    }
}
