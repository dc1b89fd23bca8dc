//! Physics world boundary
//!
//! The rigid-body engine is external; this module holds the types that cross
//! into and out of it:
//! - Body ids and wall classification
//! - Collision records and the listener callback trait
//! - Ball population bookkeeping
//! - Tilt to gravity scaling
//! - The world trait and a scripted stand-in

pub mod body;
pub mod collision;
pub mod gravity;
pub mod population;
pub mod world;

pub use body::{BodyId, Boundary, Participant};
pub use collision::{CollisionEvent, CollisionListener, CollisionPhase};
pub use gravity::GravityDriver;
pub use population::BallPopulation;
pub use world::{PhysicsWorld, ScriptedWorld};
