//! Collision to haptic dispatch
//!
//! | participants      | pattern | amplitude                   |
//! |-------------------|---------|-----------------------------|
//! | ball x ball       | ball    | pattern default             |
//! | ball x boundary   | wall    | from the ball's speed       |
//! | boundary x bound. | none    |                             |
//!
//! Exits are logged and never play anything.

use crate::haptics::{PatternKind, VelocityCalibrator};
use crate::sim::{BodyId, CollisionEvent, CollisionPhase, Participant, PhysicsWorld};

/// A haptic call decided for one collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HapticCall {
    pub pattern: PatternKind,
    /// `None` plays the pattern at its own intensity
    pub amplitude: Option<u8>,
}

/// Outcome of routing one collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Play(HapticCall),
    /// Collision exit, logged only
    Exited,
    /// Nothing to play (two walls, or the ball's velocity is unknown)
    Dropped,
}

/// Decide what, if anything, to play for a collision
pub fn route<W: PhysicsWorld + ?Sized>(
    event: &CollisionEvent,
    world: &W,
    calibrator: &VelocityCalibrator,
) -> Dispatch {
    let a = Participant::classify(event.a);
    let b = Participant::classify(event.b);

    if event.phase == CollisionPhase::Exited {
        log::info!("{a} is collided with {b} - exited");
        return Dispatch::Exited;
    }

    log::info!(
        "{a} is collided with {b}, thread: {:?}",
        std::thread::current().id()
    );

    match (a, b) {
        (Participant::Ball(_), Participant::Ball(_)) => Dispatch::Play(HapticCall {
            pattern: PatternKind::Ball,
            amplitude: None,
        }),
        (Participant::Ball(ball), Participant::Boundary(_))
        | (Participant::Boundary(_), Participant::Ball(ball)) => {
            match ball_velocity(event, world, ball) {
                Some(velocity) => Dispatch::Play(HapticCall {
                    pattern: PatternKind::Wall,
                    amplitude: Some(calibrator.amplitude_for_velocity(velocity)),
                }),
                None => {
                    log::debug!("No velocity for {ball}, dropping wall hit");
                    Dispatch::Dropped
                }
            }
        }
        (Participant::Boundary(_), Participant::Boundary(_)) => {
            log::debug!("Boundary pair {a}/{b} ignored");
            Dispatch::Dropped
        }
    }
}

/// Contact-time snapshot if present, otherwise the world's current velocity
fn ball_velocity<W: PhysicsWorld + ?Sized>(
    event: &CollisionEvent,
    world: &W,
    ball: BodyId,
) -> Option<glam::Vec2> {
    event
        .velocity_of(ball)
        .or_else(|| world.ball_velocity(ball))
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::ScriptedWorld;

    fn world_with_balls() -> ScriptedWorld {
        let mut world = ScriptedWorld::default();
        world.add_ball(BodyId(0));
        world.add_ball(BodyId(1));
        world.set_velocity(BodyId(0), Vec2::new(0.0, 10.0));
        world.set_velocity(BodyId(1), Vec2::new(20.0, 0.0));
        world
    }

    #[test]
    fn test_ball_ball_plays_ball_pattern() {
        let world = world_with_balls();
        let cal = VelocityCalibrator::default();
        let d = route(&CollisionEvent::entered(BodyId(0), BodyId(1)), &world, &cal);
        assert_eq!(
            d,
            Dispatch::Play(HapticCall {
                pattern: PatternKind::Ball,
                amplitude: None
            })
        );
        // Ball hits do not touch the ceiling
        assert_eq!(cal.max_velocity(), 26.5);
    }

    #[test]
    fn test_ball_wall_either_order() {
        let world = world_with_balls();
        let cal = VelocityCalibrator::default();

        let d1 = route(
            &CollisionEvent::entered(BodyId(0), BodyId::BOUND_BOTTOM),
            &world,
            &cal,
        );
        let d2 = route(
            &CollisionEvent::entered(BodyId::BOUND_RIGHT, BodyId(1)),
            &world,
            &cal,
        );
        assert_eq!(
            d1,
            Dispatch::Play(HapticCall {
                pattern: PatternKind::Wall,
                amplitude: Some(96)
            })
        );
        assert_eq!(
            d2,
            Dispatch::Play(HapticCall {
                pattern: PatternKind::Wall,
                amplitude: Some(192)
            })
        );
    }

    #[test]
    fn test_snapshot_beats_world_velocity() {
        let world = world_with_balls();
        let cal = VelocityCalibrator::default();
        let ev = CollisionEvent::entered(BodyId::BOUND_TOP, BodyId(0))
            .with_velocity(BodyId(0), Vec2::new(30.0, 0.0));

        let d = route(&ev, &world, &cal);
        assert_eq!(
            d,
            Dispatch::Play(HapticCall {
                pattern: PatternKind::Wall,
                amplitude: Some(255)
            })
        );
        assert_eq!(cal.max_velocity(), 30.0);
    }

    #[test]
    fn test_unknown_ball_is_dropped() {
        let world = world_with_balls();
        let cal = VelocityCalibrator::default();
        let d = route(
            &CollisionEvent::entered(BodyId(42), BodyId::BOUND_LEFT),
            &world,
            &cal,
        );
        assert_eq!(d, Dispatch::Dropped);
    }

    #[test]
    fn test_boundary_pair_is_dropped() {
        let world = world_with_balls();
        let cal = VelocityCalibrator::default();
        let d = route(
            &CollisionEvent::entered(BodyId::BOUND_LEFT, BodyId::BOUND_TOP),
            &world,
            &cal,
        );
        assert_eq!(d, Dispatch::Dropped);
    }

    #[test]
    fn test_exit_never_plays() {
        let world = world_with_balls();
        let cal = VelocityCalibrator::default();
        for (a, b) in [
            (BodyId(0), BodyId(1)),
            (BodyId(0), BodyId::BOUND_BOTTOM),
            (BodyId::BOUND_TOP, BodyId(1)),
        ] {
            assert_eq!(route(&CollisionEvent::exited(a, b), &world, &cal), Dispatch::Exited);
        }
        assert_eq!(cal.max_velocity(), 26.5);
    }
}
