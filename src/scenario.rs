//! Scripted input for the headless demo
//!
//! A scenario is a JSON list of steps standing in for the sensor, the
//! physics engine and the user:
//!
//! ```json
//! { "steps": [
//!     { "step": "resume" },
//!     { "step": "sensor", "x": 0.4, "y": 9.7 },
//!     { "step": "entered", "a": 0, "b": "bottom", "velocity": [0.0, -14.0] },
//!     { "step": "exited", "a": 0, "b": "bottom", "delay_ms": 16 },
//!     { "step": "close" }
//! ] }
//! ```

use std::path::Path;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::controller::{ControllerEvent, Lifecycle, MenuAction, UserCommand};
use crate::error::{BounceError, Result};
use crate::sensor::SensorSample;
use crate::settings::Settings;
use crate::sim::{BallPopulation, BodyId, Boundary, CollisionEvent};

/// A body as written in a scenario: a ball number or a wall name
///
/// Ball numbers in the range reserved for walls are rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
#[serde(try_from = "RawBodyRef")]
pub enum BodyRef {
    Ball(u32),
    Wall(Boundary),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBodyRef {
    Ball(u32),
    Wall(Boundary),
}

impl TryFrom<RawBodyRef> for BodyRef {
    type Error = String;

    fn try_from(raw: RawBodyRef) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawBodyRef::Ball(n) if n >= BodyId::FIRST_RESERVED => Err(format!(
                "ball number {n} is reserved; balls must be below {}",
                BodyId::FIRST_RESERVED
            )),
            RawBodyRef::Ball(n) => Ok(BodyRef::Ball(n)),
            RawBodyRef::Wall(b) => Ok(BodyRef::Wall(b)),
        }
    }
}

impl BodyRef {
    pub fn id(&self) -> BodyId {
        match self {
            BodyRef::Ball(n) => BodyId(*n),
            BodyRef::Wall(b) => b.id(),
        }
    }
}

/// What a step does
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Action {
    Sensor {
        x: f32,
        y: f32,
        #[serde(default)]
        z: f32,
    },
    Entered {
        a: BodyRef,
        b: BodyRef,
        /// Velocity of the ball participant at contact
        #[serde(default)]
        velocity: Option<Vec2>,
    },
    Exited {
        a: BodyRef,
        b: BodyRef,
    },
    AddBall,
    RemoveBall,
    Impulse,
    About,
    Close,
    Resume,
    Pause,
}

impl Action {
    pub fn to_event(&self) -> ControllerEvent {
        match self {
            Action::Sensor { x, y, z } => {
                ControllerEvent::Sensor(SensorSample::accelerometer(*x, *y, *z))
            }
            Action::Entered { a, b, velocity } => {
                let (a, b) = (a.id(), b.id());
                let mut ev = CollisionEvent::entered(a, b);
                if let Some(v) = velocity {
                    let ball = if a.is_ball() { a } else { b };
                    ev = ev.with_velocity(ball, *v);
                }
                ControllerEvent::Collision(ev)
            }
            Action::Exited { a, b } => {
                ControllerEvent::Collision(CollisionEvent::exited(a.id(), b.id()))
            }
            Action::AddBall => ControllerEvent::Command(UserCommand::AddBall),
            Action::RemoveBall => ControllerEvent::Command(UserCommand::RemoveBall),
            Action::Impulse => ControllerEvent::Command(UserCommand::Impulse),
            Action::About => ControllerEvent::Menu(MenuAction::About),
            Action::Close => ControllerEvent::Menu(MenuAction::Close),
            Action::Resume => ControllerEvent::Lifecycle(Lifecycle::Resume),
            Action::Pause => ControllerEvent::Lifecycle(Lifecycle::Pause),
        }
    }
}

/// One step, optionally preceded by a pause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(flatten)]
    pub action: Action,
    #[serde(default)]
    pub delay_ms: u64,
}

impl From<Action> for Step {
    fn from(action: Action) -> Self {
        Self {
            action,
            delay_ms: 0,
        }
    }
}

/// An ordered list of steps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_json(json: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| BounceError::Json {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| BounceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json, path)
    }

    /// Deterministic demo run: tilt, bounces, button presses, then close.
    ///
    /// Tracks the same population the controller builds from `settings`, so
    /// every collision names a ball that exists when it is delivered.
    pub fn demo(settings: &Settings, rounds: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let mut steps: Vec<Step> = vec![Action::Resume.into()];
        let mut population = BallPopulation::new(settings.min_balls, settings.max_balls);
        for _ in 0..settings.initial_balls {
            population.try_add();
        }

        for round in 0..rounds {
            steps.push(Step {
                action: Action::Sensor {
                    x: rng.random_range(-3.0..3.0),
                    y: rng.random_range(6.0..9.8),
                    z: rng.random_range(0.0..2.0),
                },
                delay_ms: 16,
            });

            let balls = population.ids();
            let ball = balls[rng.random_range(0..balls.len())].0;
            let wall = Boundary::ALL[rng.random_range(0..Boundary::ALL.len())];
            let speed = rng.random_range(0.5..40.0f32);
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            steps.push(Step {
                action: Action::Entered {
                    a: BodyRef::Ball(ball),
                    b: BodyRef::Wall(wall),
                    velocity: Some(Vec2::from_angle(angle) * speed),
                },
                delay_ms: 16,
            });
            steps.push(
                Action::Exited {
                    a: BodyRef::Ball(ball),
                    b: BodyRef::Wall(wall),
                }
                .into(),
            );

            if balls.len() > 1 && rng.random_bool(0.3) {
                let (a, b) = (balls[0].0, balls[balls.len() - 1].0);
                steps.push(
                    Action::Entered {
                        a: BodyRef::Ball(a),
                        b: BodyRef::Ball(b),
                        velocity: None,
                    }
                    .into(),
                );
                steps.push(
                    Action::Exited {
                        a: BodyRef::Ball(a),
                        b: BodyRef::Ball(b),
                    }
                    .into(),
                );
            }

            match round % 7 {
                3 if population.try_add().is_some() => steps.push(Action::AddBall.into()),
                5 if population.try_remove().is_some() => steps.push(Action::RemoveBall.into()),
                6 => steps.push(Action::Impulse.into()),
                _ => {}
            }
        }

        steps.push(Action::About.into());
        steps.push(Action::Pause.into());
        steps.push(Action::Close.into());
        Self { steps }
    }

    /// Send every step into the controller channel, honoring delays.
    /// Returns how many events were delivered.
    pub fn replay(&self, tx: &Sender<ControllerEvent>) -> usize {
        let mut sent = 0;
        for step in &self.steps {
            if step.delay_ms > 0 {
                thread::sleep(Duration::from_millis(step.delay_ms));
            }
            if tx.send(step.action.to_event()).is_err() {
                log::debug!("Controller stopped after {sent} events");
                break;
            }
            sent += 1;
        }
        sent
    }
}
