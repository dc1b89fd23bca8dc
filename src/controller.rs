//! Application controller
//!
//! Single consumer of every input: sensor samples, collision callbacks,
//! button presses, menu actions and lifecycle changes all arrive as
//! `ControllerEvent`s on one channel. Producers on other threads only ever
//! send, so world, player and population are touched from one thread.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::error::Result;
use crate::haptics::{HapticPlayer, PatternBank, PatternKind, VelocityCalibrator};
use crate::router::{self, Dispatch, HapticCall};
use crate::sensor::{GravityNormalizer, SensorKind, SensorSample};
use crate::settings::Settings;
use crate::sim::{
    BallPopulation, BodyId, CollisionEvent, CollisionListener, GravityDriver, PhysicsWorld,
};

/// On-screen buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    AddBall,
    RemoveBall,
    Impulse,
}

/// Options menu and navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    About,
    Close,
    /// Navigation "up"
    Home,
}

/// Foreground state changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Came to the foreground; start listening to the accelerometer
    Resume,
    /// Left the foreground; stop listening
    Pause,
}

/// Everything the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEvent {
    Sensor(SensorSample),
    Collision(CollisionEvent),
    Command(UserCommand),
    Menu(MenuAction),
    Lifecycle(Lifecycle),
    /// Stop the event loop
    Shutdown,
}

/// Result of handling one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// A dialog to show the user
    Dialog { title: String, message: String },
    /// The app should close
    Finish,
}

/// Why the event loop returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    /// Close, Home or Shutdown was handled
    Finished,
    /// Every sender was dropped
    Disconnected,
}

/// Counters for what the controller has done
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HapticStats {
    pub wall_hits: u64,
    pub ball_hits: u64,
    pub exits: u64,
    pub dropped: u64,
    pub gravity_updates: u64,
    pub max_velocity: f32,
}

/// Wires sensor, physics and haptics together
pub struct Controller<W, P, N> {
    world: W,
    player: P,
    normalizer: N,
    patterns: PatternBank,
    calibrator: Arc<VelocityCalibrator>,
    population: BallPopulation,
    gravity: GravityDriver,
    rng: Pcg32,
    loop_count: u32,
    /// Accelerometer listener registered
    listening: bool,
    shut_down: bool,
    stats: HapticStats,
}

impl<W, P, N> Controller<W, P, N>
where
    W: PhysicsWorld,
    P: HapticPlayer,
    N: GravityNormalizer,
{
    /// Build a controller, loading patterns from the settings' asset directory
    pub fn from_settings(settings: &Settings, world: W, player: P, normalizer: N) -> Result<Self> {
        let patterns = PatternBank::load(
            &settings.assets_dir,
            &settings.wall_pattern,
            &settings.ball_pattern,
        );
        Self::new(settings, patterns, world, player, normalizer)
    }

    /// Build a controller: init the player and create the starting balls
    pub fn new(
        settings: &Settings,
        patterns: PatternBank,
        world: W,
        mut player: P,
        normalizer: N,
    ) -> Result<Self> {
        settings.validate()?;
        let calibrator = Arc::new(VelocityCalibrator::new(settings.initial_max_velocity)?);

        player.init();

        let mut controller = Self {
            world,
            player,
            normalizer,
            patterns,
            calibrator,
            population: BallPopulation::new(settings.min_balls, settings.max_balls),
            gravity: GravityDriver::new(settings.gravity_scale),
            rng: Pcg32::seed_from_u64(settings.seed),
            loop_count: settings.loop_count,
            listening: false,
            shut_down: false,
            stats: HapticStats::default(),
        };

        for _ in 0..settings.initial_balls {
            controller.add_ball();
        }
        controller.stats.max_velocity = controller.calibrator.max_velocity();

        Ok(controller)
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn population(&self) -> &BallPopulation {
        &self.population
    }

    /// Shared handle to the velocity ceiling
    pub fn calibrator(&self) -> Arc<VelocityCalibrator> {
        Arc::clone(&self.calibrator)
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn stats(&self) -> HapticStats {
        HapticStats {
            max_velocity: self.calibrator.max_velocity(),
            ..self.stats
        }
    }

    /// Text for the About dialog
    pub fn about_text(&self) -> String {
        format!(
            "App Version: {}\nRichTap SDK: {}",
            env!("CARGO_PKG_VERSION"),
            self.player.sdk_version()
        )
    }

    /// Handle one event
    pub fn handle(&mut self, event: ControllerEvent) -> Outcome {
        match event {
            ControllerEvent::Sensor(sample) => {
                self.on_sensor(&sample);
                Outcome::Continue
            }
            ControllerEvent::Collision(collision) => {
                self.on_collision(&collision);
                Outcome::Continue
            }
            ControllerEvent::Command(cmd) => {
                self.on_command(cmd);
                Outcome::Continue
            }
            ControllerEvent::Menu(action) => self.on_menu(action),
            ControllerEvent::Lifecycle(Lifecycle::Resume) => {
                self.listening = true;
                log::debug!("Accelerometer listener registered");
                Outcome::Continue
            }
            ControllerEvent::Lifecycle(Lifecycle::Pause) => {
                self.listening = false;
                log::debug!("Accelerometer listener unregistered");
                Outcome::Continue
            }
            ControllerEvent::Shutdown => Outcome::Finish,
        }
    }

    /// Consume events in arrival order until finished or every sender is gone
    pub fn run(&mut self, rx: Receiver<ControllerEvent>) -> RunEnd {
        for event in rx.iter() {
            match self.handle(event) {
                Outcome::Continue => {}
                Outcome::Dialog { title, message } => {
                    log::info!("[{title}] {}", message.replace('\n', " | "));
                }
                Outcome::Finish => return RunEnd::Finished,
            }
        }
        log::debug!("All event senders dropped");
        RunEnd::Disconnected
    }

    /// Stop and release the haptic player. Later calls do nothing.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.player.stop();
        self.player.quit();
    }

    fn on_sensor(&mut self, sample: &SensorSample) {
        if !self.listening || sample.kind != SensorKind::Accelerometer {
            return;
        }
        let tilt = self.normalizer.normalize(sample);
        let gravity = self.gravity.world_gravity(tilt);
        self.world.set_gravity(gravity);
        self.stats.gravity_updates += 1;
    }

    fn on_collision(&mut self, collision: &CollisionEvent) {
        if self.shut_down {
            return;
        }
        match router::route(collision, &self.world, &self.calibrator) {
            Dispatch::Play(call) => self.play(call),
            Dispatch::Exited => self.stats.exits += 1,
            Dispatch::Dropped => self.stats.dropped += 1,
        }
    }

    fn play(&mut self, call: HapticCall) {
        match call.pattern {
            PatternKind::Wall => self.stats.wall_hits += 1,
            PatternKind::Ball => self.stats.ball_hits += 1,
        }
        log::trace!("Play {} pattern at {:?}", call.pattern.as_str(), call.amplitude);
        let pattern = self.patterns.get(call.pattern);
        self.player
            .play_pattern(pattern, self.loop_count, call.amplitude);
    }

    fn on_command(&mut self, cmd: UserCommand) {
        match cmd {
            UserCommand::AddBall => {
                self.add_ball();
            }
            UserCommand::RemoveBall => match self.population.try_remove() {
                Some(id) => {
                    if !self.world.remove_ball(id) {
                        log::warn!("World had no body for {id}");
                    }
                    log::info!("Removed {id} ({} left)", self.population.len());
                }
                None => log::debug!("Keeping the last ball"),
            },
            UserCommand::Impulse => {
                self.world.apply_random_impulse(&mut self.rng);
                log::debug!("Random impulse applied to {} balls", self.world.ball_count());
            }
        }
    }

    fn on_menu(&mut self, action: MenuAction) -> Outcome {
        match action {
            MenuAction::About => Outcome::Dialog {
                title: "About...".to_string(),
                message: self.about_text(),
            },
            MenuAction::Close | MenuAction::Home => Outcome::Finish,
        }
    }

    fn add_ball(&mut self) -> Option<BodyId> {
        match self.population.try_add() {
            Some(id) => {
                self.world.add_ball(id);
                log::info!("Added {id} ({} total)", self.population.len());
                Some(id)
            }
            None => {
                log::debug!("Ball limit reached");
                None
            }
        }
    }
}

/// Forwards physics-engine callbacks into the controller's channel
///
/// Cheap to clone and `Send`, so it can be handed to an engine that calls
/// back from its own thread.
#[derive(Debug, Clone)]
pub struct CollisionForwarder {
    tx: Sender<ControllerEvent>,
}

impl CollisionForwarder {
    pub fn new(tx: Sender<ControllerEvent>) -> Self {
        Self { tx }
    }

    fn forward(&self, event: CollisionEvent) {
        if self.tx.send(ControllerEvent::Collision(event)).is_err() {
            log::debug!("Controller gone, dropping collision {:?}", event.phase);
        }
    }
}

impl CollisionListener for CollisionForwarder {
    fn on_collision_entered(&self, a: BodyId, b: BodyId) {
        self.forward(CollisionEvent::entered(a, b));
    }

    fn on_collision_exited(&self, a: BodyId, b: BodyId) {
        self.forward(CollisionEvent::exited(a, b));
    }

    fn on_collision_entered_with(&self, a: BodyId, b: BodyId, ball: BodyId, velocity: Vec2) {
        self.forward(CollisionEvent::entered(a, b).with_velocity(ball, velocity));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::thread;

    use super::*;
    use crate::haptics::RecordingPlayer;
    use crate::sensor::{OrientationLock, ScreenRotation};
    use crate::sim::ScriptedWorld;

    type TestController = Controller<ScriptedWorld, RecordingPlayer, OrientationLock>;

    fn controller() -> TestController {
        Controller::new(
            &Settings::default(),
            PatternBank::new("WALL", "BALL"),
            ScriptedWorld::default(),
            RecordingPlayer::new(),
            OrientationLock::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_startup_state() {
        let c = controller();
        assert_eq!(c.population().len(), 2);
        assert_eq!(c.world().ball_count(), 2);
        assert_eq!(c.player().calls[0], crate::haptics::PlayerCall::Init);
        assert!(!c.is_listening());
    }

    #[test]
    fn test_six_adds_cap_at_five() {
        let mut c = controller();
        for _ in 0..6 {
            c.handle(ControllerEvent::Command(UserCommand::AddBall));
        }
        assert_eq!(c.population().len(), 5);
        assert_eq!(c.world().ball_count(), 5);
    }

    #[test]
    fn test_removes_stop_at_one() {
        let mut c = controller();
        for _ in 0..4 {
            c.handle(ControllerEvent::Command(UserCommand::RemoveBall));
        }
        assert_eq!(c.population().len(), 1);
        assert_eq!(c.world().ball_count(), 1);
        assert_eq!(c.population().ids(), &[BodyId(0)]);
    }

    #[test]
    fn test_sensor_needs_resume() {
        let mut c = controller();
        let sample = SensorSample::accelerometer(1.0, 9.0, 0.0);

        c.handle(ControllerEvent::Sensor(sample));
        assert_eq!(c.world().gravity(), Vec2::ZERO);

        c.handle(ControllerEvent::Lifecycle(Lifecycle::Resume));
        c.handle(ControllerEvent::Sensor(sample));
        assert_eq!(c.world().gravity(), Vec2::new(-6.0, 72.0));

        c.handle(ControllerEvent::Lifecycle(Lifecycle::Pause));
        c.handle(ControllerEvent::Sensor(SensorSample::accelerometer(0.0, 0.0, 0.0)));
        assert_eq!(c.world().gravity(), Vec2::new(-6.0, 72.0));
        assert_eq!(c.stats().gravity_updates, 1);
    }

    #[test]
    fn test_non_accelerometer_ignored() {
        let mut c = controller();
        c.handle(ControllerEvent::Lifecycle(Lifecycle::Resume));
        let sample = SensorSample {
            kind: SensorKind::Other,
            x: 3.0,
            y: 3.0,
            z: 3.0,
        };
        c.handle(ControllerEvent::Sensor(sample));
        assert_eq!(c.world().gravity(), Vec2::ZERO);
    }

    #[test]
    fn test_rotated_normalizer() {
        let mut c = Controller::new(
            &Settings::default(),
            PatternBank::default(),
            ScriptedWorld::default(),
            RecordingPlayer::new(),
            OrientationLock::new(ScreenRotation::Rot90),
        )
        .unwrap();
        c.handle(ControllerEvent::Lifecycle(Lifecycle::Resume));
        c.handle(ControllerEvent::Sensor(SensorSample::accelerometer(1.0, 2.0, 0.0)));
        // Rot90 maps (1, 2) to (-2, 1)
        assert_eq!(c.world().gravity(), Vec2::new(12.0, 8.0));
    }

    #[test]
    fn test_collisions_pick_patterns() {
        let mut c = controller();
        c.world_mut().set_velocity(BodyId(0), Vec2::new(0.0, 10.0));
        c.world_mut().set_velocity(BodyId(1), Vec2::new(0.0, 20.0));

        c.handle(ControllerEvent::Collision(CollisionEvent::entered(
            BodyId(0),
            BodyId::BOUND_BOTTOM,
        )));
        c.handle(ControllerEvent::Collision(CollisionEvent::entered(
            BodyId(0),
            BodyId(1),
        )));
        c.handle(ControllerEvent::Collision(CollisionEvent::entered(
            BodyId::BOUND_LEFT,
            BodyId(1),
        )));
        c.handle(ControllerEvent::Collision(CollisionEvent::exited(
            BodyId(0),
            BodyId(1),
        )));

        assert_eq!(
            c.player().plays(),
            vec![("WALL", Some(96)), ("BALL", None), ("WALL", Some(192))]
        );
        let stats = c.stats();
        assert_eq!((stats.wall_hits, stats.ball_hits, stats.exits), (2, 1, 1));
    }

    #[test]
    fn test_exits_never_play() {
        let mut c = controller();
        for (a, b) in [(BodyId(0), BodyId(1)), (BodyId(1), BodyId::BOUND_TOP)] {
            c.handle(ControllerEvent::Collision(CollisionEvent::exited(a, b)));
        }
        assert!(c.player().plays().is_empty());
    }

    #[test]
    fn test_impulse_moves_balls() {
        let mut c = controller();
        c.handle(ControllerEvent::Command(UserCommand::Impulse));
        let moved = c
            .population()
            .ids()
            .iter()
            .any(|id| c.world().ball_velocity(*id) != Some(Vec2::ZERO));
        assert!(moved);
    }

    #[test]
    fn test_menu() {
        let mut c = controller();
        match c.handle(ControllerEvent::Menu(MenuAction::About)) {
            Outcome::Dialog { title, message } => {
                assert_eq!(title, "About...");
                assert!(message.starts_with("App Version: "));
                assert!(message.contains("\nRichTap SDK: "));
            }
            other => panic!("expected dialog, got {other:?}"),
        }
        assert_eq!(c.handle(ControllerEvent::Menu(MenuAction::Close)), Outcome::Finish);
        assert_eq!(c.handle(ControllerEvent::Menu(MenuAction::Home)), Outcome::Finish);
    }

    #[test]
    fn test_shutdown_once() {
        use crate::haptics::PlayerCall;

        let mut c = controller();
        c.shutdown();
        c.shutdown();
        let calls = &c.player().calls;
        assert_eq!(calls.iter().filter(|x| **x == PlayerCall::Stop).count(), 1);
        assert_eq!(calls.iter().filter(|x| **x == PlayerCall::Quit).count(), 1);
        assert_eq!(calls.last(), Some(&PlayerCall::Quit));

        // Nothing plays after shutdown
        c.handle(ControllerEvent::Collision(CollisionEvent::entered(
            BodyId(0),
            BodyId(1),
        )));
        assert!(c.player().plays().is_empty());
    }

    #[test]
    fn test_run_from_engine_thread() {
        let mut c = controller();
        let (tx, rx) = mpsc::channel();
        let forwarder = CollisionForwarder::new(tx.clone());
        let calibrator = c.calibrator();

        let engine = thread::spawn(move || {
            // A hard hit mapped on the engine side raises the shared ceiling
            assert_eq!(calibrator.amplitude_for(40.0), 255);
            forwarder.on_collision_entered_with(
                BodyId(0),
                BodyId::BOUND_BOTTOM,
                BodyId(0),
                Vec2::new(0.0, 30.0),
            );
            forwarder.on_collision_exited(BodyId(0), BodyId::BOUND_BOTTOM);
            forwarder.on_collision_entered(BodyId(0), BodyId(1));
        });
        engine.join().unwrap();
        drop(tx);

        assert_eq!(c.run(rx), RunEnd::Disconnected);
        // 30 / 40 of full strength
        assert_eq!(c.player().plays(), vec![("WALL", Some(191)), ("BALL", None)]);
        assert_eq!(c.stats().max_velocity, 40.0);
        assert_eq!(c.stats().exits, 1);
    }

    #[test]
    fn test_run_stops_on_close() {
        let mut c = controller();
        let (tx, rx) = mpsc::channel();
        tx.send(ControllerEvent::Menu(MenuAction::About)).unwrap();
        tx.send(ControllerEvent::Menu(MenuAction::Close)).unwrap();
        tx.send(ControllerEvent::Command(UserCommand::AddBall)).unwrap();

        assert_eq!(c.run(rx), RunEnd::Finished);
        // Event after Close is never handled
        assert_eq!(c.population().len(), 2);
    }

    #[test]
    fn test_silent_player_still_counts() {
        use crate::haptics::{NullPlayer, SDK_VERSION};

        let mut c = Controller::new(
            &Settings::default(),
            PatternBank::default(),
            ScriptedWorld::default(),
            NullPlayer,
            OrientationLock::default(),
        )
        .unwrap();
        c.handle(ControllerEvent::Collision(CollisionEvent::entered(
            BodyId(0),
            BodyId::BOUND_RIGHT,
        )));
        c.handle(ControllerEvent::Collision(CollisionEvent::entered(
            BodyId(0),
            BodyId(1),
        )));
        assert_eq!((c.stats().wall_hits, c.stats().ball_hits), (1, 1));
        assert!(c.about_text().ends_with(SDK_VERSION));
        c.shutdown();
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            initial_max_velocity: -1.0,
            ..Default::default()
        };
        let result = Controller::new(
            &settings,
            PatternBank::default(),
            ScriptedWorld::default(),
            RecordingPlayer::new(),
            OrientationLock::default(),
        );
        assert!(result.is_err());
    }
}
