//! RichTap Bounce entry point
//!
//! Replays a scenario (or a generated demo) through the controller. The
//! replay runs on its own thread the way a physics engine would deliver
//! callbacks, and the main thread consumes events.
//!
//! Usage: `richtap-bounce [--settings FILE] [--seed N] [--rounds N] [SCENARIO.json]`

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use richtap_bounce::haptics::LogPlayer;
use richtap_bounce::scenario::Scenario;
use richtap_bounce::sensor::OrientationLock;
use richtap_bounce::sim::ScriptedWorld;
use richtap_bounce::{Controller, RunEnd, Settings};

const DEFAULT_ROUNDS: usize = 40;

#[derive(Debug, Default)]
struct Args {
    settings: Option<PathBuf>,
    scenario: Option<PathBuf>,
    seed: Option<u64>,
    rounds: Option<usize>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--settings" => {
                args.settings = Some(it.next().ok_or("--settings needs a path")?.into());
            }
            "--seed" => {
                let v = it.next().ok_or("--seed needs a value")?;
                args.seed = Some(v.parse().map_err(|_| format!("bad seed: {v}"))?);
            }
            "--rounds" => {
                let v = it.next().ok_or("--rounds needs a value")?;
                args.rounds = Some(v.parse().map_err(|_| format!("bad round count: {v}"))?);
            }
            s if s.starts_with("--") => return Err(format!("unknown option {s}")),
            _ => args.scenario = Some(PathBuf::from(&arg)),
        }
    }
    Ok(args)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("RichTap Bounce (headless) starting...");

    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            log::error!("{e}");
            eprintln!(
                "usage: richtap-bounce [--settings FILE] [--seed N] [--rounds N] [SCENARIO.json]"
            );
            return ExitCode::FAILURE;
        }
    };

    let mut settings = match &args.settings {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    let scenario = match &args.scenario {
        Some(path) => match Scenario::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Scenario::demo(&settings, args.rounds.unwrap_or(DEFAULT_ROUNDS)),
    };
    log::info!("Scenario has {} steps", scenario.steps.len());

    let mut controller = match Controller::from_settings(
        &settings,
        ScriptedWorld::new(settings.impulse_strength),
        LogPlayer::new(),
        OrientationLock::new(settings.rotation),
    ) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let (tx, rx) = mpsc::channel();
    let producer = thread::spawn(move || scenario.replay(&tx));

    let end = controller.run(rx);
    controller.shutdown();

    let sent = producer.join().unwrap_or_else(|_| {
        log::error!("Scenario thread panicked");
        0
    });
    if end == RunEnd::Disconnected {
        log::info!("Scenario ended without closing the app");
    }

    let stats = controller.stats();
    log::info!(
        "{sent} events: {} wall hits, {} ball hits, {} exits, {} dropped, {} gravity updates, ceiling {:.2}",
        stats.wall_hits,
        stats.ball_hits,
        stats.exits,
        stats.dropped,
        stats.gravity_updates,
        stats.max_velocity
    );
    ExitCode::SUCCESS
}
