//! Toast Run headless runner
//!
//! Plays autopilot runs at a fixed 60 Hz timestep with no window or audio
//! device, then prints the final stats. Useful for soak testing and for
//! checking tuning overrides.
//!
//! Usage: toast-run [--seed N] [--frames N] [--runs N] [--tuning FILE] [--dump]

use std::process::ExitCode;

use toast_run::audio::{self, Silent};
use toast_run::consts::MAX_FRAME_DT;
use toast_run::sim::{SpriteSizes, autopilot};
use toast_run::{GameError, Session, SessionMode, Tuning};

use glam::Vec2;

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Stand-in sprite sizes for headless play
const SPRITES: SpriteSizes = SpriteSizes {
    player: Vec2::new(64.0, 40.0),
    shot: Vec2::new(24.0, 10.0),
    obstacle: Vec2::new(48.0, 48.0),
};

struct Args {
    seed: u64,
    frames: u32,
    runs: u32,
    tuning: Option<String>,
    dump: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        seed: 0x70A57,
        frames: 60 * 60 * 5,
        runs: 1,
        tuning: None,
        dump: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = |name: &str| iter.next().ok_or_else(|| format!("{name} needs a value"));
        match flag.as_str() {
            "--seed" => args.seed = value("--seed")?.parse().map_err(|e| format!("--seed: {e}"))?,
            "--frames" => {
                args.frames = value("--frames")?.parse().map_err(|e| format!("--frames: {e}"))?
            }
            "--runs" => args.runs = value("--runs")?.parse().map_err(|e| format!("--runs: {e}"))?,
            "--tuning" => args.tuning = Some(value("--tuning")?),
            "--dump" => args.dump = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn load_tuning(path: Option<&str>) -> Result<Tuning, GameError> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|e| GameError::AssetLoad {
                asset: path.to_string(),
                reason: e.to_string(),
            })?;
            Tuning::from_json(&json)
        }
        None => Ok(Tuning::default()),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };
    let tuning = match load_tuning(args.tuning.as_deref()) {
        Ok(tuning) => tuning,
        Err(err) => {
            log::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    log::info!("Toast Run (headless) starting, seed={}", args.seed);
    let mut session = Session::new(args.seed, tuning);
    session.set_sprite_sizes(SPRITES);
    log::debug!("Tuning: {:?}", session.tuning());
    let mut sink = Silent;

    let mut now = 0.0;
    for run in 1..=args.runs {
        match session.start(now) {
            Ok(events) => {
                audio::dispatch(&events, &mut sink);
            }
            Err(err) => {
                log::error!("{}", err);
                return ExitCode::FAILURE;
            }
        }

        let mut frames = 0;
        while frames < args.frames && session.mode() == SessionMode::Playing {
            if let Some(input) = session.state().map(autopilot) {
                *session.input_mut() = input;
            }
            now += FRAME_MS;
            let out = session.frame(((FRAME_MS / 1000.0) as f32).min(MAX_FRAME_DT), now);
            audio::dispatch(&out.events, &mut sink);
            frames += 1;
        }

        let hud = session.hud().unwrap_or_default();
        println!(
            "run {run}: frames={frames} score={} lives={} combo={} shield={} ammo={}",
            hud.score, hud.lives, hud.combo, hud.shield, hud.ammo
        );

        if args.dump {
            if let Some(state) = session.state() {
                match serde_json::to_string_pretty(state) {
                    Ok(json) => println!("{json}"),
                    Err(err) => log::warn!("Could not serialize state: {}", err),
                }
            }
        }
    }

    audio::dispatch(&session.exit(), &mut sink);
    ExitCode::SUCCESS
}
