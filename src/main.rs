//! Base Defense entry point
//!
//! Headless native runner: builds a session from tuning/stage data, feeds it a
//! short scripted input sequence (start click, one wall drag) and ticks it
//! until the run ends or the frame budget runs out.
//!
//! Usage: `base-defense [sample|debug|gen:<seed>|<stage.json>] [tuning.json]`

use std::process::ExitCode;

use glam::Vec2;

use base_defense::Tuning;
use base_defense::consts::TICKS_PER_SECOND;
use base_defense::sim::{GamePhase, GameState, Stage, TickInput, tick};

/// Give up after ten minutes of game time
const MAX_TICKS: u64 = 10 * 60 * TICKS_PER_SECOND as u64;
/// Status line every five seconds
const STATUS_EVERY: u64 = 5 * TICKS_PER_SECOND as u64;

fn load_stage(arg: Option<&str>) -> Result<Stage, Box<dyn std::error::Error>> {
    let stage = match arg {
        None | Some("sample") => Stage::sample(),
        Some("debug") => Stage::debug(),
        Some(spec) if spec.starts_with("gen:") => {
            let seed: u64 = spec["gen:".len()..].parse()?;
            Stage::generate(seed, 5)
        }
        Some(path) => Stage::from_json(&std::fs::read_to_string(path)?)?,
    };
    Ok(stage)
}

/// Scripted pointer for the first second: start click, then a wall across the enemy path
fn scripted_input(frame: u64) -> TickInput {
    let (down, pos) = match frame {
        0 => (true, Vec2::new(320.0, 400.0)),
        1..=4 => (false, Vec2::new(320.0, 400.0)),
        5 => (true, Vec2::new(140.0, 40.0)),
        6..=15 => {
            let step = (frame - 5) as f32 * 8.0;
            (true, Vec2::new(140.0 - step, 40.0 + step))
        }
        16 => (false, Vec2::new(60.0, 120.0)),
        _ => return TickInput::default(),
    };
    TickInput {
        pointer_down: down,
        pointer: Some(pos),
        secondary: false,
    }
}

fn run() -> Result<GamePhase, Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let stage = load_stage(args.first().map(String::as_str))?;
    let tuning = match args.get(1) {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    stage.validate()?;

    log::info!(
        "Stage: {} waves, {} enemies",
        stage.waves.len(),
        stage.total_spawns()
    );

    let mut state = GameState::new(tuning, stage);
    for frame in 0..MAX_TICKS {
        tick(&mut state, &scripted_input(frame));

        if frame % STATUS_EVERY == 0 {
            let view = state.view();
            log::info!(
                "t={:>5} wave {}/{} | base HP {} | enemies {} | shots {}/{} | walls {} | ${}",
                state.time_ticks,
                view.wave,
                view.wave_count,
                view.base.hp,
                view.enemies.len(),
                view.player_projectiles.len(),
                view.enemy_projectiles.len(),
                view.obstacles.len(),
                view.money,
            );
        }

        if matches!(state.phase, GamePhase::GameOver | GamePhase::GameClear) {
            break;
        }
    }

    log::info!(
        "Finished: {:?} after {} ticks, base HP {}, ${}",
        state.phase,
        state.time_ticks,
        state.base.hp,
        state.money
    );
    Ok(state.phase)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Base Defense (headless) starting...");

    match run() {
        Ok(GamePhase::GameClear) => {
            println!("Stage clear!");
            ExitCode::SUCCESS
        }
        Ok(phase) => {
            println!("Run ended: {:?}", phase);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
