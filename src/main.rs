//! AstroDrift entry point
//!
//! Runs the simulation headless with a scripted pilot, the same loop an
//! embedding renderer would drive, and reports emitted events on the log.

use glam::Vec2;

use astrodrift::sim::{GameState, SessionPhase, TickInput, tick};

fn main() {
    env_logger::init();

    let mut seed: u64 = 0xA57E01D;
    let mut ticks: u64 = 3600;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => seed = parse_value(args.next()),
            "--ticks" => ticks = parse_value(args.next()),
            _ => usage_exit(),
        }
    }

    let dt = 1.0 / 60.0;
    let mut state = GameState::new(seed);

    let start = TickInput {
        start: true,
        ..TickInput::default()
    };
    tick(&mut state, &start, dt);

    let mut input = TickInput::default();
    for frame in 0..ticks {
        script_pilot(&mut input, &state, frame);
        tick(&mut state, &input, dt);
        for event in state.take_events() {
            log::info!("frame {frame}: {event:?}");
        }
        if state.phase == SessionPhase::GameOver {
            log::info!("pilot ran out of lives at frame {frame}");
            break;
        }
    }

    let snap = state.snapshot();
    println!(
        "score {} level {} lives {} after {} ticks",
        snap.score, snap.level, snap.lives, state.time_ticks
    );
}

/// Crude demo pilot: strafe in a square, sweep the aim, fire in bursts
fn script_pilot(input: &mut TickInput, state: &GameState, frame: u64) {
    let leg = frame % 240;
    input.east = leg < 60;
    input.south = (60..120).contains(&leg);
    input.west = (120..180).contains(&leg);
    input.north = leg >= 180;
    input.fire = frame.is_multiple_of(6);
    let sweep = frame as f32 * 0.02;
    input.aim = state.craft.pos + Vec2::new(sweep.cos(), sweep.sin()) * 300.0;
}

fn parse_value(arg: Option<String>) -> u64 {
    match arg.and_then(|v| v.parse().ok()) {
        Some(v) => v,
        None => usage_exit(),
    }
}

fn usage_exit() -> ! {
    eprintln!("usage: astrodrift [--seed N] [--ticks N]");
    std::process::exit(2);
}
