//! Headless N-body gravity driver
//!
//! Loads a preset, starts the session and steps it at the configured tick
//! rate, logging conservation diagnostics along the way. Set `RUST_LOG=info`
//! to see the output.
//!
//! Usage: `gravity_sim [preset] [ticks]`
//! Presets: two_body (default), three_body, figure_eight, solar_system, disk

use std::process::ExitCode;
use std::thread;
use std::time::Instant;

use gravity_sim::{Preset, Session, SimConfig, World};
use log::{error, info};

const DEFAULT_TICKS: u64 = 300;

/// Log a summary every this many ticks
const REPORT_EVERY: u64 = 30;

fn report(world: &World) {
    let kinetic = world.kinetic_energy();
    let potential = world.potential_energy();
    info!(
        "t={:.2} steps={} E={:.4} (K={:.4}, U={:.4}) p={} com={}",
        world.elapsed(),
        world.steps(),
        kinetic + potential,
        kinetic,
        potential,
        world.total_momentum(),
        world.center_of_mass(),
    );
}

fn run(preset: Preset, ticks: u64) -> gravity_sim::SimResult<()> {
    let config = SimConfig::interactive();
    let mut session = Session::new(&config)?;

    let bodies = preset.bodies(&mut rand::thread_rng(), config.gravitational_constant)?;
    session.set_bodies(bodies)?;
    session.start()?;
    info!("running preset {} for {} ticks", preset.name(), ticks);
    report(session.world());

    let mut next_tick = Instant::now();
    for tick in 1..=ticks {
        session.tick();
        if tick % REPORT_EVERY == 0 {
            report(session.world());
        }

        next_tick += session.tick_interval();
        if let Some(wait) = next_tick.checked_duration_since(Instant::now()) {
            thread::sleep(wait);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let preset_name = args.next().unwrap_or_else(|| Preset::TwoBody.name().to_string());
    let Some(preset) = Preset::from_name(&preset_name) else {
        error!("unknown preset {preset_name:?}");
        return ExitCode::FAILURE;
    };
    let ticks = match args.next().map(|s| s.parse::<u64>()) {
        None => DEFAULT_TICKS,
        Some(Ok(ticks)) => ticks,
        Some(Err(e)) => {
            error!("invalid tick count: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(preset, ticks) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
