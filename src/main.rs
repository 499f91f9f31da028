use std::env::{args, set_var, var};
use std::process::ExitCode;

use log::{error, info};

use rocket_guidance::config::load_mission;
use rocket_guidance::orbital::bodies::{KERBIN, MUN};
use rocket_guidance::orbital::{burn_duration, hohmann};
use rocket_guidance::vehicle::{presets, MissionConfig};

const LOG_VAR: &str = "GUIDANCE_LOG";

fn main() -> ExitCode {
    if var(LOG_VAR).is_err() {
        set_var(LOG_VAR, "INFO");
    }
    if pretty_env_logger::try_init_custom_env(LOG_VAR).is_err() {
        println!("could not init logger");
    }

    let mission = match args().nth(1) {
        Some(path) => match load_mission(&path) {
            Ok(m) => {
                info!("loaded mission `{path}`");
                m
            }
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            info!("no mission file given, using the Mun landing preset");
            presets::mun_landing()
        }
    };

    match preview(&mission) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn preview(mission: &MissionConfig) -> rocket_guidance::Result<()> {
    // -----------------------------------------------------------------------
    // Preview vehicle: a single liquid stage in the parking orbit
    // -----------------------------------------------------------------------
    let thrust = 60_000.0; // N
    let isp = 345.0; // s
    let mass = 8_000.0; // kg

    let parking = KERBIN.radius + mission.ascent.target_apoapsis;
    let transfer = hohmann(parking, MUN.sma, KERBIN.mu)?;
    let departure = burn_duration(transfer.dv1, thrust, isp, mass)?;

    println!();
    println!("====================================================================");
    println!("  MISSION PREVIEW: {}", mission.name);
    println!("====================================================================");
    println!();
    println!("  Phases");
    println!("  ──────────────────────────────────────────────────────────────────");
    for (i, phase) in mission.phases.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, phase);
    }
    println!();

    println!("  Ascent");
    println!("  ──────────────────────────────────────────────────────────────────");
    let a = &mission.ascent;
    println!(
        "  Turn:          {:>8.0} m  -> {:>8.0} m   heading {:>5.1} deg",
        a.turn_start_altitude, a.turn_end_altitude, a.heading
    );
    println!(
        "  Apoapsis:      {:>8.0} m     exit at {:>5.0}%",
        a.target_apoapsis,
        a.exit_fraction * 100.0
    );
    println!(
        "  Circular v:    {:>8.1} m/s   period {:>8.1} s",
        KERBIN.circular_velocity(parking),
        KERBIN.circular_period(parking)
    );
    println!();

    println!("  Transfer {} -> {}", KERBIN.name, MUN.name);
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Departure dv:  {:>8.1} m/s   Arrival dv:   {:>8.1} m/s",
        transfer.dv1, transfer.dv2
    );
    println!(
        "  Total dv:      {:>8.1} m/s   Flight time:  {:>8.0} s",
        transfer.total_dv, transfer.transfer_time
    );
    println!(
        "  Phase angle:   {:>8.2} deg   Burn:         {:>8.1} s",
        transfer.phase_angle.to_degrees(),
        departure
    );
    println!(
        "  Preview stage: {:>8.0} N     Isp {:>5.0} s   mass {:>7.0} kg",
        thrust, isp, mass
    );
    println!("====================================================================");
    println!();
    Ok(())
}
