//! Scripted vessel for driving the sequencer without a simulator.
//!
//! The model advances one step every time the clock is read. The sequencer
//! reads it at least once per control tick and per wait poll.
#![allow(dead_code)]

use std::cell::RefCell;
use std::f64::consts::TAU;

use nalgebra::Vector3;
use rocket_guidance::orbital::bodies::{Body, KERBIN, MUN};
use rocket_guidance::orbital::OrbitingBody;
use rocket_guidance::sequencer::TimingConfig;
use rocket_guidance::vehicle::{OrbitState, SasMode, Snapshot, VehicleState, VesselControl, VesselTelemetry};

pub const SRB_STAGE: i32 = 6;
pub const LANDING_START_ALTITUDE: f64 = 2_000.0;
pub const LANDING_START_FALL_RATE: f64 = 30.0;

/// Zero delays, with a deadline so a broken scenario fails instead of hanging.
pub fn test_timing() -> TimingConfig {
    TimingConfig {
        timeout_secs: Some(10.0),
        progress_interval_secs: 3_600.0,
        ..TimingConfig::immediate()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Throttle(f64),
    PitchHeading(f64, f64),
    Autopilot(bool),
    Sas(SasMode),
    Stage,
    Gear,
    AddNode { epoch: f64, prograde: f64 },
    RemoveNodes,
    WarpTo(f64),
}

#[derive(Debug, Clone)]
pub struct Model {
    pub ut: f64,
    pub dt: f64,
    pub body: Body,
    pub altitude: f64,
    pub vertical_speed: f64,
    pub apoapsis_altitude: f64,
    pub periapsis_altitude: f64,
    pub throttle: f64,
    pub sas: SasMode,
    pub stages_activated: u32,
    pub srb_fuel: f64,
    pub thrust: f64,
    pub isp: f64,
    pub mass: f64,
    pub nodes_added: u32,
    pub active_node: Option<u32>,
    /// Delta-v left on the active node along its burn direction.
    pub node_remaining: f64,
    pub soi_arrival: Option<f64>,
    pub landing: bool,
    /// Ignore throttle, for wait loops that must never finish.
    pub stuck: bool,
    pub commands: Vec<(f64, Command)>,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            ut: 0.0,
            dt: 1.0,
            body: KERBIN,
            altitude: 0.0,
            vertical_speed: 0.0,
            apoapsis_altitude: 0.0,
            periapsis_altitude: -500_000.0,
            throttle: 0.0,
            sas: SasMode::Off,
            stages_activated: 0,
            srb_fuel: 20.0,
            thrust: 60_000.0,
            isp: 345.0,
            mass: 8_000.0,
            nodes_added: 0,
            active_node: None,
            node_remaining: 0.0,
            soi_arrival: None,
            landing: false,
            stuck: false,
            commands: Vec::new(),
        }
    }
}

impl Model {
    fn srbs_burning(&self) -> bool {
        self.stages_activated == 1 && self.srb_fuel > 0.0
    }

    fn step(&mut self) {
        let dt = self.dt;
        self.ut += dt;
        if self.stuck {
            return;
        }

        if let Some(arrival) = self.soi_arrival {
            if self.ut >= arrival {
                self.body = MUN;
                self.apoapsis_altitude = 500_000.0;
                self.periapsis_altitude = 30_000.0;
                self.altitude = 400_000.0;
                self.soi_arrival = None;
            }
        }

        if self.landing {
            let accel = self.thrust * self.throttle / self.mass - MUN.mu / MUN.radius.powi(2);
            self.vertical_speed += accel * dt;
            self.altitude += self.vertical_speed * dt;
            if self.altitude <= 0.0 {
                self.altitude = 0.0;
                self.vertical_speed = 0.0;
            }
            return;
        }

        let powered = self.throttle > 0.0;
        if powered && self.active_node.is_some() {
            self.node_remaining -= self.thrust * self.throttle / self.mass * dt;
        }
        match (self.body.name, self.active_node) {
            ("Kerbin", None) => {
                let srbs = self.srbs_burning();
                if srbs {
                    self.srb_fuel = (self.srb_fuel - dt).max(0.0);
                }
                let boost = if srbs { 1_500.0 } else { 0.0 };
                self.apoapsis_altitude += (2_000.0 * self.throttle + boost) * dt;
                let climb = if powered || srbs { 150.0 } else { 100.0 };
                self.altitude = (self.altitude + climb * dt).min(self.apoapsis_altitude);
            }
            ("Kerbin", Some(1)) if powered => {
                // first node circularizes the parking orbit
                self.periapsis_altitude =
                    (self.periapsis_altitude + 20_000.0 * dt).min(self.apoapsis_altitude);
            }
            ("Kerbin", Some(_)) if powered => {
                self.apoapsis_altitude += 100_000.0 * dt;
                let ut = self.ut;
                self.soi_arrival.get_or_insert(ut + 20_000.0);
            }
            ("Mun", Some(_)) if powered => {
                self.apoapsis_altitude =
                    (self.apoapsis_altitude - 50_000.0 * dt).max(self.periapsis_altitude);
            }
            ("Mun", None) if powered => {
                self.periapsis_altitude -= 2_000.0 * dt;
            }
            _ => {}
        }
    }

    fn radius(&self) -> f64 {
        self.body.radius + self.altitude
    }

    pub fn orbit_state(&self) -> OrbitState {
        let ra = self.body.radius + self.apoapsis_altitude;
        let rp = self.body.radius + self.periapsis_altitude;
        let a = (ra + rp) / 2.0;
        OrbitState {
            body: self.body.name.to_string(),
            mu: self.body.mu,
            body_radius: self.body.radius,
            semi_major_axis: a,
            apoapsis: ra,
            periapsis: rp,
            period: TAU * (a.powi(3) / self.body.mu).sqrt(),
            time_to_apoapsis: 120.0,
            time_to_periapsis: 300.0,
            time_to_soi_change: self.soi_arrival.map(|t| t - self.ut),
        }
    }

    fn record(&mut self, command: Command) {
        let ut = self.ut;
        self.commands.push((ut, command));
    }
}

/// A circular orbit around Kerbin, phased by `angle` at t = 0.
fn circular(r: f64, angle0: f64, ut: f64) -> OrbitingBody {
    let period = TAU * (r.powi(3) / KERBIN.mu).sqrt();
    let angle = angle0 + TAU * ut / period;
    let (s, c) = angle.sin_cos();
    let speed = TAU * r / period;
    OrbitingBody {
        position: Vector3::new(r * c, r * s, 0.0),
        velocity: Vector3::new(-speed * s, speed * c, 0.0),
        period,
    }
}

#[derive(Debug, Default)]
pub struct ScriptedVessel {
    pub model: RefCell<Model>,
}

impl ScriptedVessel {
    pub fn new(model: Model) -> Self {
        Self {
            model: RefCell::new(model),
        }
    }

    /// Already in a circular Kerbin parking orbit at `altitude`.
    pub fn parked(altitude: f64) -> Self {
        Self::new(Model {
            altitude,
            apoapsis_altitude: altitude,
            periapsis_altitude: altitude,
            stages_activated: 2,
            srb_fuel: 0.0,
            sas: SasMode::Prograde,
            // the parking orbit was circularized with the first node
            nodes_added: 1,
            ..Model::default()
        })
    }

    /// Falling towards the Mun with the engine off.
    pub fn landing(altitude: f64, fall_rate: f64) -> Self {
        Self::new(Model {
            dt: 0.05,
            body: MUN,
            altitude,
            vertical_speed: -fall_rate,
            apoapsis_altitude: altitude,
            periapsis_altitude: -MUN.radius,
            landing: true,
            ..Model::default()
        })
    }

    pub fn commands(&self) -> Vec<Command> {
        self.model.borrow().commands.iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn count(&self, wanted: &Command) -> usize {
        self.commands().iter().filter(|c| *c == wanted).count()
    }
}

impl VesselTelemetry for ScriptedVessel {
    fn ut(&self) -> f64 {
        let mut m = self.model.borrow_mut();
        m.step();
        m.ut
    }

    fn orbit(&self) -> OrbitState {
        self.model.borrow().orbit_state()
    }

    fn mean_altitude(&self) -> f64 {
        self.model.borrow().altitude
    }

    fn surface_altitude(&self) -> f64 {
        self.model.borrow().altitude
    }

    fn speed(&self) -> f64 {
        let m = self.model.borrow();
        if m.landing {
            m.vertical_speed.abs()
        } else {
            200.0
        }
    }

    fn terminal_velocity(&self) -> f64 {
        300.0
    }

    fn position(&self) -> Vector3<f64> {
        Vector3::new(self.model.borrow().radius(), 0.0, 0.0)
    }

    fn velocity(&self) -> Vector3<f64> {
        Vector3::new(self.model.borrow().vertical_speed, 0.0, 0.0)
    }

    fn mass(&self) -> f64 {
        self.model.borrow().mass
    }

    fn available_thrust(&self) -> f64 {
        self.model.borrow().thrust
    }

    fn specific_impulse(&self) -> f64 {
        self.model.borrow().isp
    }

    fn throttle(&self) -> f64 {
        self.model.borrow().throttle
    }

    fn remaining_burn(&self) -> f64 {
        let m = self.model.borrow();
        if m.active_node.is_some() {
            m.node_remaining
        } else {
            0.0
        }
    }

    fn resource_amount(&self, stage: i32, resource: &str) -> f64 {
        let m = self.model.borrow();
        if stage == SRB_STAGE && resource == "SolidFuel" && m.stages_activated <= 1 {
            m.srb_fuel
        } else {
            0.0
        }
    }

    fn orbiting_state(&self, body: Option<&str>) -> Option<OrbitingBody> {
        let m = self.model.borrow();
        match body {
            None if m.body == KERBIN => {
                let r = KERBIN.radius + (m.apoapsis_altitude + m.periapsis_altitude) / 2.0;
                Some(circular(r, 0.0, m.ut))
            }
            Some("Mun") => Some(circular(MUN.sma, 1.0, m.ut)),
            _ => None,
        }
    }
}

impl VesselControl for ScriptedVessel {
    fn set_throttle(&mut self, throttle: f64) {
        let m = self.model.get_mut();
        m.throttle = throttle;
        m.record(Command::Throttle(throttle));
        // deorbit burn finished: drop to a short final approach
        let deorbited = m.body == MUN && m.active_node.is_none() && m.periapsis_altitude <= 5_000.0;
        if throttle == 0.0 && deorbited && !m.landing {
            m.landing = true;
            m.dt = 0.05;
            m.altitude = LANDING_START_ALTITUDE;
            m.vertical_speed = -LANDING_START_FALL_RATE;
        }
    }

    fn target_pitch_and_heading(&mut self, pitch: f64, heading: f64) {
        self.model.get_mut().record(Command::PitchHeading(pitch, heading));
    }

    fn engage_autopilot(&mut self) {
        self.model.get_mut().record(Command::Autopilot(true));
    }

    fn disengage_autopilot(&mut self) {
        self.model.get_mut().record(Command::Autopilot(false));
    }

    fn set_sas_mode(&mut self, mode: SasMode) {
        let m = self.model.get_mut();
        m.sas = mode;
        m.record(Command::Sas(mode));
    }

    fn activate_next_stage(&mut self) {
        let m = self.model.get_mut();
        m.stages_activated += 1;
        m.record(Command::Stage);
    }

    fn deploy_gear(&mut self) {
        self.model.get_mut().record(Command::Gear);
    }

    fn add_node(&mut self, epoch: f64, prograde: f64) {
        let m = self.model.get_mut();
        m.nodes_added += 1;
        m.active_node = Some(m.nodes_added);
        m.node_remaining = prograde.abs();
        m.record(Command::AddNode { epoch, prograde });
    }

    fn remove_nodes(&mut self) {
        let m = self.model.get_mut();
        m.active_node = None;
        m.node_remaining = 0.0;
        m.record(Command::RemoveNodes);
    }

    fn warp_to(&mut self, epoch: f64) {
        let m = self.model.get_mut();
        m.record(Command::WarpTo(epoch));
        m.ut = m.ut.max(epoch);
    }
}

/// A snapshot over Kerbin with only altitude and apoapsis filled in.
pub fn ascent_snapshot(ut: f64, altitude: f64, apoapsis_altitude: f64) -> Snapshot {
    let r = KERBIN.radius + altitude;
    Snapshot {
        ut,
        vehicle: VehicleState {
            mean_altitude: altitude,
            surface_altitude: altitude,
            speed: 200.0,
            terminal_velocity: 300.0,
            position: Vector3::new(r, 0.0, 0.0),
            velocity: Vector3::new(150.0, 0.0, 0.0),
            available_thrust: 60_000.0,
            specific_impulse: 345.0,
            mass: 8_000.0,
            stage_fuel: 0.0,
            throttle: 1.0,
        },
        orbit: OrbitState {
            body: KERBIN.name.into(),
            mu: KERBIN.mu,
            body_radius: KERBIN.radius,
            semi_major_axis: KERBIN.radius + apoapsis_altitude / 2.0,
            apoapsis: KERBIN.radius + apoapsis_altitude,
            periapsis: KERBIN.radius,
            period: 0.0,
            time_to_apoapsis: 60.0,
            time_to_periapsis: 0.0,
            time_to_soi_change: None,
        },
    }
}
