use std::f64::consts::TAU;
use std::time::Duration;

use log::{debug, info, warn};

use super::phase::MissionPhase;
use super::predicate::StopCondition;
use super::progress::ProgressLog;
use super::wait::{settle, wait_until, CancelToken, WaitGuard};
use crate::error::{GuidanceError, Result};
use crate::gnc::{AscentController, Controller, DescentController, DescentRegime};
use crate::orbital::{circularization_delta_v, hohmann_phase_angle, time_until_phase, ManeuverPlan};
use crate::vehicle::{phase_pair, FuelProbe, MissionConfig, SasMode, Snapshot, Vessel};

// ---------------------------------------------------------------------------
// Burn timing
// ---------------------------------------------------------------------------

/// Seconds of the planned burn left to the low-throttle trim.
const TRIM_MARGIN: f64 = 0.1;
/// Throttle used to finish a burn against the node's remaining delta-v.
const TRIM_THROTTLE: f64 = 0.05;

/// Where a planned burn is centred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BurnTiming {
    Apoapsis,
    Periapsis,
    /// Absolute universal time (s).
    Epoch(f64),
}

// ---------------------------------------------------------------------------
// Sequencer
// ---------------------------------------------------------------------------

/// Flies a mission's phase table against one vessel, one phase at a time.
pub struct MissionSequencer<'a, V: Vessel + ?Sized> {
    vessel: &'a mut V,
    config: MissionConfig,
    cancel: CancelToken,
    phase: MissionPhase,
    maneuver: Option<ManeuverPlan>,
    descent: Option<DescentController>,
    progress: ProgressLog,
}

impl<'a, V: Vessel + ?Sized> MissionSequencer<'a, V> {
    pub fn new(vessel: &'a mut V, config: MissionConfig) -> Self {
        let progress = ProgressLog::new(config.timing.progress_interval());
        let phase = config.phases.first().copied().unwrap_or(MissionPhase::Prelaunch);
        Self {
            vessel,
            config,
            cancel: CancelToken::new(),
            phase,
            maneuver: None,
            descent: None,
            progress,
        }
    }

    /// Share a cancellation token with another thread.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn phase(&self) -> MissionPhase {
        self.phase
    }

    /// The plan waiting to be executed, if any.
    pub fn pending_maneuver(&self) -> Option<&ManeuverPlan> {
        self.maneuver.as_ref()
    }

    /// Run every phase in order. Returns the last phase flown.
    pub fn run(&mut self) -> Result<MissionPhase> {
        info!("mission '{}': {} phases", self.config.name, self.config.phases.len());
        let phases = self.config.phases.clone();
        for phase in phases {
            self.phase = phase;
            info!("=== {phase} ===");
            self.run_phase(phase).map_err(|e| e.in_phase(phase))?;
        }
        info!("mission '{}' complete", self.config.name);
        Ok(self.phase)
    }

    fn run_phase(&mut self, phase: MissionPhase) -> Result<()> {
        match phase {
            MissionPhase::Prelaunch => self.prelaunch(),
            MissionPhase::Ascent => self.ascent(),
            MissionPhase::CoastToApoapsis => self.coast_to_apoapsis(),
            MissionPhase::Circularize1 => {
                let plan = self.plan_circularization(BurnTiming::Apoapsis)?;
                self.execute_burn(plan)
            }
            MissionPhase::WaitTransferWindow => self.wait_transfer_window(),
            MissionPhase::TransferBurn => {
                let plan = match self.maneuver.take() {
                    Some(plan) => plan,
                    None => self.plan_transfer()?,
                };
                self.execute_burn(plan)
            }
            MissionPhase::CoastToSoi => self.coast_to_soi(),
            MissionPhase::Circularize2 => {
                let plan = self.plan_circularization(BurnTiming::Periapsis)?;
                self.execute_burn(plan)
            }
            MissionPhase::Deorbit => self.deorbit(),
            MissionPhase::HighDescent => self.descend(DescentRegime::High),
            MissionPhase::LowDescent => self.descend(DescentRegime::Low),
            MissionPhase::Landed => {
                self.vessel.set_throttle(0.0);
                info!("landed at {:.1} m", self.vessel.surface_altitude());
                Ok(())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Launch and ascent
    // -----------------------------------------------------------------------

    fn prelaunch(&mut self) -> Result<()> {
        let timing = self.config.timing.clone();
        let ascent = &self.config.ascent;
        self.vessel.set_sas_mode(SasMode::Off);
        self.vessel.set_throttle(0.0);

        for n in (1..=timing.countdown).rev() {
            if self.cancel.is_cancelled() {
                return Err(GuidanceError::Cancelled);
            }
            info!("{n}...");
            settle(timing.countdown_step());
        }
        info!("Launch!");

        self.vessel.activate_next_stage();
        self.vessel.engage_autopilot();
        self.vessel.target_pitch_and_heading(90.0, ascent.heading);
        Ok(())
    }

    fn ascent(&mut self) -> Result<()> {
        let mut controller = AscentController::new(self.config.ascent.clone());
        let probe = self.config.ascent.fuel_probe();
        let poll = self.config.timing.poll_interval();
        self.fly(&mut controller, probe.as_ref(), poll)
    }

    fn coast_to_apoapsis(&mut self) -> Result<()> {
        let target = self.config.ascent.target_apoapsis;
        let settle_for = self.config.timing.settle();

        self.vessel.set_throttle(self.config.ascent.coast_throttle);
        self.wait_for(StopCondition::ApoapsisAbove(target))?;

        info!("apoapsis {:.0} m reached, coasting", self.vessel.orbit().apoapsis_altitude());
        self.vessel.set_throttle(0.0);
        settle(settle_for);
        self.vessel.disengage_autopilot();
        settle(settle_for);
        self.vessel.set_sas_mode(SasMode::Prograde);
        settle(settle_for);

        self.wait_for(StopCondition::AltitudeAbove(self.config.atmosphere_exit_altitude))
    }

    // -----------------------------------------------------------------------
    // Planning
    // -----------------------------------------------------------------------

    /// Circularize at an apsis, or at the current radius for `Epoch`.
    pub fn plan_circularization(&self, timing: BurnTiming) -> Result<ManeuverPlan> {
        let orbit = self.vessel.orbit();
        let ut = self.vessel.ut();
        let (epoch, radius) = match timing {
            BurnTiming::Apoapsis => (ut + orbit.time_to_apoapsis, orbit.apoapsis),
            BurnTiming::Periapsis => (ut + orbit.time_to_periapsis, orbit.periapsis),
            BurnTiming::Epoch(epoch) => (epoch, self.vessel.position().norm()),
        };
        let dv = circularization_delta_v(orbit.mu, radius, orbit.semi_major_axis, radius)?;
        if timing == BurnTiming::Apoapsis && dv < 0.0 {
            warn!("circularization at apoapsis needs {dv:.1} m/s, burning retrograde");
        }
        let plan = self.size_burn(epoch, dv)?;
        info!(
            "circularize around {}: dv={:.1} m/s burn={:.1} s at t={:.1}",
            orbit.body, plan.prograde_delta_v, plan.burn_duration, plan.epoch
        );
        Ok(plan)
    }

    /// Plan the departure burn of a Hohmann transfer to the target body.
    pub fn plan_transfer(&self) -> Result<ManeuverPlan> {
        let target = &self.config.target_body;
        let (own, body) = phase_pair(&*self.vessel, target)?;
        let orbit = self.vessel.orbit();

        let r1 = own.position.norm();
        let r2 = (orbit.mu * (body.period / TAU).powi(2)).cbrt();
        let phase_angle = hohmann_phase_angle(r1, r2);
        let wait = time_until_phase(&own, &body, phase_angle, self.config.phase_sign)?;
        let dv = circularization_delta_v(orbit.mu, r1, orbit.semi_major_axis, (r1 + r2) / 2.0)?;

        let ut = self.vessel.ut();
        let mut plan = self.size_burn(ut + wait, dv)?;
        if plan.warp_target(self.config.lead_time) < ut {
            // too close to reorient in time, take the next window
            let synodic = TAU / (body.angular_rate()? - own.angular_rate()?).abs();
            debug!("window at t={:.1} too close, adding synodic period {synodic:.0} s", plan.epoch);
            plan.epoch += synodic;
        }
        info!(
            "transfer to {target}: phase angle {:.2} deg, dv={:.1} m/s burn={:.1} s at t={:.1}",
            phase_angle.to_degrees(),
            plan.prograde_delta_v,
            plan.burn_duration,
            plan.epoch
        );
        Ok(plan)
    }

    /// Plan the departure burn and time-warp to just before it.
    fn wait_transfer_window(&mut self) -> Result<()> {
        let plan = self.plan_transfer()?;
        self.maneuver = Some(plan);
        let window = plan.warp_target(self.config.lead_time);
        if window > self.vessel.ut() {
            info!("warping to transfer window at t={window:.1}");
            self.vessel.warp_to(window);
        }
        self.wait_for(StopCondition::UtReached(window))
    }

    fn size_burn(&self, epoch: f64, delta_v: f64) -> Result<ManeuverPlan> {
        ManeuverPlan::new(
            epoch,
            delta_v,
            self.vessel.available_thrust(),
            self.vessel.specific_impulse(),
            self.vessel.mass(),
        )
    }

    // -----------------------------------------------------------------------
    // Burn execution
    // -----------------------------------------------------------------------

    /// Warp close to the burn, hold until ignition, burn at full throttle for
    /// the planned duration and trim at low throttle until the node is spent.
    /// The node and the plan are discarded whether or not the burn succeeds.
    pub fn execute_burn(&mut self, plan: ManeuverPlan) -> Result<()> {
        self.maneuver = Some(plan);
        self.vessel.add_node(plan.epoch, plan.prograde_delta_v);

        let burn = self.burn(&plan);
        self.vessel.set_throttle(0.0);
        self.vessel.remove_nodes();
        self.maneuver = None;
        burn?;

        info!("burn complete");
        Ok(())
    }

    fn burn(&mut self, plan: &ManeuverPlan) -> Result<()> {
        let sas = if plan.is_retrograde() {
            SasMode::Retrograde
        } else {
            SasMode::Prograde
        };
        let settle_for = self.config.timing.settle();
        self.vessel.set_sas_mode(sas);
        settle(settle_for);

        let warp = plan.warp_target(self.config.lead_time);
        if warp > self.vessel.ut() {
            info!("warping to t={warp:.1}");
            self.vessel.warp_to(warp);
            // warp drops attitude hold
            self.vessel.set_sas_mode(sas);
            settle(settle_for);
        }

        self.wait_for(StopCondition::UtReached(plan.ignition()))?;
        let start = self.vessel.ut();
        info!("ignition at t={start:.1} for {:.1} s", plan.burn_duration);
        self.vessel.set_throttle(1.0);
        let full = (plan.burn_duration - TRIM_MARGIN).max(0.0);
        self.wait_for(StopCondition::UtReached(start + full))?;

        debug!("fine tuning at throttle {TRIM_THROTTLE}");
        self.vessel.set_throttle(TRIM_THROTTLE);
        self.wait_for(StopCondition::NodeBurnComplete)
    }

    // -----------------------------------------------------------------------
    // Transfer coast and landing
    // -----------------------------------------------------------------------

    fn coast_to_soi(&mut self) -> Result<()> {
        let target = self.config.target_body.clone();
        let orbit = self.vessel.orbit();
        if orbit.body == target {
            debug!("already inside {target} SOI");
            return Ok(());
        }
        let dt = orbit
            .time_to_soi_change
            .filter(|t| t.is_finite() && *t >= 0.0)
            .ok_or_else(|| GuidanceError::NoEncounter { body: target.clone() })?;

        let arrival = self.vessel.ut() + dt;
        info!("warping to {target} SOI at t={arrival:.1}");
        self.vessel.warp_to(arrival);
        self.wait_for(StopCondition::InSoiOf(target))
    }

    fn deorbit(&mut self) -> Result<()> {
        let periapsis = self.config.descent.deorbit_periapsis;
        self.vessel.set_sas_mode(SasMode::Retrograde);
        settle(self.config.timing.settle());

        self.vessel.set_throttle(1.0);
        let burn = self.wait_for(StopCondition::PeriapsisBelow(periapsis));
        self.vessel.set_throttle(0.0);
        burn?;
        info!("periapsis lowered to {:.0} m", self.vessel.orbit().periapsis_altitude());
        Ok(())
    }

    /// Fly the throttle-only landing loop while the vessel is in `regime`.
    fn descend(&mut self, regime: DescentRegime) -> Result<()> {
        let config = self.config.descent.clone();
        let mut controller = self
            .descent
            .take()
            .unwrap_or_else(|| DescentController::new(config.clone()));
        let poll = self.config.timing.descent_poll_interval();

        let flown = match regime {
            DescentRegime::High => self.fly_until(&mut controller, None, poll, |_, s| {
                config.regime(s.vehicle.surface_altitude) != DescentRegime::High
            }),
            _ => self.fly(&mut controller, None, poll),
        };
        self.descent = Some(controller);
        flown
    }

    // -----------------------------------------------------------------------
    // Loops
    // -----------------------------------------------------------------------

    /// Closed-loop control until the controller reports it is done.
    pub fn fly<C: Controller>(
        &mut self,
        controller: &mut C,
        probe: Option<&FuelProbe>,
        poll: Duration,
    ) -> Result<()> {
        self.fly_until(controller, probe, poll, |c, s| c.finished(s))
    }

    /// One snapshot per tick: stop if `done`, otherwise apply one directive.
    fn fly_until<C, F>(
        &mut self,
        controller: &mut C,
        probe: Option<&FuelProbe>,
        poll: Duration,
        done: F,
    ) -> Result<()>
    where
        C: Controller,
        F: Fn(&C, &Snapshot) -> bool,
    {
        debug!("{} engaged", controller.name());
        let guard = WaitGuard::new(self.phase, self.config.timing.timeout(), &self.cancel);
        loop {
            guard.check()?;
            let snapshot = Snapshot::capture(&*self.vessel, probe);
            if done(&*controller, &snapshot) {
                debug!("{} done at t={:.1}", controller.name(), snapshot.ut);
                return Ok(());
            }
            let directive = controller.control(&snapshot)?;
            directive.apply(&mut *self.vessel);

            if self.progress.due() {
                self.report(&snapshot, directive.throttle.unwrap_or(snapshot.vehicle.throttle));
            }
            if !poll.is_zero() {
                std::thread::sleep(poll);
            }
        }
    }

    fn report(&self, snapshot: &Snapshot, throttle: f64) {
        let v = &snapshot.vehicle;
        if self.phase == MissionPhase::Ascent {
            let fraction = self.config.ascent.apoapsis_fraction(snapshot.orbit.apoapsis_altitude());
            info!("Ap at {fraction:.3} of target");
            info!(
                "  vel {:.1} termvel {:.1} throttle {throttle:.2}",
                v.speed, v.terminal_velocity
            );
        } else {
            info!(
                "[{}] alt={:.1} m speed={:.1} m/s throttle={throttle:.2}",
                self.phase, v.surface_altitude, v.speed
            );
        }
    }

    /// Poll telemetry until `condition` holds.
    fn wait_for(&mut self, condition: StopCondition) -> Result<()> {
        debug!("waiting for {condition}");
        let vessel = &*self.vessel;
        let progress = &mut self.progress;
        let phase = self.phase;
        wait_until(
            phase,
            self.config.timing.poll_interval(),
            self.config.timing.timeout(),
            &self.cancel,
            || {
                let now = vessel.ut();
                if condition.check(vessel) {
                    return true;
                }
                if progress.due() {
                    info!("[{phase}] t={now:.1} waiting for {condition}");
                }
                false
            },
        )
    }
}
