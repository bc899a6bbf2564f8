use crate::config::{Scenario, SimSettings};
use crate::error::{ConfigError, SimResult};
use crate::io::TrackSink;
use crate::logging::LogContext;
use crate::vehicle::Missile;

use super::sample::Sample;

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub iterations: usize,
    pub samples: usize,
    pub simulated_sec: f64, // elapsed time when the loop exited
}

// ---------------------------------------------------------------------------
// Fixed-step simulation driver
// ---------------------------------------------------------------------------

/// Owns the vehicles and the global clock.
pub struct Simulation {
    settings: SimSettings,
    missiles: Vec<Missile>,
    log: LogContext,
}

impl Simulation {
    /// Rejects a non-positive step or duration so the loop is always bounded.
    pub fn new(settings: SimSettings, missiles: Vec<Missile>, log: LogContext) -> SimResult<Self> {
        if !(settings.step_sec > 0.0 && settings.step_sec.is_finite()) {
            return Err(ConfigError::OutOfRange {
                section: "general".into(),
                key: "step_time_ms".into(),
                reason: format!("step must be positive, got {} s", settings.step_sec),
            }
            .into());
        }
        if !(settings.duration_sec > 0.0 && settings.duration_sec.is_finite()) {
            return Err(ConfigError::OutOfRange {
                section: "general".into(),
                key: "simulation_time_secs".into(),
                reason: format!("duration must be positive, got {} s", settings.duration_sec),
            }
            .into());
        }
        Ok(Self { settings, missiles, log })
    }

    /// Build every missile from a parsed scenario, in configuration order.
    pub fn from_scenario(scenario: Scenario, log: LogContext) -> SimResult<Self> {
        let missiles = scenario
            .vehicles
            .into_iter()
            .map(|v| Missile::from_config(v, &log))
            .collect::<SimResult<Vec<_>>>()?;
        Self::new(scenario.settings, missiles, log)
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    pub fn missiles(&self) -> &[Missile] {
        &self.missiles
    }

    /// Run until elapsed time reaches the configured duration.
    ///
    /// Each iteration samples every missile (configuration order), then
    /// advances every missile by one step. The sink is finalized once after
    /// the loop; on error it is left unfinalized and the error is returned.
    pub fn run(&mut self, sink: &mut dyn TrackSink) -> SimResult<RunSummary> {
        let dt = self.settings.step_sec;
        let t_max = self.settings.duration_sec;
        let start = self.settings.start_time_unix;

        self.log.info(format_args!(
            "starting simulation: {} missiles, dt={} s, T={} s",
            self.missiles.len(),
            dt,
            t_max
        ));

        let mut iterations = 0usize;
        let mut samples = 0usize;
        // elapsed = iterations * dt, so no rounding error accumulates
        let mut elapsed = 0.0;

        while elapsed < t_max {
            self.log.debug(format_args!("iteration {} at t={:.3} s", iterations, elapsed));

            for missile in &self.missiles {
                let (id, position) = missile.info();
                sink.record(Sample {
                    id: id.to_string(),
                    time_unix: start + elapsed,
                    position,
                })?;
                samples += 1;
            }

            for missile in &mut self.missiles {
                if let Err(e) = missile.update(dt) {
                    self.log.error(format_args!("{}", e));
                    return Err(e);
                }
            }

            iterations += 1;
            elapsed = iterations as f64 * dt;
        }

        sink.finalize()?;

        self.log.info(format_args!(
            "simulation complete: {} iterations, {} samples",
            iterations, samples
        ));

        Ok(RunSummary { iterations, samples, simulated_sec: elapsed })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
