use std::fmt;

use nalgebra::Vector3;

use super::state::{AccelerationTerms, MotionState};
use super::MotionModel;
use crate::error::{SimError, SimResult};
use crate::geo::{body_forward, ecf_down_vector, ecf_forward_vector, geographic_to_ecf, GeographicPosition};
use crate::logging::LogContext;
use crate::physics::{self, drag_accel, gravity_accel};
use crate::vehicle::VehicleConfig;

// ---------------------------------------------------------------------------
// Straight (boost) trajectory
// ---------------------------------------------------------------------------

/// Vehicle flying from its launch point along a launch-fixed forward
/// direction, pulled down by gravity and slowed by flat-density drag.
///
/// Forward and down directions are computed once from the launch position;
/// attitude is not tracked after launch.
pub struct StraightModel {
    config: VehicleConfig,
    forward_ecf_t0: Vector3<f64>,  // not normalized, see `ecf_forward_vector`
    down_ecf_t0: Vector3<f64>,     // unit
    state: MotionState,
    log: LogContext,
}

impl StraightModel {
    pub fn new(config: VehicleConfig, log: LogContext) -> SimResult<Self> {
        let launch = config.launch;
        let pos = geographic_to_ecf(&launch);

        let forward_local = body_forward(config.pitch_rad, config.yaw_rad);
        let forward_ecf_t0 = ecf_forward_vector(&launch, &forward_local);
        let down_ecf_t0 = ecf_down_vector(&launch).map_err(|source| SimError::Geometry {
            id: config.id.clone(),
            source,
        })?;

        log.debug(format_args!(
            "launch ECF {:?}, forward {:?}, down {:?}",
            pos.as_slice(),
            forward_ecf_t0.as_slice(),
            down_ecf_t0.as_slice()
        ));

        Ok(Self {
            config,
            forward_ecf_t0,
            down_ecf_t0,
            state: MotionState::at_rest(pos, launch),
            log,
        })
    }

    /// Past the start offset; integration runs from here on.
    pub fn is_launched(&self) -> bool {
        self.state.t_cur >= self.config.start_time_offset_sec
    }

    /// Thrust is applied only once `t_cur` is past `start + burn`.
    // TODO: confirm whether thrust should instead run during [start, start + burn].
    pub fn is_boosting(&self) -> bool {
        self.state.t_cur > self.config.start_time_offset_sec + self.config.burn_time_sec
    }

    /// Acceleration terms for the current time and velocity.
    pub fn acceleration_terms(&self) -> AccelerationTerms {
        let c = &self.config;

        let thrust = if self.is_boosting() {
            self.forward_ecf_t0 * (c.thrust_kn / c.mass_kg)
        } else {
            Vector3::zeros()
        };

        AccelerationTerms {
            gravity: gravity_accel(&self.down_ecf_t0),
            thrust,
            drag: drag_accel(
                &self.state.vel,
                c.air_mass_density,
                c.drag_coefficient,
                c.radius_m,
                c.mass_kg,
            ),
        }
    }

    fn degenerate(&self, detail: impl Into<String>) -> SimError {
        SimError::NumericDegeneracy {
            id: self.config.id.clone(),
            elapsed: self.state.t_cur,
            detail: detail.into(),
        }
    }
}

impl MotionModel for StraightModel {
    fn advance(&mut self, dt: f64) -> SimResult<()> {
        self.state.t_cur += dt;

        if !self.is_launched() {
            return Ok(());
        }

        let terms = self.acceleration_terms();
        if !terms.is_finite() {
            return Err(self.degenerate(format!("non-finite acceleration {:?}", terms)));
        }
        let accel = terms.total();

        self.state.vel_init = self.state.vel;
        self.state.vel = physics::velocity(dt, &self.state.vel_init, &accel);

        self.state.pos_init = self.state.pos;
        self.state.pos = physics::position(dt, &self.state.pos_init, &self.state.vel);

        self.state.accel = terms;
        self.state.sync_geographic();

        if !self.state.is_finite() {
            return Err(self.degenerate("non-finite position or velocity"));
        }

        self.log.trace(format_args!(
            "t={:.3}s boost={} |a|={:.3} |v|={:.3} at {}",
            self.state.t_cur,
            self.is_boosting(),
            accel.norm(),
            self.state.vel.norm(),
            self.state.geog
        ));
        Ok(())
    }

    fn sample(&self) -> GeographicPosition {
        self.state.geog
    }

    fn state(&self) -> &MotionState {
        &self.state
    }

    fn name(&self) -> &str {
        "straight"
    }
}

impl fmt::Display for StraightModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.config)?;
        write!(
            f,
            "  Forward ECF: [{:.3}, {:.3}, {:.3}]   Down ECF: [{:.6}, {:.6}, {:.6}]",
            self.forward_ecf_t0.x,
            self.forward_ecf_t0.y,
            self.forward_ecf_t0.z,
            self.down_ecf_t0.x,
            self.down_ecf_t0.y,
            self.down_ecf_t0.z
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
