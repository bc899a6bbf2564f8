use nalgebra::Vector3;

use crate::geo::{ecf_to_geographic, GeographicPosition};

// ---------------------------------------------------------------------------
// Acceleration breakdown for one update
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelerationTerms {
    pub gravity: Vector3<f64>, // m/s², ECF
    pub thrust: Vector3<f64>,
    pub drag: Vector3<f64>,    // along velocity; subtracted from the total
}

impl AccelerationTerms {
    pub fn zero() -> Self {
        Self {
            gravity: Vector3::zeros(),
            thrust: Vector3::zeros(),
            drag: Vector3::zeros(),
        }
    }

    /// gravity + thrust - drag
    pub fn total(&self) -> Vector3<f64> {
        self.gravity + self.thrust - self.drag
    }

    pub fn is_finite(&self) -> bool {
        self.gravity.iter().chain(self.thrust.iter()).chain(self.drag.iter()).all(|c| c.is_finite())
    }
}

// ---------------------------------------------------------------------------
// Kinematic state of one vehicle
// ---------------------------------------------------------------------------

/// Position and velocity in ECF, plus the values from before the last step.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionState {
    pub t_cur: f64,                   // s since simulation start
    pub pos: Vector3<f64>,            // m, ECF
    pub vel: Vector3<f64>,            // m/s, ECF
    pub pos_init: Vector3<f64>,
    pub vel_init: Vector3<f64>,
    pub geog: GeographicPosition,     // kept in sync with `pos`
    pub accel: AccelerationTerms,     // terms used by the most recent step
}

impl MotionState {
    /// At rest at `pos`, whose geographic form is `geog`.
    pub fn at_rest(pos: Vector3<f64>, geog: GeographicPosition) -> Self {
        Self {
            t_cur: 0.0,
            pos,
            vel: Vector3::zeros(),
            pos_init: pos,
            vel_init: Vector3::zeros(),
            geog,
            accel: AccelerationTerms::zero(),
        }
    }

    /// Re-derive the geographic position from the ECF position.
    pub fn sync_geographic(&mut self) {
        self.geog = ecf_to_geographic(&self.pos);
    }

    pub fn is_finite(&self) -> bool {
        self.pos.iter().chain(self.vel.iter()).all(|c| c.is_finite()) && self.geog.is_finite()
    }
}
