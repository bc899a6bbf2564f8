pub mod state;
pub mod straight;

pub use state::{AccelerationTerms, MotionState};
pub use straight::StraightModel;

use std::fmt;

use crate::error::SimResult;
use crate::geo::GeographicPosition;
use crate::logging::LogContext;
use crate::vehicle::{MotionKind, VehicleConfig};

/// Kinematic model driving one vehicle.
///
/// Implement this to add a new trajectory shape; the driver only ever
/// advances and samples.
pub trait MotionModel: fmt::Display {
    /// Advance internal time by `dt` seconds and integrate if active.
    fn advance(&mut self, dt: f64) -> SimResult<()>;

    /// Current geographic position.
    fn sample(&self) -> GeographicPosition;

    /// Full kinematic state, for inspection.
    fn state(&self) -> &MotionState;

    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Construct the motion model selected by `config.motion`.
pub fn build_model(config: VehicleConfig, log: &LogContext) -> SimResult<Box<dyn MotionModel>> {
    match config.motion {
        MotionKind::Straight => Ok(Box::new(StraightModel::new(config, log.clone())?)),
    }
}
