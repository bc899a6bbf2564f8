use std::fmt;

use crate::error::SimResult;
use crate::geo::GeographicPosition;
use crate::logging::LogContext;
use crate::motion::{build_model, MotionModel};

use super::config::VehicleConfig;

// ---------------------------------------------------------------------------
// Missile: identity plus the motion model that flies it
// ---------------------------------------------------------------------------

pub struct Missile {
    id: String,
    model: Box<dyn MotionModel>,
}

impl Missile {
    pub fn new(id: impl Into<String>, model: Box<dyn MotionModel>) -> Self {
        Self { id: id.into(), model }
    }

    /// Build from a parsed vehicle section; the log scope is `<parent>/<id>`.
    pub fn from_config(config: VehicleConfig, log: &LogContext) -> SimResult<Self> {
        let id = config.id.clone();
        let model = build_model(config, &log.child(&id))?;
        Ok(Self::new(id, model))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Identifier and current geographic position.
    pub fn info(&self) -> (&str, GeographicPosition) {
        (&self.id, self.model.sample())
    }

    pub fn update(&mut self, dt: f64) -> SimResult<()> {
        self.model.advance(dt)
    }

    pub fn model(&self) -> &dyn MotionModel {
        self.model.as_ref()
    }
}

impl fmt::Display for Missile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.model)
    }
}

impl fmt::Debug for Missile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Missile")
            .field("id", &self.id)
            .field("model", &self.model.name())
            .field("position", &self.model.sample())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::MotionKind;

    fn config(id: &str) -> VehicleConfig {
        VehicleConfig {
            id: id.into(),
            motion: MotionKind::Straight,
            launch: GeographicPosition::new(10.0, 45.0, 100.0),
            mass_kg: 200.0,
            radius_m: 0.1,
            thrust_kn: 20.0,
            air_mass_density: 1.2,
            drag_coefficient: 0.4,
            pitch_rad: 0.2,
            yaw_rad: 0.4,
            start_time_offset_sec: 0.0,
            burn_time_sec: 1.0,
        }
    }

    #[test]
    fn info_reports_id_and_launch_before_update() {
        let m = Missile::from_config(config("alpha"), &LogContext::default()).unwrap();
        let (id, pos) = m.info();
        assert_eq!(id, "alpha");
        assert_eq!(pos, GeographicPosition::new(10.0, 45.0, 100.0));
        assert_eq!(m.model().name(), "straight");
    }

    #[test]
    fn update_moves_the_missile() {
        let mut m = Missile::from_config(config("beta"), &LogContext::default()).unwrap();
        m.update(0.5).unwrap();
        let (_, pos) = m.info();
        assert!(pos.elev_m < 100.0, "gravity should pull the missile down before boost");
        assert!((m.model().state().t_cur - 0.5).abs() < 1e-12);
    }
}
