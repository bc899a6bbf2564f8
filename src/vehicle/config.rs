use std::fmt;
use std::str::FromStr;

use crate::config::IniConfig;
use crate::error::ConfigError;
use crate::geo::GeographicPosition;

// ---------------------------------------------------------------------------
// Motion model selector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    /// Boost along a launch-fixed direction under gravity and drag.
    Straight,
}

impl FromStr for MotionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "straight" => Ok(MotionKind::Straight),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionKind::Straight => write!(f, "straight"),
        }
    }
}

// ---------------------------------------------------------------------------
// Vehicle definition, parsed once from a [missile_N] section
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleConfig {
    pub id: String,
    pub motion: MotionKind,
    pub launch: GeographicPosition,
    pub mass_kg: f64,
    pub radius_m: f64,
    pub thrust_kn: f64,              // divided by mass as-is, no kN -> N scaling
    pub air_mass_density: f64,       // kg/m^3, flat
    pub drag_coefficient: f64,
    pub pitch_rad: f64,
    pub yaw_rad: f64,
    pub start_time_offset_sec: f64,  // launch delay from simulation start
    pub burn_time_sec: f64,
}

impl VehicleConfig {
    pub fn from_section(cfg: &IniConfig, section: &str) -> Result<Self, ConfigError> {
        let id = cfg.get_string(section, "id")?;

        let motion_raw = cfg.get_string(section, "motion_type")?;
        let motion = motion_raw
            .parse()
            .map_err(|value| ConfigError::UnsupportedMotionType {
                section: section.to_string(),
                value,
            })?;

        let launch = GeographicPosition::new(
            cfg.get_float(section, "launch_position_longitude")?,
            cfg.get_float(section, "launch_position_latitude")?,
            cfg.get_float(section, "launch_position_elevation")?,
        );

        let vehicle = VehicleConfig {
            id,
            motion,
            launch,
            mass_kg: cfg.get_float(section, "missile_mass_kg")?,
            radius_m: cfg.get_float(section, "missile_radius_m")?,
            thrust_kn: cfg.get_float(section, "missile_thrust_kN")?,
            air_mass_density: cfg.get_float(section, "air_mass_density")?,
            drag_coefficient: cfg.get_float(section, "missile_drag_coefficient")?,
            pitch_rad: cfg.get_float(section, "launch_pitch_degrees")?.to_radians(),
            yaw_rad: cfg.get_float(section, "launch_yaw_degrees")?.to_radians(),
            start_time_offset_sec: cfg.get_float(section, "start_time_offset_sec")?,
            burn_time_sec: cfg.get_float(section, "burn_time_sec")?,
        };
        vehicle.validate(section)?;
        Ok(vehicle)
    }

    /// Range checks that the typed getters cannot express.
    pub fn validate(&self, section: &str) -> Result<(), ConfigError> {
        let fail = |key: &str, reason: String| -> Result<(), ConfigError> {
            Err(ConfigError::OutOfRange {
                section: section.to_string(),
                key: key.to_string(),
                reason,
            })
        };

        if self.mass_kg <= 0.0 {
            return fail("missile_mass_kg", format!("mass must be positive, got {}", self.mass_kg));
        }
        if self.radius_m < 0.0 {
            return fail(
                "missile_radius_m",
                format!("radius must be non-negative, got {}", self.radius_m),
            );
        }
        if !(-90.0..=90.0).contains(&self.launch.lat_deg) {
            return fail(
                "launch_position_latitude",
                format!("{} is outside [-90, 90]", self.launch.lat_deg),
            );
        }
        if !(-180.0..=180.0).contains(&self.launch.lon_deg) {
            return fail(
                "launch_position_longitude",
                format!("{} is outside [-180, 180]", self.launch.lon_deg),
            );
        }
        Ok(())
    }
}

impl fmt::Display for VehicleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Missile {} ({})", self.id, self.motion)?;
        writeln!(f, "  Launch:        {}", self.launch)?;
        writeln!(
            f,
            "  Mass:      {:>10.2} kg     Radius:     {:>8.3} m",
            self.mass_kg, self.radius_m
        )?;
        writeln!(
            f,
            "  Thrust:    {:>10.2} kN     Cd:         {:>8.3}",
            self.thrust_kn, self.drag_coefficient
        )?;
        writeln!(
            f,
            "  Pitch:     {:>10.2} deg    Yaw:        {:>8.2} deg",
            self.pitch_rad.to_degrees(),
            self.yaw_rad.to_degrees()
        )?;
        writeln!(f, "  Air density: {:>8.4} kg/m^3", self.air_mass_density)?;
        write!(
            f,
            "  Start:     {:>10.2} s      Burn:       {:>8.2} s",
            self.start_time_offset_sec, self.burn_time_sec
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTION: &str = "\
[missile_1]
id = M-7
motion_type = Straight
launch_position_latitude = 39.5
launch_position_longitude = -104.8
launch_position_elevation = 1806
missile_mass_kg = 500
missile_radius_m = 0.2
missile_thrust_kN = 40
missile_drag_coefficient = 0.3
air_mass_density = 1.225
launch_pitch_degrees = 90
launch_yaw_degrees = 180
start_time_offset_sec = 2
burn_time_sec = 8
";

    fn parse(text: &str) -> Result<VehicleConfig, ConfigError> {
        let cfg: IniConfig = text.parse().unwrap();
        VehicleConfig::from_section(&cfg, "missile_1")
    }

    #[test]
    fn parses_every_field() {
        let v = parse(SECTION).unwrap();
        assert_eq!(v.id, "M-7");
        assert_eq!(v.motion, MotionKind::Straight);
        assert_eq!(v.launch, GeographicPosition::new(-104.8, 39.5, 1806.0));
        assert_eq!(v.mass_kg, 500.0);
        assert_eq!(v.thrust_kn, 40.0);
        assert!((v.pitch_rad - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((v.yaw_rad - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(v.burn_time_sec, 8.0);
    }

    #[test]
    fn unknown_motion_type_is_a_config_error() {
        let err = parse(&SECTION.replace("Straight", "ballistic")).unwrap_err();
        match err {
            ConfigError::UnsupportedMotionType { section, value } => {
                assert_eq!(section, "missile_1");
                assert_eq!(value, "ballistic");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_mass_is_rejected() {
        let err = parse(&SECTION.replace("missile_mass_kg = 500", "missile_mass_kg = 0")).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { ref key, .. } if key == "missile_mass_kg"));
    }

    #[test]
    fn negative_radius_is_rejected() {
        let err =
            parse(&SECTION.replace("missile_radius_m = 0.2", "missile_radius_m = -1")).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { ref key, .. } if key == "missile_radius_m"));
    }

    #[test]
    fn latitude_out_of_range_is_rejected() {
        let err = parse(&SECTION.replace("latitude = 39.5", "latitude = 91")).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange { ref key, .. } if key == "launch_position_latitude"
        ));
    }

    #[test]
    fn missing_key_is_reported_with_section() {
        let err = parse(&SECTION.replace("burn_time_sec = 8\n", "")).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingKey { ref section, ref key }
                if section == "missile_1" && key == "burn_time_sec"
        ));
    }
}
