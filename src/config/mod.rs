pub mod ini;
pub mod settings;
pub mod template;

pub use self::ini::IniConfig;
pub use settings::{SimSettings, DEFAULT_OUTPUT_BASE, GENERAL};
pub use template::{default_template, write_template};

use std::path::Path;

use crate::error::ConfigError;
use crate::vehicle::VehicleConfig;

// ---------------------------------------------------------------------------
// Scenario: everything the driver needs, parsed once up front
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Scenario {
    pub settings: SimSettings,
    pub vehicles: Vec<VehicleConfig>,
}

impl Scenario {
    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_ini(&IniConfig::load(path)?)
    }

    /// Parse `[general]` and `[missile_1]` .. `[missile_N]` in order.
    pub fn from_ini(cfg: &IniConfig) -> Result<Self, ConfigError> {
        let settings = SimSettings::from_ini(cfg)?;
        let vehicles = (1..=settings.number_missiles)
            .map(|idx| VehicleConfig::from_section(cfg, &format!("missile_{}", idx)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Scenario { settings, vehicles })
    }
}
