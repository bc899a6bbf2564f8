use std::path::PathBuf;

use super::ini::IniConfig;
use crate::error::ConfigError;

pub const GENERAL: &str = "general";
pub const DEFAULT_OUTPUT_BASE: &str = "tracks";

// ---------------------------------------------------------------------------
// Global run settings ([general] section)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SimSettings {
    pub number_missiles: usize,
    pub start_time_unix: f64, // epoch added to every sample's elapsed time
    pub duration_sec: f64,    // total simulated time T
    pub step_sec: f64,        // fixed step Δt
    pub output_base: PathBuf,
}

impl SimSettings {
    pub fn from_ini(cfg: &IniConfig) -> Result<Self, ConfigError> {
        let count = cfg.get_int(GENERAL, "number_missiles")?;
        if count < 0 {
            return Err(out_of_range("number_missiles", format!("{} is negative", count)));
        }

        let duration_sec = cfg.get_float(GENERAL, "simulation_time_secs")?;
        if duration_sec <= 0.0 {
            return Err(out_of_range(
                "simulation_time_secs",
                format!("duration must be positive, got {}", duration_sec),
            ));
        }

        let step_ms = cfg.get_float(GENERAL, "step_time_ms")?;
        if step_ms <= 0.0 {
            return Err(out_of_range(
                "step_time_ms",
                format!("step must be positive, got {}", step_ms),
            ));
        }

        let output_base = cfg
            .get(GENERAL, "output_base")?
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_OUTPUT_BASE);

        Ok(SimSettings {
            number_missiles: count as usize,
            start_time_unix: cfg.get_float(GENERAL, "start_time_unix")?,
            duration_sec,
            step_sec: step_ms / 1000.0,
            output_base: PathBuf::from(output_base),
        })
    }

    /// Number of sampling iterations the driver will run: `ceil(T / Δt)`.
    pub fn iterations(&self) -> usize {
        let mut n = 0usize;
        while (n as f64) * self.step_sec < self.duration_sec {
            n += 1;
        }
        n
    }

    /// KML path derived from `output_base`, adding `.kml` when absent.
    pub fn kml_path(&self) -> PathBuf {
        match self.output_base.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("kml") => self.output_base.clone(),
            _ => {
                let mut name = self.output_base.clone().into_os_string();
                name.push(".kml");
                PathBuf::from(name)
            }
        }
    }
}

fn out_of_range(key: &str, reason: String) -> ConfigError {
    ConfigError::OutOfRange {
        section: GENERAL.to_string(),
        key: key.to_string(),
        reason,
    }
}
