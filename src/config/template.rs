use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Commented starter configuration with one missile.
pub fn default_template() -> String {
    let mut out = String::new();
    let mut line = |s: &str| {
        out.push_str(s);
        out.push('\n');
    };

    line("# General Settings");
    line("[general]");
    line("");
    line("#  Number of missile events");
    line("number_missiles=1");
    line("");
    line("#  Epoch (unix seconds) added to every sample time");
    line("start_time_unix=1700000000");
    line("");
    line("#  Total simulated time and fixed step");
    line("simulation_time_secs=60");
    line("step_time_ms=100");
    line("");
    line("#  Output KML path (.kml is appended when missing)");
    line("output_base=tracks");
    line("");
    line("# First missile event");
    line("[missile_1]");
    line("");
    line("# ID Value");
    line("id=1");
    line("");
    line("#  Motion model (only 'straight' is supported)");
    line("motion_type=straight");
    line("");
    line("#  Launch Position");
    line("launch_position_latitude=39.545218");
    line("launch_position_longitude=-104.844892");
    line("launch_position_elevation=1806");
    line("");
    line("#  Launch attitude");
    line("launch_pitch_degrees=45");
    line("launch_yaw_degrees=0");
    line("");
    line("#  Vehicle");
    line("missile_mass_kg=1000");
    line("missile_radius_m=0.25");
    line("missile_thrust_kN=50");
    line("missile_drag_coefficient=0.3");
    line("air_mass_density=1.225");
    line("");
    line("#  Timing");
    line("start_time_offset_sec=5");
    line("burn_time_sec=10");

    out
}

/// Write the starter configuration to `path`, replacing any existing file.
pub fn write_template(path: &Path) -> Result<(), ConfigError> {
    fs::write(path, default_template()).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
