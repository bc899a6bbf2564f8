use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use trackgen::config::Scenario;
use trackgen::io::{Track, TrackLog};
use trackgen::logging::{self, LogContext};
use trackgen::Simulation;

/// Plot generated missile tracks.
#[derive(Parser, Debug)]
#[command(name = "trackgen-viz", about)]
struct Args {
    /// Path to configuration file.
    #[arg(short = 'c', long = "config")]
    config_path: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(false);

    let tracks = match simulate(&args.config_path) {
        Ok(log) => log.tracks().to_vec(),
        Err(e) => {
            log::error!(target: logging::TARGET, "{}", e);
            return ExitCode::FAILURE;
        }
    };

    let app = TrackViz { title: args.config_path.display().to_string(), tracks };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    match eframe::run_native("Missile Track Generator", options, Box::new(|_| Ok(Box::new(app)))) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!(target: logging::TARGET, "viewer failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn simulate(path: &Path) -> trackgen::SimResult<TrackLog> {
    let scenario = Scenario::load(path)?;
    let mut sim = Simulation::from_scenario(scenario, LogContext::new("viz"))?;
    let mut log = TrackLog::new();
    sim.run(&mut log)?;
    Ok(log)
}

struct TrackViz {
    title: String,
    tracks: Vec<Track>,
}

impl eframe::App for TrackViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Scenario: {}", self.title));
            let samples: usize = self.tracks.iter().map(|t| t.points.len()).sum();
            let max_elev = self
                .tracks
                .iter()
                .flat_map(|t| t.points.iter())
                .map(|p| p.position.elev_m)
                .fold(f64::NEG_INFINITY, f64::max);
            ui.label(format!(
                "Missiles: {}  |  Samples: {}  |  Max elevation: {:.1} km",
                self.tracks.len(),
                samples,
                if samples > 0 { max_elev / 1000.0 } else { 0.0 },
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;

            ui.horizontal(|ui| {
                // Elevation vs Time
                ui.vertical(|ui| {
                    ui.label("Elevation (km)");
                    Plot::new("elevation")
                        .width(half_w)
                        .height(available.y - 24.0)
                        .x_axis_label("Time since start (s)")
                        .show(ui, |plot_ui| {
                            for track in &self.tracks {
                                let t0 = track.points.first().map_or(0.0, |p| p.time_unix);
                                let points: PlotPoints = track
                                    .points
                                    .iter()
                                    .map(|p| [p.time_unix - t0, p.position.elev_m / 1000.0])
                                    .collect();
                                plot_ui.line(Line::new(track.id.clone(), points));
                            }
                        });
                });

                // Ground track
                ui.vertical(|ui| {
                    ui.label("Ground Track (deg)");
                    Plot::new("ground_track")
                        .width(half_w)
                        .height(available.y - 24.0)
                        .x_axis_label("Longitude (deg)")
                        .data_aspect(1.0)
                        .show(ui, |plot_ui| {
                            for track in &self.tracks {
                                let points: PlotPoints = track
                                    .points
                                    .iter()
                                    .map(|p| [p.position.lon_deg, p.position.lat_deg])
                                    .collect();
                                plot_ui.line(Line::new(track.id.clone(), points));
                            }
                        });
                });
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackgen::SimError;

    #[test]
    fn unreadable_config_fails_before_the_window_opens() {
        let path = std::env::temp_dir().join("trackgen-viz-no-such-dir").join("missing.ini");
        assert!(matches!(simulate(&path), Err(SimError::Config(_))));
    }

    #[test]
    fn template_scenario_produces_tracks() {
        let path = std::env::temp_dir().join(format!("trackgen-viz-{}.ini", std::process::id()));
        trackgen::config::write_template(&path).unwrap();
        let log = simulate(&path);
        std::fs::remove_file(&path).ok();
        let log = log.unwrap();
        assert_eq!(log.tracks().len(), 1);
        assert!(log.is_finalized());
    }
}
