use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use trackgen::config::{self, Scenario};
use trackgen::io::TrackFileWriter;
use trackgen::logging::{self, LogContext};
use trackgen::{SimError, Simulation};

/// Generate synthetic missile tracks.
#[derive(Parser, Debug)]
#[command(name = "trackgen", version, about)]
struct Cli {
    /// Path to configuration file.
    #[arg(short = 'c', long = "config")]
    config_path: PathBuf,

    /// Generate a config file at the -c path and exit.
    #[arg(short = 'g', long = "gen-config")]
    gen_config: bool,

    /// Use verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output KML path, overriding [general] output_base.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the samples as CSV.
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!(target: logging::TARGET, "{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), SimError> {
    if cli.gen_config {
        config::write_template(&cli.config_path)?;
        log::info!(target: logging::TARGET, "wrote config template to {}", cli.config_path.display());
        return Ok(());
    }

    let scenario = Scenario::load(&cli.config_path)?;
    let kml_path = cli.output.clone().unwrap_or_else(|| scenario.settings.kml_path());

    let log = LogContext::new("trackgen");
    let mut sim = Simulation::from_scenario(scenario, log)?;

    print_header(&sim);

    let mut writer = TrackFileWriter::new(&kml_path);
    if let Some(csv) = &cli.csv {
        writer = writer.with_csv(csv);
    }

    let summary = sim.run(&mut writer)?;

    println!("  Results");
    println!("  ──────────────────────────────────────────────────────────────────");
    for missile in sim.missiles() {
        let (id, pos) = missile.info();
        println!("  {:<12} final {}", id, pos);
    }
    println!();
    println!(
        "  Simulation: {} steps, {} samples, {:.3} s simulated",
        summary.iterations, summary.samples, summary.simulated_sec
    );
    println!("  Track file: {}", kml_path.display());
    if let Some(csv) = &cli.csv {
        println!("  CSV file:   {}", csv.display());
    }
    println!("====================================================================");
    println!();

    Ok(())
}

fn print_header(sim: &Simulation) {
    let s = sim.settings();

    println!();
    println!("====================================================================");
    println!("  MISSILE TRACK GENERATOR");
    println!("====================================================================");
    println!();
    println!(
        "  Start epoch:   {:>14.3} s   Duration:   {:>8.2} s",
        s.start_time_unix, s.duration_sec
    );
    println!(
        "  Step:          {:>14.3} s   Iterations: {:>8}",
        s.step_sec,
        s.iterations()
    );
    println!();

    for missile in sim.missiles() {
        println!("{}", missile);
        println!();
    }
}
