pub mod config;
pub mod error;
pub mod geo;
pub mod io;
pub mod logging;
pub mod motion;
pub mod physics;
pub mod sim;
pub mod vehicle;

pub use error::{ConfigError, SimError, SimResult};
pub use geo::GeographicPosition;
pub use sim::{RunSummary, Sample, Simulation};
