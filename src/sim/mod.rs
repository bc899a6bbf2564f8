pub mod runner;
pub mod sample;

pub use runner::{RunSummary, Simulation};
pub use sample::Sample;
