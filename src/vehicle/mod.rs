pub mod config;
pub mod missile;

pub use config::{MotionKind, VehicleConfig};
pub use missile::Missile;
