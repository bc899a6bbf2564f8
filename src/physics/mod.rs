pub mod aerodynamics;
pub mod gravity;
pub mod integrator;

pub use aerodynamics::{drag_accel, drag_magnitude, reference_area};
pub use gravity::{gravity_accel, G_E};
pub use integrator::{position, velocity};
