use std::f64::consts::PI;

use nalgebra::Vector3;

/// Circular cross-section for a body of the given radius, m².
pub fn reference_area(radius_m: f64) -> f64 {
    PI * radius_m * radius_m
}

/// Drag deceleration magnitude, m/s².
///
/// `0.5 * rho * |v|² * Cd * A / m` with a flat air density.
pub fn drag_magnitude(
    speed: f64,
    air_density: f64,
    drag_coefficient: f64,
    radius_m: f64,
    mass_kg: f64,
) -> f64 {
    0.5 * air_density * speed * speed * drag_coefficient * reference_area(radius_m) / mass_kg
}

/// Drag deceleration directed along the velocity.
///
/// The caller subtracts this from the total acceleration. Returns zero when
/// the body is at rest.
pub fn drag_accel(
    vel: &Vector3<f64>,
    air_density: f64,
    drag_coefficient: f64,
    radius_m: f64,
    mass_kg: f64,
) -> Vector3<f64> {
    let speed = vel.norm();
    if speed > 0.0 {
        vel / speed * drag_magnitude(speed, air_density, drag_coefficient, radius_m, mass_kg)
    } else {
        Vector3::zeros()
    }
}
