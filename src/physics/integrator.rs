use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// Fixed-step explicit Euler
// ---------------------------------------------------------------------------

/// Advance velocity one step: `v_prev + a * dt`.
pub fn velocity(dt: f64, v_prev: &Vector3<f64>, accel: &Vector3<f64>) -> Vector3<f64> {
    v_prev + accel * dt
}

/// Advance position one step: `p_prev + v * dt`.
///
/// Callers pass the velocity already advanced for this step, which makes
/// the pair semi-implicit (symplectic) Euler.
pub fn position(dt: f64, p_prev: &Vector3<f64>, vel: &Vector3<f64>) -> Vector3<f64> {
    p_prev + vel * dt
}
