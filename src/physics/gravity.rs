use nalgebra::Vector3;

/// Surface gravity used for every vehicle, m/s².
pub const G_E: f64 = 9.807;

/// Constant-magnitude gravity along a local down direction.
pub fn gravity_accel(down: &Vector3<f64>) -> Vector3<f64> {
    down * G_E
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_follows_down_vector() {
        let down = Vector3::new(0.0, 0.0, -1.0);
        let g = gravity_accel(&down);
        assert!((g.z + G_E).abs() < 1e-12);
        assert_eq!(g.x, 0.0);
    }
}
