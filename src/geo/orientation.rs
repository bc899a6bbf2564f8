use nalgebra::{UnitQuaternion, Vector3};

/// Body attitude from launch angles.
///
/// Intrinsic sequence: pitch about Y, roll about X (always zero), then yaw
/// about Z. The three rotations are composed into one quaternion.
pub fn body_attitude(pitch_rad: f64, yaw_rad: f64) -> UnitQuaternion<f64> {
    let pitch = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), pitch_rad);
    let roll = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.0);
    let yaw = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), yaw_rad);
    pitch * roll * yaw
}

/// Body-forward unit vector in the local geographic (lon, lat, elev) frame.
pub fn body_forward(pitch_rad: f64, yaw_rad: f64) -> Vector3<f64> {
    body_attitude(pitch_rad, yaw_rad) * Vector3::x()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn zero_angles_keep_reference_axis() {
        let f = body_forward(0.0, 0.0);
        assert!((f - Vector3::x()).norm() < 1e-12);
    }

    #[test]
    fn yaw_quarter_turn_points_along_latitude() {
        let f = body_forward(0.0, FRAC_PI_2);
        assert!((f - Vector3::y()).norm() < 1e-12, "got {:?}", f);
    }

    #[test]
    fn positive_pitch_rotates_toward_negative_elevation_axis() {
        // Right-handed rotation about +Y takes +X to -Z
        let f = body_forward(FRAC_PI_2, 0.0);
        assert!(f.x.abs() < 1e-12);
        assert!(f.y.abs() < 1e-12);
        assert!((f.z + 1.0).abs() < 1e-12, "z = {}", f.z);

        let shallow = body_forward(0.3, 0.0);
        assert!(shallow.z < 0.0);
        assert!((shallow.z + 0.3f64.sin()).abs() < 1e-12);
    }

    #[test]
    fn composition_order_is_pitch_then_yaw() {
        let (pitch, yaw) = (0.3, 1.1);
        let expected = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), pitch)
            * (UnitQuaternion::from_axis_angle(&Vector3::z_axis(), yaw) * Vector3::x());
        let swapped = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), yaw)
            * (UnitQuaternion::from_axis_angle(&Vector3::y_axis(), pitch) * Vector3::x());
        let f = body_forward(pitch, yaw);
        assert!((f - expected).norm() < 1e-12);
        assert!((f - swapped).norm() > 1e-3, "order must matter for these angles");
    }

    #[test]
    fn forward_is_always_unit_length() {
        for i in -6..=6 {
            for j in -6..=6 {
                let f = body_forward(i as f64 * 0.5, j as f64 * 0.5);
                assert!((f.norm() - 1.0).abs() < 1e-12);
            }
        }
    }
}
