use std::fmt;
use std::ops::Add;

use nalgebra::Vector3;
use thiserror::Error;

// ---------------------------------------------------------------------------
// WGS84 ellipsoid
// ---------------------------------------------------------------------------

pub const WGS84_A: f64 = 6_378_137.0; // semi-major axis, m
pub const WGS84_F: f64 = 1.0 / 298.257_223_563; // flattening
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F); // semi-minor axis, m
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F); // first eccentricity squared

/// Fixed-point iterations for the ECF -> geodetic latitude solve.
/// Bowring's start converges to sub-millimeter for terrestrial altitudes
/// after the first pass; the rest cover high-altitude points.
const LATITUDE_ITERATIONS: usize = 4;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("down vector at {0} has zero or non-finite length")]
    DegenerateDownVector(GeographicPosition),
}

// ---------------------------------------------------------------------------
// Geographic position
// ---------------------------------------------------------------------------

/// Longitude / latitude in degrees, elevation in meters above the ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeographicPosition {
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub elev_m: f64,
}

impl GeographicPosition {
    pub fn new(lon_deg: f64, lat_deg: f64, elev_m: f64) -> Self {
        Self { lon_deg, lat_deg, elev_m }
    }

    pub fn is_finite(&self) -> bool {
        self.lon_deg.is_finite() && self.lat_deg.is_finite() && self.elev_m.is_finite()
    }
}

/// Offsets are applied component-wise as (lon, lat, elev).
impl Add<Vector3<f64>> for GeographicPosition {
    type Output = GeographicPosition;

    fn add(self, offset: Vector3<f64>) -> GeographicPosition {
        GeographicPosition {
            lon_deg: self.lon_deg + offset.x,
            lat_deg: self.lat_deg + offset.y,
            elev_m: self.elev_m + offset.z,
        }
    }
}

impl fmt::Display for GeographicPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(lon {:.6}°, lat {:.6}°, elev {:.2} m)",
            self.lon_deg, self.lat_deg, self.elev_m
        )
    }
}

// ---------------------------------------------------------------------------
// Frame conversions
// ---------------------------------------------------------------------------

/// Geographic (WGS84) -> earth-centered-fixed Cartesian, meters.
pub fn geographic_to_ecf(geog: &GeographicPosition) -> Vector3<f64> {
    let lat = geog.lat_deg.to_radians();
    let lon = geog.lon_deg.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    // Prime vertical radius of curvature
    let n = WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    let h = geog.elev_m;

    Vector3::new(
        (n + h) * cos_lat * cos_lon,
        (n + h) * cos_lat * sin_lon,
        (n * (1.0 - WGS84_E2) + h) * sin_lat,
    )
}

/// Earth-centered-fixed Cartesian -> geographic (WGS84).
///
/// Latitude starts from Bowring's parametric estimate and is refined by
/// fixed-point iteration on the reduced latitude. Height uses the form
/// `p cos(lat) + z sin(lat) - a sqrt(1 - e² sin²(lat))`, which stays
/// well-conditioned near the poles.
pub fn ecf_to_geographic(ecf: &Vector3<f64>) -> GeographicPosition {
    let (x, y, z) = (ecf.x, ecf.y, ecf.z);
    let lon = y.atan2(x);
    let p = x.hypot(y);

    let ep2 = WGS84_E2 / (1.0 - WGS84_E2);

    let mut beta = (WGS84_A * z).atan2(WGS84_B * p);
    let mut lat = 0.0;
    for _ in 0..LATITUDE_ITERATIONS {
        let (sin_b, cos_b) = beta.sin_cos();
        lat = (z + ep2 * WGS84_B * sin_b.powi(3)).atan2(p - WGS84_E2 * WGS84_A * cos_b.powi(3));
        beta = ((1.0 - WGS84_F) * lat.sin()).atan2(lat.cos());
    }

    let (sin_lat, cos_lat) = lat.sin_cos();
    let h = p * cos_lat + z * sin_lat - WGS84_A * (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();

    GeographicPosition {
        lon_deg: lon.to_degrees(),
        lat_deg: lat.to_degrees(),
        elev_m: h,
    }
}

// ---------------------------------------------------------------------------
// Local directions in ECF
// ---------------------------------------------------------------------------

/// ECF displacement for a small geographic offset applied at `point`.
///
/// The offset is added to (lon, lat, elev) and both ends are converted to
/// ECF. The result is a linearized direction, not a physical-distance vector,
/// and is not normalized.
pub fn ecf_forward_vector(point: &GeographicPosition, offset: &Vector3<f64>) -> Vector3<f64> {
    let start = geographic_to_ecf(point);
    let end = geographic_to_ecf(&(*point + *offset));
    end - start
}

/// Unit vector pointing toward decreasing elevation at `point`.
pub fn ecf_down_vector(point: &GeographicPosition) -> Result<Vector3<f64>, GeoError> {
    let below = GeographicPosition { elev_m: point.elev_m - 1.0, ..*point };
    let delta = geographic_to_ecf(&below) - geographic_to_ecf(point);

    if !delta.iter().all(|c| c.is_finite()) {
        return Err(GeoError::DegenerateDownVector(*point));
    }
    delta
        .try_normalize(f64::EPSILON)
        .ok_or(GeoError::DegenerateDownVector(*point))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip(geog: GeographicPosition) {
        let back = ecf_to_geographic(&geographic_to_ecf(&geog));
        assert!(
            (back.lon_deg - geog.lon_deg).abs() < 1e-3,
            "lon {} -> {}",
            geog.lon_deg,
            back.lon_deg
        );
        assert!(
            (back.lat_deg - geog.lat_deg).abs() < 1e-3,
            "lat {} -> {}",
            geog.lat_deg,
            back.lat_deg
        );
        assert!(
            (back.elev_m - geog.elev_m).abs() < 1.0,
            "elev {} -> {}",
            geog.elev_m,
            back.elev_m
        );
    }

    #[test]
    fn colorado_springs_round_trip() {
        assert_round_trip(GeographicPosition::new(-104.0, 39.0, 1800.0));
    }

    #[test]
    fn round_trip_over_the_globe() {
        let lons = [-179.5, -120.0, -45.0, 0.0, 30.0, 90.0, 179.5];
        let lats = [-89.0, -60.0, -15.0, 0.0, 20.0, 45.0, 89.0];
        let elevs = [-400.0, 0.0, 1806.0, 35_000.0, 400_000.0];
        for &lon in &lons {
            for &lat in &lats {
                for &elev in &elevs {
                    assert_round_trip(GeographicPosition::new(lon, lat, elev));
                }
            }
        }
    }

    #[test]
    fn equator_prime_meridian_is_on_x_axis() {
        let ecf = geographic_to_ecf(&GeographicPosition::new(0.0, 0.0, 0.0));
        assert!((ecf.x - WGS84_A).abs() < 1e-6);
        assert!(ecf.y.abs() < 1e-6);
        assert!(ecf.z.abs() < 1e-6);
    }

    #[test]
    fn north_pole_sits_on_semi_minor_axis() {
        let ecf = geographic_to_ecf(&GeographicPosition::new(0.0, 90.0, 0.0));
        assert!((ecf.z - WGS84_B).abs() < 1e-6, "z = {}", ecf.z);
        assert!(ecf.x.abs() < 1e-6);
    }

    #[test]
    fn down_vector_is_unit_and_points_inward() {
        let p = GeographicPosition::new(-104.844892, 39.545218, 1806.0);
        let down = ecf_down_vector(&p).unwrap();
        assert!((down.norm() - 1.0).abs() < 1e-9);
        let radial = geographic_to_ecf(&p).normalize();
        assert!(down.dot(&radial) < -0.99, "down should oppose the radial direction");
    }

    #[test]
    fn down_vector_rejects_non_finite_input() {
        let p = GeographicPosition::new(f64::NAN, 0.0, 0.0);
        assert!(matches!(ecf_down_vector(&p), Err(GeoError::DegenerateDownVector(_))));
    }

    #[test]
    fn forward_vector_for_longitude_step_points_east() {
        let p = GeographicPosition::new(0.0, 0.0, 0.0);
        let fwd = ecf_forward_vector(&p, &Vector3::new(1.0, 0.0, 0.0));
        // One degree of longitude on the equator, mostly along +Y
        assert!(fwd.y > 111_000.0 && fwd.y < 111_400.0, "fwd.y = {}", fwd.y);
        assert!(fwd.z.abs() < 1e-6);
    }

    #[test]
    fn zero_offset_gives_zero_forward_vector() {
        let p = GeographicPosition::new(12.5, -33.0, 250.0);
        let fwd = ecf_forward_vector(&p, &Vector3::zeros());
        assert_eq!(fwd, Vector3::zeros());
    }
}
