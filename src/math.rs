//! Spherical coordinate conversions.
//!
//! Latitude/longitude to unit vectors and back, and the mapping from
//! equirectangular pixel positions onto the sphere.

use nalgebra::Vector3;
use std::f64::consts::{FRAC_PI_2, PI};

pub fn lat_lon_to_unit(lat: f64, lon: f64) -> Vector3<f64> {
    let (sl, cl) = lat.sin_cos();
    let (sn, cn) = lon.sin_cos();
    Vector3::new(cl * cn, cl * sn, sl)
}

pub fn unit_to_lat_lon(v: &Vector3<f64>) -> (f64, f64) {
    let lat = v.z.clamp(-1.0, 1.0).asin().clamp(-FRAC_PI_2, FRAC_PI_2);
    let lon = v.y.atan2(v.x);
    (lat, lon)
}

/// Latitude and longitude (radians) of the top-left corner of pixel `(x, y)`
/// on a `width`×`height` equirectangular grid.
pub fn pixel_to_lat_lon(x: usize, y: usize, width: usize, height: usize) -> (f64, f64) {
    let u = x as f64 / width as f64;
    let v = y as f64 / height as f64;
    let lon = u * 2.0 * PI - PI;
    let lat = (0.5 - v) * PI;
    (lat, lon)
}

pub fn pixel_to_unit(x: usize, y: usize, width: usize, height: usize) -> Vector3<f64> {
    let (lat, lon) = pixel_to_lat_lon(x, y, width, height);
    lat_lon_to_unit(lat, lon)
}

pub fn row_latitude(y: usize, height: usize) -> f64 {
    (0.5 - y as f64 / height as f64) * PI
}

/// Wraps a longitude in degrees into `[-180, 180)`.
pub fn wrap_longitude_deg(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_unit_vector_round_trip() {
        let (lat, lon) = (0.4, -2.1);
        let v = lat_lon_to_unit(lat, lon);
        assert_abs_diff_eq!(v.norm(), 1.0, epsilon = 1e-12);
        let (lat2, lon2) = unit_to_lat_lon(&v);
        assert_abs_diff_eq!(lat2, lat, epsilon = 1e-12);
        assert_abs_diff_eq!(lon2, lon, epsilon = 1e-12);
    }

    #[test]
    fn test_pixel_corners() {
        let (lat, lon) = pixel_to_lat_lon(0, 0, 100, 50);
        assert_abs_diff_eq!(lat, FRAC_PI_2);
        assert_abs_diff_eq!(lon, -PI);

        let (lat, lon) = pixel_to_lat_lon(50, 25, 100, 50);
        assert_abs_diff_eq!(lat, 0.0);
        assert_abs_diff_eq!(lon, 0.0);
    }

    #[test]
    fn test_wrap_longitude() {
        assert_abs_diff_eq!(wrap_longitude_deg(190.0), -170.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_longitude_deg(-190.0), 170.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_longitude_deg(180.0), -180.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_longitude_deg(45.0), 45.0, epsilon = 1e-12);
    }
}
