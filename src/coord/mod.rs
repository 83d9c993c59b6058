mod projection;

pub(crate) use projection::{proj, unproj};

use crate::error::HealpixError;
use geo_types::Point;

/// Trait for types that can provide a longitude/latitude pair in degrees.
///
/// Implemented for `(f64, f64)` tuples (`(lon, lat)`) and `geo_types::Point<f64>`
/// (`x` is longitude, `y` is latitude). This allows functions to accept either type.
pub trait Coordinate {
    /// Returns the longitude in degrees.
    fn lon(&self) -> f64;
    /// Returns the latitude in degrees.
    fn lat(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn lon(&self) -> f64 {
        self.0
    }
    fn lat(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn lon(&self) -> f64 {
        self.x()
    }
    fn lat(&self) -> f64 {
        self.y()
    }
}

/// Returns an error unless `coord` is a finite longitude with a latitude in `[-90, 90]` degrees.
pub(crate) fn check_lonlat(coord: &impl Coordinate) -> Result<(), HealpixError> {
    let (lon, lat) = (coord.lon(), coord.lat());
    if !lon.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(HealpixError::InvalidCoordinate { lon, lat });
    }
    Ok(())
}

/// Converts a `(lon, lat)` pair in radians to a point in degrees.
pub(crate) fn to_degrees_point((lon, lat): (f64, f64)) -> Point<f64> {
    Point::new(lon.to_degrees(), lat.to_degrees())
}

/// Cartesian unit vector of a position on the unit sphere.
pub(crate) fn unit_vector(lon: f64, lat: f64) -> [f64; 3] {
    let (sin_lon, cos_lon) = lon.sin_cos();
    let (sin_lat, cos_lat) = lat.sin_cos();
    [cos_lat * cos_lon, cos_lat * sin_lon, sin_lat]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_trait_tuple() {
        let tuple = (10.0, -20.0);
        assert_eq!(tuple.lon(), 10.0);
        assert_eq!(tuple.lat(), -20.0);
    }

    #[test]
    fn test_coordinate_trait_point() {
        let point = Point::new(10.0, -20.0);
        assert_eq!(Coordinate::lon(&point), 10.0);
        assert_eq!(Coordinate::lat(&point), -20.0);
    }

    #[test]
    fn test_unit_vector_axes() {
        let v = unit_vector(0.0, 0.0);
        assert!((v[0] - 1.0).abs() < 1e-15);
        let v = unit_vector(0.0, std::f64::consts::FRAC_PI_2);
        assert!((v[2] - 1.0).abs() < 1e-15);
        assert!(v[0].abs() < 1e-15);
    }
}
