//! HEALPix projection between the sphere and the Euclidean plane.
//!
//! The projected plane has `x` in `[0, 8[` (one unit per `PI/4` of longitude) and
//! `y` in `[-2, 2]`. The band `|y| <= 1` is the cylindrical equal-area part, the
//! two caps beyond it use the Collignon projection.

use crate::index::constants::{
    EPS_POLE, FOUR_OVER_PI, ONE_OVER_SQRT6, ONE_OVER_TRANSITION_Z, SQRT6, TRANSITION_LATITUDE,
    TRANSITION_Z,
};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

/// Splits a non-negative value into an odd offset in `{1, 3, 5, 7}` and a
/// remainder in `[-1, 1]`, so that `v == offset + pm1` modulo 8.
fn split_offset(v: f64) -> (u8, f64) {
    let odd = (v as u8) | 1;
    (odd & 7, v - odd as f64)
}

/// Projects `(lon, lat)` in radians, `lon` in `[0, 2PI[`, onto the plane.
pub(crate) fn proj(lon: f64, lat: f64) -> (f64, f64) {
    let (offset, pm1) = split_offset(lon * FOUR_OVER_PI);
    let abs_lat = lat.abs();
    let (x, y) = if abs_lat <= TRANSITION_LATITUDE {
        (pm1, abs_lat.sin() * ONE_OVER_TRANSITION_Z)
    } else {
        let t = SQRT6 * (0.5 * abs_lat + FRAC_PI_4).cos();
        (pm1 * t, 2.0 - t)
    };
    (x + offset as f64, y.copysign(lat))
}

/// Inverse of [`proj`]: `x` in `[0, 8[`, `y` in `[-2, 2]`, returns radians.
pub(crate) fn unproj(x: f64, y: f64) -> (f64, f64) {
    let (offset, mut pm1) = split_offset(x);
    let abs_y = y.abs();
    let abs_lat = if abs_y <= 1.0 {
        (abs_y * TRANSITION_Z).asin()
    } else {
        let t = 2.0 - abs_y;
        // at the pole every longitude is the same point
        if t > EPS_POLE {
            pm1 = (pm1 / t).clamp(-1.0, 1.0);
        }
        2.0 * (t * ONE_OVER_SQRT6).acos() - FRAC_PI_2
    };
    ((pm1 + offset as f64) * FRAC_PI_4, abs_lat.copysign(y))
}
