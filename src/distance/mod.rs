//! Great-circle distances between cell centres.

use crate::coord::unit_vector;
use crate::error::HealpixError;
use crate::index::{Layer, SENTINEL};

/// Angle in radians, in `[0, PI]`, between two positions given in radians.
///
/// Uses `atan2(|a x b|, a . b)` on the unit vectors, which keeps full
/// precision both for nearly identical and for nearly antipodal points.
pub fn great_circle(from: (f64, f64), to: (f64, f64)) -> f64 {
    let a = unit_vector(from.0, from.1);
    let b = unit_vector(to.0, to.1);
    let cross = [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ];
    let sin = (cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]).sqrt();
    let cos = a[0] * b[0] + a[1] * b[1] + a[2] * b[2];
    sin.atan2(cos)
}

impl Layer {
    /// Angular distance between the centres of two nested-scheme cells.
    ///
    /// # Example
    /// ```
    /// use healpix_grid::Layer;
    ///
    /// # fn main() -> Result<(), healpix_grid::HealpixError> {
    /// let layer = Layer::new(0)?;
    /// let d = layer.angular_distance(4, 6)?;
    /// assert!((d - std::f64::consts::PI).abs() < 1e-12);
    /// # Ok(())
    /// # }
    /// ```
    pub fn angular_distance(&self, from: u64, to: u64) -> Result<f64, HealpixError> {
        self.check_cell(from)?;
        self.check_cell(to)?;
        Ok(great_circle(self.center_unchecked(from), self.center_unchecked(to)))
    }

    /// Distance from a validated cell centre to a destination slot that may
    /// hold [`SENTINEL`], which yields NaN.
    pub(crate) fn distance_to_slot(&self, from: (f64, f64), to: i64) -> f64 {
        if to == SENTINEL {
            return f64::NAN;
        }
        great_circle(from, self.center_unchecked(to as u64))
    }
}
