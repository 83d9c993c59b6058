/// Maximum depth: cell ids at depth 29 still fit on 64 bits.
pub const DEPTH_MAX: u8 = 29;

/// Number of base cells at depth 0
pub const N_BASE_CELLS: u64 = 12;

/// Value marking an empty neighbour slot
pub const SENTINEL: i64 = -1;

/// Latitude (radians) separating the equatorial region from the polar caps, `asin(2/3)`
pub const TRANSITION_LATITUDE: f64 = 0.729_727_656_226_966_3;

pub(crate) const TRANSITION_Z: f64 = 2.0 / 3.0;
pub(crate) const ONE_OVER_TRANSITION_Z: f64 = 1.5;

pub(crate) const SQRT6: f64 = 2.449_489_742_783_178;
pub(crate) const ONE_OVER_SQRT6: f64 = 0.408_248_290_463_863;

pub(crate) const FOUR_OVER_PI: f64 = 4.0 / std::f64::consts::PI;

/// Below this distance to a pole (in projected units) longitude is undefined.
pub(crate) const EPS_POLE: f64 = 1e-13;
