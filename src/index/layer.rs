use crate::coord::{proj, unproj};
use crate::error::HealpixError;
use crate::index::constants::{DEPTH_MAX, N_BASE_CELLS};
use crate::index::zorder::{ij_to_z, z_to_ij};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Returns an error unless `depth` is in `[0, 29]`.
pub fn check_depth(depth: u8) -> Result<(), HealpixError> {
    if depth > DEPTH_MAX {
        return Err(HealpixError::InvalidDepth(depth));
    }
    Ok(())
}

/// Number of cells along a base cell edge, `2^depth`.
pub fn nside(depth: u8) -> Result<u32, HealpixError> {
    check_depth(depth)?;
    Ok(1u32 << depth)
}

/// Number of cells covering the sphere, `12 * 4^depth`.
pub fn num_cells(depth: u8) -> Result<u64, HealpixError> {
    check_depth(depth)?;
    Ok(N_BASE_CELLS << (2 * depth as u32))
}

/// A cell decomposed into its base cell and its position inside it.
///
/// `i` grows towards the north-east and `j` towards the north-west, so
/// `(0, 0)` is the southernmost cell of the base cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellParts {
    pub base_cell: u8,
    pub i: u32,
    pub j: u32,
}

/// Nested-scheme arithmetic for a single depth.
///
/// # Example
/// ```
/// use healpix_grid::Layer;
///
/// # fn main() -> Result<(), healpix_grid::HealpixError> {
/// let layer = Layer::new(1)?;
/// assert_eq!(layer.n_cells(), 48);
/// assert_eq!(layer.to_ring(0)?, 13);
/// assert_eq!(layer.from_ring(13)?, 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    pub(crate) depth: u8,
    pub(crate) nside: u32,
    pub(crate) n_hash: u64,
    pub(crate) twice_depth: u32,
    pub(crate) z_mask: u64,
    pub(crate) first_eqr: u64,
}

impl Layer {
    pub fn new(depth: u8) -> Result<Self, HealpixError> {
        check_depth(depth)?;
        let nside = 1u32 << depth;
        let twice_depth = 2 * depth as u32;
        let n = nside as u64;
        Ok(Self {
            depth,
            nside,
            n_hash: N_BASE_CELLS << twice_depth,
            twice_depth,
            z_mask: (1u64 << twice_depth) - 1,
            first_eqr: 2 * n * (n + 1),
        })
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn nside(&self) -> u32 {
        self.nside
    }

    pub fn n_cells(&self) -> u64 {
        self.n_hash
    }

    pub fn check_cell(&self, cell: u64) -> Result<(), HealpixError> {
        if cell >= self.n_hash {
            return Err(HealpixError::OutOfRange {
                cell: cell.min(i64::MAX as u64) as i64,
                depth: self.depth,
            });
        }
        Ok(())
    }

    /// Same as [`Layer::check_cell`] for signed ids; negative ids are out of range.
    pub fn check_signed(&self, cell: i64) -> Result<u64, HealpixError> {
        if cell < 0 || cell as u64 >= self.n_hash {
            return Err(HealpixError::OutOfRange {
                cell,
                depth: self.depth,
            });
        }
        Ok(cell as u64)
    }

    pub fn decode(&self, cell: u64) -> CellParts {
        let (i, j) = z_to_ij(cell & self.z_mask);
        CellParts {
            base_cell: (cell >> self.twice_depth) as u8,
            i,
            j,
        }
    }

    pub fn encode(&self, parts: CellParts) -> u64 {
        ((parts.base_cell as u64) << self.twice_depth) | ij_to_z(parts.i, parts.j)
    }

    pub fn base_cell(&self, cell: u64) -> u8 {
        (cell >> self.twice_depth) as u8
    }

    /// Centre of the cell, `(lon, lat)` in radians with `lon` in `[0, 2PI[`.
    pub fn center(&self, cell: u64) -> Result<(f64, f64), HealpixError> {
        self.check_cell(cell)?;
        Ok(self.center_unchecked(cell))
    }

    /// Corners of the cell in the order south, east, north, west, in radians.
    pub fn vertices(&self, cell: u64) -> Result<[(f64, f64); 4], HealpixError> {
        self.check_cell(cell)?;
        Ok(self.vertices_unchecked(cell))
    }

    pub(crate) fn center_unchecked(&self, cell: u64) -> (f64, f64) {
        let CellParts { base_cell, i, j } = self.decode(cell);
        let (i, j) = (i as f64, j as f64);
        self.plane_to_sphere(base_cell, i - j, i + j + 1.0)
    }

    pub(crate) fn vertices_unchecked(&self, cell: u64) -> [(f64, f64); 4] {
        let CellParts { base_cell, i, j } = self.decode(cell);
        let (l, h) = (i as f64 - j as f64, i as f64 + j as f64);
        [
            self.plane_to_sphere(base_cell, l, h),
            self.plane_to_sphere(base_cell, l + 1.0, h + 1.0),
            self.plane_to_sphere(base_cell, l, h + 2.0),
            self.plane_to_sphere(base_cell, l - 1.0, h + 1.0),
        ]
    }

    /// Cell containing `(lon, lat)` in radians.
    pub fn hash(&self, lon: f64, lat: f64) -> Result<u64, HealpixError> {
        if !lon.is_finite() || !(-FRAC_PI_2..=FRAC_PI_2).contains(&lat) {
            return Err(HealpixError::InvalidCoordinate { lon, lat });
        }
        Ok(self.hash_unchecked(lon, lat))
    }

    pub(crate) fn hash_unchecked(&self, lon: f64, lat: f64) -> u64 {
        let (mut x, y) = proj(lon.rem_euclid(TAU), lat);
        if x >= 8.0 {
            x -= 8.0;
        }
        let base_cell = base_cell_from_plane(x, y);
        let (cx, cy) = base_cell_centre(base_cell);
        let mut dx = x - cx;
        if dx > 4.0 {
            dx -= 8.0;
        } else if dx < -4.0 {
            dx += 8.0;
        }
        let dy = y - cy + 1.0;
        let n = self.nside as f64;
        let max = (self.nside - 1) as f64;
        let i = (0.5 * n * (dy + dx)).floor().clamp(0.0, max);
        let j = (0.5 * n * (dy - dx)).floor().clamp(0.0, max);
        self.encode(CellParts {
            base_cell,
            i: i as u32,
            j: j as u32,
        })
    }

    /// Maps a point of a base cell, given in units of `1 / nside` along the
    /// rotated axes `l = i - j` and `h = i + j` from its south corner, to the sphere.
    fn plane_to_sphere(&self, base_cell: u8, l: f64, h: f64) -> (f64, f64) {
        let n = self.nside as f64;
        let (cx, cy) = base_cell_centre(base_cell);
        let mut x = cx + l / n;
        let y = cy + h / n - 1.0;
        if x < 0.0 {
            x += 8.0;
        } else if x >= 8.0 {
            x -= 8.0;
        }
        unproj(x, y)
    }
}

/// Centre of a base cell in the projection plane.
fn base_cell_centre(base_cell: u8) -> (f64, f64) {
    let column = (base_cell & 3) as f64;
    let row = base_cell >> 2;
    let x = 2.0 * column + if row == 1 { 0.0 } else { 1.0 };
    (x, 1.0 - row as f64)
}

/// Base cell containing a projected point, `x` in `[0, 8[`, `y` in `[-2, 2]`.
fn base_cell_from_plane(x: f64, y: f64) -> u8 {
    let column = ((0.5 * x) as u8).min(3);
    if y > 1.0 {
        return column;
    }
    if y < -1.0 {
        return 8 + column;
    }
    // unit square holding halves of two equatorial diamonds and the lower/upper
    // quarters of a polar one
    let u = 0.5 * x - column as f64;
    let v = 0.5 * (y + 1.0);
    let off_centre = (u - 0.5).abs();
    if v - 0.5 > off_centre {
        column
    } else if 0.5 - v > off_centre {
        8 + column
    } else if u < 0.5 {
        4 + column
    } else {
        4 + ((column + 1) & 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::constants::TRANSITION_LATITUDE;
    use std::f64::consts::{FRAC_PI_4, PI};

    #[test]
    fn test_depth_helpers() -> Result<(), HealpixError> {
        assert_eq!(nside(0)?, 1);
        assert_eq!(nside(29)?, 1 << 29);
        assert_eq!(num_cells(0)?, 12);
        assert_eq!(num_cells(2)?, 192);
        assert_eq!(num_cells(29)?, 12 * (1u64 << 58));
        assert_eq!(num_cells(30), Err(HealpixError::InvalidDepth(30)));
        assert!(Layer::new(30).is_err());
        Ok(())
    }

    #[test]
    fn test_decode_encode() -> Result<(), HealpixError> {
        let layer = Layer::new(2)?;
        let parts = layer.decode(183);
        assert_eq!(
            parts,
            CellParts {
                base_cell: 11,
                i: 3,
                j: 1
            }
        );
        assert_eq!(layer.encode(parts), 183);
        assert_eq!(layer.base_cell(183), 11);
        Ok(())
    }

    #[test]
    fn test_check_cell() -> Result<(), HealpixError> {
        let layer = Layer::new(1)?;
        assert!(layer.check_cell(47).is_ok());
        assert_eq!(
            layer.check_cell(48),
            Err(HealpixError::OutOfRange { cell: 48, depth: 1 })
        );
        assert_eq!(layer.check_signed(5)?, 5);
        assert!(layer.check_signed(-1).is_err());
        Ok(())
    }

    #[test]
    fn test_base_cell_centres_on_sphere() -> Result<(), HealpixError> {
        let layer = Layer::new(0)?;
        for base_cell in 0..12u64 {
            let (lon, lat) = layer.center_unchecked(base_cell);
            let column = (base_cell % 4) as f64;
            let (expected_lon, expected_lat) = match base_cell / 4 {
                0 => (FRAC_PI_4 + column * 0.5 * PI, TRANSITION_LATITUDE),
                1 => (column * 0.5 * PI, 0.0),
                _ => (FRAC_PI_4 + column * 0.5 * PI, -TRANSITION_LATITUDE),
            };
            assert!((lon - expected_lon).abs() < 1e-12, "cell {base_cell}");
            assert!((lat - expected_lat).abs() < 1e-12, "cell {base_cell}");
        }
        Ok(())
    }

    #[test]
    fn test_hash_of_centre_is_identity() -> Result<(), HealpixError> {
        for depth in [0u8, 1, 3, 8, 17, 29] {
            let layer = Layer::new(depth)?;
            let step = (layer.n_cells() / 997).max(1);
            let mut cell = 0;
            while cell < layer.n_cells() {
                let (lon, lat) = layer.center_unchecked(cell);
                assert_eq!(layer.hash(lon, lat)?, cell, "depth {depth}");
                cell += step;
            }
        }
        Ok(())
    }

    #[test]
    fn test_hash_poles_and_wrap() -> Result<(), HealpixError> {
        let layer = Layer::new(3)?;
        let north = layer.hash(0.3, FRAC_PI_2)?;
        assert!(layer.base_cell(north) < 4);
        let south = layer.hash(0.3, -FRAC_PI_2)?;
        assert!(layer.base_cell(south) >= 8);
        assert_eq!(layer.hash(-0.1, 0.2)?, layer.hash(TAU - 0.1, 0.2)?);
        assert!(matches!(
            layer.hash(0.0, 2.0),
            Err(HealpixError::InvalidCoordinate { .. })
        ));
        assert!(layer.hash(f64::NAN, 0.0).is_err());
        Ok(())
    }

    #[test]
    fn test_vertices_surround_centre() -> Result<(), HealpixError> {
        let layer = Layer::new(4)?;
        for cell in [0u64, 1000, 1535, 2000, 3071] {
            let (lon, lat) = layer.center_unchecked(cell);
            let [s, e, n, w] = layer.vertices_unchecked(cell);
            assert!(s.1 < lat && lat < n.1, "cell {cell}");
            assert!((e.1 - w.1).abs() < 1e-12, "cell {cell}");
            let centre_lon = |v: (f64, f64)| {
                let d = v.0 - lon;
                if d > PI { d - TAU } else if d < -PI { d + TAU } else { d }
            };
            assert!(centre_lon(w) < 0.0 && centre_lon(e) > 0.0, "cell {cell}");
        }
        Ok(())
    }

    #[test]
    fn test_geometry_of_missing_cell_is_rejected() -> Result<(), HealpixError> {
        let layer = Layer::new(2)?;
        let expected = HealpixError::OutOfRange { cell: 192, depth: 2 };
        assert_eq!(layer.center(192), Err(expected.clone()));
        assert_eq!(layer.vertices(192), Err(expected));
        assert!(layer.center(500).is_err());
        assert_eq!(layer.center(191)?, layer.center_unchecked(191));
        assert_eq!(layer.vertices(191)?, layer.vertices_unchecked(191));
        Ok(())
    }
}
