//! Neighbour disks (k-rings) in the nested scheme.
//!
//! A disk of radius `k` around a cell is the set of cells whose in-face
//! coordinates are at most `k` steps away along `i`, `j` or a diagonal. Cells
//! beyond the edge of the base cell are looked up in the adjacent base cell,
//! which requires `k <= nside` so that a disk crosses each edge at most once.
//!
//! A row holds the centre first, then ring 1, ring 2, ... Each ring is walked
//! from its south corner towards the west, north and east corners. Around the
//! eight base cell corners shared by only three base cells, one quadrant of the
//! flat neighbourhood does not exist; those positions are skipped and the row
//! ends with [`SENTINEL`] padding instead.

use crate::error::HealpixError;
use crate::index::{CellParts, Layer, SENTINEL};

/// Number of slots in a neighbour row of radius `ring`, `(2 * ring + 1)^2`,
/// or `None` if that does not fit in a `usize`.
pub fn disk_width(ring: u32) -> Option<usize> {
    let side = (ring as usize).checked_mul(2)?.checked_add(1)?;
    side.checked_mul(side)
}

/// Row width of a disk of radius `ring` at `layer`'s depth.
///
/// Fails unless `ring <= nside` and one row of ids fits in memory addressing.
pub fn check_ring(layer: &Layer, ring: u32) -> Result<usize, HealpixError> {
    let max = layer.nside() as u64;
    if ring as u64 > max {
        return Err(HealpixError::InvalidRingRadius {
            ring,
            depth: layer.depth(),
            max,
        });
    }
    disk_width(ring)
        .filter(|&width| width <= isize::MAX as usize / size_of::<i64>())
        .ok_or_else(|| {
            HealpixError::OutputTooLarge(format!("neighbour row of radius {ring} is too wide"))
        })
}

impl Layer {
    /// Neighbour disk of radius `ring` around `cell`, padded with [`SENTINEL`].
    ///
    /// # Example
    /// ```
    /// use healpix_grid::Layer;
    ///
    /// # fn main() -> Result<(), healpix_grid::HealpixError> {
    /// let layer = Layer::new(2)?;
    /// let row = layer.neighbours_disk(50, 1)?;
    /// assert_eq!(row.len(), 9);
    /// assert_eq!(row[0], 50);
    /// # Ok(())
    /// # }
    /// ```
    pub fn neighbours_disk(&self, cell: u64, ring: u32) -> Result<Vec<i64>, HealpixError> {
        self.check_cell(cell)?;
        let width = check_ring(self, ring)?;
        let mut row = Vec::new();
        row.try_reserve_exact(width)?;
        row.resize(width, SENTINEL);
        self.fill_disk(cell, ring, &mut row);
        Ok(row)
    }

    /// Writes the disk of an already validated cell into `row` and returns the
    /// number of cells written. `row` must hold `disk_width(ring)` slots.
    pub(crate) fn fill_disk(&self, cell: u64, ring: u32, row: &mut [i64]) -> usize {
        let CellParts { base_cell, i, j } = self.decode(cell);
        let (i, j) = (i as i64, j as i64);
        row[0] = cell as i64;
        let mut len = 1;
        let mut push = |ii: i64, jj: i64| {
            if let Some(found) = self.shifted_cell(base_cell, ii, jj) {
                row[len] = found as i64;
                len += 1;
            }
        };
        for r in 1..=ring as i64 {
            for t in 0..2 * r {
                push(i - r, j - r + t);
            }
            for t in 0..2 * r {
                push(i - r + t, j + r);
            }
            for t in 0..2 * r {
                push(i + r, j + r - t);
            }
            for t in 0..2 * r {
                push(i + r - t, j - r);
            }
        }
        row[len..].fill(SENTINEL);
        len
    }

    /// Cell at in-face coordinates `(i, j)` of `base_cell`, where the
    /// coordinates may overflow the base cell by up to `nside` on each side.
    fn shifted_cell(&self, base_cell: u8, i: i64, j: i64) -> Option<u64> {
        let n = self.nside as i64;
        let (base_cell, i, j) = match (quadrant(i, n), quadrant(j, n)) {
            (0, 0) => (base_cell, i, j),
            (oi, oj) => {
                let column = base_cell & 3;
                match base_cell >> 2 {
                    0 => npc_neighbour(column, oi, oj, i, j, n)?,
                    1 => eqr_neighbour(column, oi, oj, i, j, n)?,
                    _ => spc_neighbour(column, oi, oj, i, j, n)?,
                }
            }
        };
        Some(self.encode(CellParts {
            base_cell,
            i: i as u32,
            j: j as u32,
        }))
    }
}

fn quadrant(v: i64, n: i64) -> i8 {
    if v < 0 {
        -1
    } else if v >= n {
        1
    } else {
        0
    }
}

fn next(column: u8) -> u8 {
    (column + 1) & 3
}

fn prev(column: u8) -> u8 {
    (column + 3) & 3
}

fn oppo(column: u8) -> u8 {
    (column + 2) & 3
}

/// Base cell and in-face coordinates after crossing a base cell edge.
type Shifted = (u8, i64, i64);

fn npc_neighbour(c: u8, oi: i8, oj: i8, i: i64, j: i64, n: i64) -> Option<Shifted> {
    match (oi, oj) {
        (-1, -1) => Some((8 + c, i + n, j + n)),
        (0, -1) => Some((4 + next(c), i, j + n)),
        (-1, 0) => Some((4 + c, i + n, j)),
        (1, 0) => Some((next(c), j, 2 * n - 1 - i)),
        (0, 1) => Some((prev(c), 2 * n - 1 - j, i)),
        (1, 1) => Some((oppo(c), 2 * n - 1 - i, 2 * n - 1 - j)),
        _ => None,
    }
}

fn eqr_neighbour(c: u8, oi: i8, oj: i8, i: i64, j: i64, n: i64) -> Option<Shifted> {
    match (oi, oj) {
        (0, -1) => Some((8 + c, i, j + n)),
        (1, -1) => Some((4 + next(c), i - n, j + n)),
        (-1, 0) => Some((8 + prev(c), i + n, j)),
        (1, 0) => Some((c, i - n, j)),
        (-1, 1) => Some((4 + prev(c), i + n, j - n)),
        (0, 1) => Some((prev(c), i, j - n)),
        _ => None,
    }
}

fn spc_neighbour(c: u8, oi: i8, oj: i8, i: i64, j: i64, n: i64) -> Option<Shifted> {
    match (oi, oj) {
        (-1, -1) => Some((8 + oppo(c), -1 - i, -1 - j)),
        (0, -1) => Some((8 + next(c), -1 - j, i)),
        (-1, 0) => Some((8 + prev(c), j, -1 - i)),
        (1, 0) => Some((4 + next(c), i - n, j)),
        (0, 1) => Some((4 + c, i, j - n)),
        (1, 1) => Some((c, i - n, j - n)),
        _ => None,
    }
}
