//! Conversion between the nested and the ring numbering of a [`Layer`].
//!
//! Rings are iso-latitude lines of cells numbered from the north pole. With
//! `n = nside`, the `n` northernmost rings hold `4, 8, .., 4n` cells, the
//! `2n - 1` central rings `4n` cells each and the `n` southern rings mirror the
//! northern ones. Inside a base cell, `h = i + j` indexes the ring and
//! `l = i - j` the position along it.

use crate::error::HealpixError;
use crate::index::layer::{CellParts, Layer};

impl Layer {
    /// Ring-scheme id of the given nested-scheme cell.
    pub fn to_ring(&self, cell: u64) -> Result<u64, HealpixError> {
        self.check_cell(cell)?;
        Ok(self.to_ring_unchecked(cell))
    }

    /// Nested-scheme id of the given ring-scheme cell.
    pub fn from_ring(&self, cell: u64) -> Result<u64, HealpixError> {
        self.check_cell(cell)?;
        Ok(self.from_ring_unchecked(cell))
    }

    pub(crate) fn to_ring_unchecked(&self, cell: u64) -> u64 {
        let CellParts { base_cell, i, j } = self.decode(cell);
        let n = self.nside as u64;
        let h = i as u64 + j as u64;
        let l = i as i64 - j as i64;
        let column = (base_cell & 3) as u64;
        let row = (base_cell >> 2) as u64;
        let ring = n * (row + 2) - (h + 2);

        let (first, shift) = if ring < n {
            let cells_per_quarter = ring + 1;
            (
                2 * ring * (ring + 1),
                cells_per_quarter / 2 + cells_per_quarter * column,
            )
        } else if ring >= 3 * n - 1 {
            let cells_per_quarter = h + 1;
            (
                self.n_hash - 2 * cells_per_quarter * (cells_per_quarter + 1),
                cells_per_quarter / 2 + cells_per_quarter * column,
            )
        } else {
            // rings alternate between starting on a base cell corner and half a base cell later
            let half = n * ((row + 1) & 1) / 2;
            let quarter = if base_cell == 4 && l < 0 { 4 } else { column };
            (self.first_eqr + (ring - n) * 4 * n, half + n * quarter)
        };
        // floor(l / 2), l may be negative
        (first as i64 + shift as i64 + (l >> 1)) as u64
    }

    pub(crate) fn from_ring_unchecked(&self, cell: u64) -> u64 {
        let n = self.nside as u64;
        let first_spc = self.n_hash - self.first_eqr;
        if cell < self.first_eqr {
            let ring = polar_ring_index(cell);
            let in_ring = cell - 2 * ring * (ring + 1);
            let quarter = in_ring / (ring + 1);
            let h = (2 * n - 2 - ring) as i64;
            let l = (2 * (in_ring - (ring + 1) * quarter)) as i64 - ring as i64;
            self.encode(parts_from_rotated(quarter as u8, h, l))
        } else if cell >= first_spc {
            let mirrored = self.n_hash - 1 - cell;
            let ring = polar_ring_index(mirrored);
            let in_ring = (4 * (ring + 1) - 1) - (mirrored - 2 * ring * (ring + 1));
            let quarter = in_ring / (ring + 1);
            let h = ring as i64;
            let l = (2 * (in_ring - (ring + 1) * quarter)) as i64 - ring as i64;
            self.encode(parts_from_rotated(8 + quarter as u8, h, l))
        } else {
            let offset = cell - self.first_eqr;
            let ring = offset >> (self.depth + 2);
            let in_ring = offset - (ring << (self.depth + 2));
            // global rotated frame with its origin in the south corner of base cell 4
            let h = (2 * n - 2 - ring) as i64;
            let l = (2 * in_ring + (ring & 1)) as i64;
            let gi = (h + l) >> 1;
            let gj = ((h - l) >> 1) + 4 * n as i64;
            let shift = self.depth as u32;
            let mask = (n - 1) as i64;
            self.encode(CellParts {
                base_cell: base_cell_from_rotated(gi >> shift, gj >> shift),
                i: (gi & mask) as u32,
                j: (gj & mask) as u32,
            })
        }
    }
}

/// Largest `r` such that `2r(r + 1) <= k`, i.e. the polar ring holding the `k`-th cell.
fn polar_ring_index(k: u64) -> u64 {
    let mut r = ((((1 + 2 * k) as f64).sqrt() - 1.0) * 0.5) as u64;
    while 2 * (r + 1) * (r + 2) <= k {
        r += 1;
    }
    while r > 0 && 2 * r * (r + 1) > k {
        r -= 1;
    }
    r
}

fn parts_from_rotated(base_cell: u8, h: i64, l: i64) -> CellParts {
    CellParts {
        base_cell,
        i: ((h + l) >> 1) as u32,
        j: ((h - l) >> 1) as u32,
    }
}

/// Base cell of a square of the global rotated frame used for equatorial rings.
fn base_cell_from_rotated(bi: i64, bj: i64) -> u8 {
    match bi + bj {
        5 => ((bi - 1) & 3) as u8,
        4 => 4 + (bi & 3) as u8,
        _ => 8 + (bi & 3) as u8,
    }
}
