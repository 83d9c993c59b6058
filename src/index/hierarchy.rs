//! Parent/children relations between depths, nested scheme.

use crate::error::HealpixError;
use crate::index::constants::N_BASE_CELLS;
use crate::index::layer::{Layer, check_depth};
use std::ops::Range;

/// Ancestor of `cell` (at `layer`'s depth) at the coarser or equal `depth`.
pub fn parent(layer: &Layer, cell: u64, depth: u8) -> Result<u64, HealpixError> {
    if depth > layer.depth() {
        return Err(HealpixError::InvalidTargetDepth {
            from: layer.depth(),
            to: depth,
            reason: "parent depth must not exceed the cell depth",
        });
    }
    Ok(cell >> (2 * (layer.depth() - depth) as u32))
}

/// Descendants of `cell` at the finer or equal `depth`, as a contiguous range of ids.
pub fn children(layer: &Layer, cell: u64, depth: u8) -> Result<Range<u64>, HealpixError> {
    check_depth(depth)?;
    if depth < layer.depth() {
        return Err(HealpixError::InvalidTargetDepth {
            from: layer.depth(),
            to: depth,
            reason: "children depth must not be below the cell depth",
        });
    }
    let shift = 2 * (depth - layer.depth()) as u32;
    Ok((cell << shift)..((cell + 1) << shift))
}

/// Cells sharing `cell`'s parent, `cell` included. At depth 0 these are the 12 base cells.
pub fn siblings(layer: &Layer, cell: u64) -> Range<u64> {
    if layer.depth() == 0 {
        return 0..N_BASE_CELLS;
    }
    let parent = cell >> 2;
    (parent << 2)..((parent + 1) << 2)
}
