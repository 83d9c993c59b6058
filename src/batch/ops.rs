//! Batch entry points over arrays of cells.
//!
//! Every function validates the whole input before any work is dispatched, so
//! a call either fills its complete output or returns the first error found.

use crate::batch::config::BatchConfig;
use crate::batch::dispatch::fill_rows;
use crate::batch::table::{CellTable, DistanceTable, Table};
use crate::coord::{Coordinate, check_lonlat, to_degrees_point};
use crate::error::HealpixError;
use crate::index::{IndexingScheme, Layer, N_BASE_CELLS, SENTINEL};
use crate::neighbours::check_ring;
use geo_types::Point;
use std::cmp::Ordering;

/// Destination cells of [`angular_distances`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Destinations<'a> {
    /// One destination per source.
    Pairwise(&'a [i64]),
    /// `width` destinations per source, row-major.
    Broadcast { cells: &'a [i64], width: usize },
}

impl<'a> From<&'a CellTable> for Destinations<'a> {
    fn from(table: &'a CellTable) -> Self {
        Destinations::Broadcast {
            cells: table.as_slice(),
            width: table.width(),
        }
    }
}

fn validate_cells(layer: &Layer, cells: &[u64]) -> Result<(), HealpixError> {
    cells.iter().try_for_each(|&cell| layer.check_cell(cell))
}

/// Neighbour disks of radius `ring` around each cell.
///
/// Row `r` is the disk of `cells[r]`: the cell itself, then rings `1..=ring`,
/// padded with [`SENTINEL`] where a cell has fewer neighbours than slots.
///
/// # Example
/// ```
/// use healpix_grid::{BatchConfig, neighbours_disk};
///
/// # fn main() -> Result<(), healpix_grid::HealpixError> {
/// let table = neighbours_disk(&[50, 100], 2, 0, &BatchConfig::new())?;
/// assert_eq!(table.into_vec(), vec![50, 100]);
/// # Ok(())
/// # }
/// ```
pub fn neighbours_disk(
    cells: &[u64],
    depth: u8,
    ring: u32,
    config: &BatchConfig,
) -> Result<CellTable, HealpixError> {
    let _span =
        tracing::debug_span!("neighbours_disk", depth, ring, queries = cells.len()).entered();
    let layer = Layer::new(depth)?;
    let width = check_ring(&layer, ring)?;
    validate_cells(&layer, cells)?;

    let scheme = config.scheme;
    fill_rows(config, cells.len(), width, SENTINEL, |r, row| {
        let cell = scheme.to_nested(&layer, cells[r]);
        let len = layer.fill_disk(cell, ring, row);
        if scheme == IndexingScheme::Ring {
            for slot in &mut row[..len] {
                *slot = layer.to_ring_unchecked(*slot as u64) as i64;
            }
        }
    })
}

/// Angular distances in radians between each source cell and its destinations.
///
/// Pairwise destinations give a `N x 1` table, broadcast ones a `N x width`
/// table. A [`SENTINEL`] destination yields NaN in its slot.
///
/// # Example
/// ```
/// use healpix_grid::{BatchConfig, Destinations, angular_distances, neighbours_disk};
///
/// # fn main() -> Result<(), healpix_grid::HealpixError> {
/// let config = BatchConfig::new();
/// let disks = neighbours_disk(&[0, 1], 1, 1, &config)?;
/// let distances = angular_distances(&[0, 1], Destinations::from(&disks), 1, &config)?;
/// assert_eq!(distances.shape(), (2, 9));
/// assert_eq!(distances.row(0).map(|r| r[0]), Some(0.0));
/// # Ok(())
/// # }
/// ```
pub fn angular_distances(
    from: &[u64],
    to: Destinations<'_>,
    depth: u8,
    config: &BatchConfig,
) -> Result<DistanceTable, HealpixError> {
    let _span = tracing::debug_span!("angular_distances", depth, queries = from.len()).entered();
    let layer = Layer::new(depth)?;
    let (destinations, width) = match to {
        Destinations::Pairwise(cells) => {
            if cells.len() != from.len() {
                return Err(HealpixError::ShapeMismatch(format!(
                    "{} sources but {} pairwise destinations",
                    from.len(),
                    cells.len()
                )));
            }
            (cells, 1)
        }
        Destinations::Broadcast { cells, width } => {
            if from.len().checked_mul(width) != Some(cells.len()) {
                return Err(HealpixError::ShapeMismatch(format!(
                    "{} sources with {} destinations each need {} destination cells, got {}",
                    from.len(),
                    width,
                    from.len().saturating_mul(width),
                    cells.len()
                )));
            }
            (cells, width)
        }
    };
    validate_cells(&layer, from)?;
    destinations
        .iter()
        .filter(|&&cell| cell != SENTINEL)
        .try_for_each(|&cell| layer.check_signed(cell).map(|_| ()))?;

    let scheme = config.scheme;
    fill_rows(config, from.len(), width, f64::NAN, |r, row| {
        let centre = layer.center_unchecked(scheme.to_nested(&layer, from[r]));
        let targets = &destinations[r * width..(r + 1) * width];
        for (slot, &target) in row.iter_mut().zip(targets) {
            let target = if target == SENTINEL {
                SENTINEL
            } else {
                scheme.to_nested(&layer, target as u64) as i64
            };
            *slot = layer.distance_to_slot(centre, target);
        }
    })
}

/// Cell centres as `(lon, lat)` points in degrees, longitude in `[0, 360)`.
pub fn healpix_to_lonlat(
    cells: &[u64],
    depth: u8,
    config: &BatchConfig,
) -> Result<Vec<Point<f64>>, HealpixError> {
    let _span = tracing::debug_span!("healpix_to_lonlat", depth, queries = cells.len()).entered();
    let layer = Layer::new(depth)?;
    validate_cells(&layer, cells)?;

    let scheme = config.scheme;
    let table = fill_rows(config, cells.len(), 1, Point::new(f64::NAN, f64::NAN), |r, row| {
        row[0] = to_degrees_point(layer.center_unchecked(scheme.to_nested(&layer, cells[r])));
    })?;
    Ok(table.into_vec())
}

/// Cells containing each `(lon, lat)` coordinate given in degrees.
///
/// # Example
/// ```
/// use healpix_grid::{BatchConfig, lonlat_to_healpix};
///
/// # fn main() -> Result<(), healpix_grid::HealpixError> {
/// let points = [(45.0, 41.8), (0.0, 0.0)];
/// let nested = lonlat_to_healpix(&points, 0, &BatchConfig::new())?;
/// assert_eq!(nested, vec![0, 4]);
/// # Ok(())
/// # }
/// ```
pub fn lonlat_to_healpix<C>(
    coords: &[C],
    depth: u8,
    config: &BatchConfig,
) -> Result<Vec<u64>, HealpixError>
where
    C: Coordinate + Sync,
{
    let _span = tracing::debug_span!("lonlat_to_healpix", depth, queries = coords.len()).entered();
    let layer = Layer::new(depth)?;
    coords.iter().try_for_each(check_lonlat)?;

    let scheme = config.scheme;
    let table = fill_rows(config, coords.len(), 1, 0u64, |r, row| {
        let coord = &coords[r];
        let cell = layer.hash_unchecked(coord.lon().to_radians(), coord.lat().to_radians());
        row[0] = scheme.from_nested(&layer, cell);
    })?;
    Ok(table.into_vec())
}

/// Cell corners in degrees, one row of south, east, north and west per cell.
pub fn vertices(
    cells: &[u64],
    depth: u8,
    config: &BatchConfig,
) -> Result<Table<Point<f64>>, HealpixError> {
    let _span = tracing::debug_span!("vertices", depth, queries = cells.len()).entered();
    let layer = Layer::new(depth)?;
    validate_cells(&layer, cells)?;

    let scheme = config.scheme;
    fill_rows(config, cells.len(), 4, Point::new(f64::NAN, f64::NAN), |r, row| {
        let corners = layer.vertices_unchecked(scheme.to_nested(&layer, cells[r]));
        for (slot, corner) in row.iter_mut().zip(corners) {
            *slot = to_degrees_point(corner);
        }
    })
}

/// Moves each cell to `new_depth`.
///
/// Coarser or equal depths give one parent id per row; finer depths give the
/// `4^(new_depth - depth)` children of each cell, in nested order.
pub fn zoom_to(
    cells: &[u64],
    depth: u8,
    new_depth: u8,
    config: &BatchConfig,
) -> Result<Table<u64>, HealpixError> {
    let _span =
        tracing::debug_span!("zoom_to", depth, new_depth, queries = cells.len()).entered();
    let layer = Layer::new(depth)?;
    let target = Layer::new(new_depth)?;
    validate_cells(&layer, cells)?;

    let scheme = config.scheme;
    let direction = new_depth.cmp(&depth);
    let shift = 2 * depth.abs_diff(new_depth) as u32;
    let width = match direction {
        Ordering::Greater => 1usize << shift,
        _ => 1,
    };
    fill_rows(config, cells.len(), width, 0u64, |r, row| {
        let cell = scheme.to_nested(&layer, cells[r]);
        match direction {
            Ordering::Equal => row[0] = cells[r],
            Ordering::Less => row[0] = scheme.from_nested(&target, cell >> shift),
            Ordering::Greater => {
                for (slot, child) in row.iter_mut().zip((cell << shift)..((cell + 1) << shift)) {
                    *slot = scheme.from_nested(&target, child);
                }
            }
        }
    })
}

/// The cells sharing each cell's parent, itself included; 12 base cells at depth 0.
pub fn siblings(
    cells: &[u64],
    depth: u8,
    config: &BatchConfig,
) -> Result<Table<u64>, HealpixError> {
    let _span = tracing::debug_span!("siblings", depth, queries = cells.len()).entered();
    let layer = Layer::new(depth)?;
    validate_cells(&layer, cells)?;

    let scheme = config.scheme;
    let width = if depth == 0 { N_BASE_CELLS as usize } else { 4 };
    fill_rows(config, cells.len(), width, 0u64, |r, row| {
        let cell = scheme.to_nested(&layer, cells[r]);
        let range = crate::index::siblings(&layer, cell);
        for (slot, sibling) in row.iter_mut().zip(range) {
            *slot = scheme.from_nested(&layer, sibling);
        }
    })
}

/// Converts nested ids to ring ids.
pub fn nested_to_ring(
    cells: &[u64],
    depth: u8,
    config: &BatchConfig,
) -> Result<Vec<u64>, HealpixError> {
    convert(cells, depth, config, IndexingScheme::Ring)
}

/// Converts ring ids to nested ids.
pub fn ring_to_nested(
    cells: &[u64],
    depth: u8,
    config: &BatchConfig,
) -> Result<Vec<u64>, HealpixError> {
    convert(cells, depth, config, IndexingScheme::Nested)
}

fn convert(
    cells: &[u64],
    depth: u8,
    config: &BatchConfig,
    into: IndexingScheme,
) -> Result<Vec<u64>, HealpixError> {
    let _span = tracing::debug_span!("convert", depth, ?into, queries = cells.len()).entered();
    let layer = Layer::new(depth)?;
    validate_cells(&layer, cells)?;
    let table = fill_rows(config, cells.len(), 1, 0u64, |r, row| {
        row[0] = match into {
            IndexingScheme::Ring => layer.to_ring_unchecked(cells[r]),
            IndexingScheme::Nested => layer.from_ring_unchecked(cells[r]),
        };
    })?;
    Ok(table.into_vec())
}
