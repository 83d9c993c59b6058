//! # healpix-grid
//!
//! Cell addressing, neighbour disks and angular distances on the HEALPix
//! sphere grid, for single cells and for large batches.
//!
//! There are currently three main entry points.
//!
//! ### 1. `HealpixCell` - Single Cell Operations
//!
//! ```
//! use healpix_grid::HealpixCell;
//!
//! # fn main() -> Result<(), healpix_grid::HealpixError> {
//! let cell = HealpixCell::from_lonlat(&(-2.248, 53.481), 12)?;
//! println!("{}", cell.id());
//! let polygon = cell.to_polygon();
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `Layer` - Id Arithmetic at One Depth
//!
//! ```
//! use healpix_grid::{Layer, SENTINEL};
//!
//! # fn main() -> Result<(), healpix_grid::HealpixError> {
//! let layer = Layer::new(1)?;
//! let row = layer.neighbours_disk(19, 1)?;
//! assert_eq!(row[8], SENTINEL);
//! assert_eq!(layer.from_ring(layer.to_ring(19)?)?, 19);
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. Batch Operations
//!
//! Whole arrays of cells are processed on a worker pool. Results are the same
//! for any number of workers:
//!
//! ```
//! use healpix_grid::{BatchConfig, Destinations, angular_distances, neighbours_disk};
//!
//! # fn main() -> Result<(), healpix_grid::HealpixError> {
//! let config = BatchConfig::new().workers(4);
//! let cells = [50, 100];
//! let disks = neighbours_disk(&cells, 2, 1, &config)?;
//! let distances = angular_distances(&cells, Destinations::from(&disks), 2, &config)?;
//! assert_eq!(distances.shape(), (2, 9));
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod cell;
pub mod coord;
pub mod distance;
pub mod error;
pub mod index;
pub mod neighbours;

pub use batch::{
    BatchConfig, CellTable, Destinations, DistanceTable, Table, angular_distances,
    healpix_to_lonlat, lonlat_to_healpix, neighbours_disk, nested_to_ring, ring_to_nested,
    siblings, vertices, zoom_to,
};
pub use cell::HealpixCell;
pub use coord::Coordinate;
pub use distance::great_circle;
pub use error::HealpixError;
pub use index::{
    CellParts, DEPTH_MAX, IndexingScheme, Layer, N_BASE_CELLS, SENTINEL, TRANSITION_LATITUDE,
    check_depth, nside, num_cells,
};
pub use neighbours::disk_width;

pub use geo_types;
