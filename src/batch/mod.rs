//! Parallel operations over arrays of cells.
//!
//! Inputs are validated up front, then split into contiguous row blocks that
//! run on a rayon pool sized by [`BatchConfig::workers`].

pub mod config;
mod dispatch;
mod ops;
mod table;

pub use config::BatchConfig;
pub use ops::{
    Destinations, angular_distances, healpix_to_lonlat, lonlat_to_healpix, neighbours_disk,
    nested_to_ring, ring_to_nested, siblings, vertices, zoom_to,
};
pub use table::{CellTable, DistanceTable, Table};
