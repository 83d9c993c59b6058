pub mod constants;
pub mod hierarchy;
mod layer;
mod ring;
mod scheme;
mod zorder;

pub use constants::{DEPTH_MAX, N_BASE_CELLS, SENTINEL, TRANSITION_LATITUDE};
pub use hierarchy::{children, parent, siblings};
pub use layer::{CellParts, Layer, check_depth, nside, num_cells};
pub use scheme::IndexingScheme;
