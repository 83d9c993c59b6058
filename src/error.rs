use std::collections::TryReserveError;
use thiserror::Error;

/// Error type for healpix-grid operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HealpixError {
    /// The depth is outside the valid range (0-29).
    #[error("Invalid depth: {0} (expected 0-29)")]
    InvalidDepth(u8),
    /// A cell identifier does not exist at the given depth.
    #[error("Cell id {cell} is out of range at depth {depth}")]
    OutOfRange { cell: i64, depth: u8 },
    /// Paired input arrays have incompatible shapes.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
    /// The neighbour ring radius cannot be served at this depth.
    #[error("Invalid ring radius {ring} at depth {depth} (at most {max})")]
    InvalidRingRadius { ring: u32, depth: u8, max: u64 },
    /// Longitude/latitude input is not a finite point on the sphere.
    #[error("Invalid coordinate: ({lon}, {lat})")]
    InvalidCoordinate { lon: f64, lat: f64 },
    /// A hierarchy move went in the wrong direction.
    #[error("Cannot move from depth {from} to depth {to}: {reason}")]
    InvalidTargetDepth { from: u8, to: u8, reason: &'static str },
    /// The requested output cannot be allocated.
    #[error("Output too large: {0}")]
    OutputTooLarge(String),
    /// The worker pool could not be built.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

impl From<rayon::ThreadPoolBuildError> for HealpixError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        HealpixError::ThreadPool(err.to_string())
    }
}

impl From<TryReserveError> for HealpixError {
    fn from(err: TryReserveError) -> Self {
        HealpixError::OutputTooLarge(err.to_string())
    }
}
