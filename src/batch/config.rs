use crate::index::IndexingScheme;
use serde::{Deserialize, Serialize};

/// Configuration shared by all batch operations.
///
/// `workers == 0` lets the pool pick its size: `RAYON_NUM_THREADS` when set,
/// the number of logical cores otherwise. Any other value is used as is.
///
/// # Example
/// ```
/// use healpix_grid::{BatchConfig, IndexingScheme};
///
/// let config = BatchConfig::new()
///     .workers(4)
///     .scheme(IndexingScheme::Ring);
/// assert_eq!(config.workers, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub workers: usize,
    pub scheme: IndexingScheme,
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single worker, queries run one after the other.
    pub fn sequential() -> Self {
        Self::default().workers(1)
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn scheme(mut self, scheme: IndexingScheme) -> Self {
        self.scheme = scheme;
        self
    }
}
