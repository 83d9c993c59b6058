use crate::index::layer::Layer;
use serde::{Deserialize, Serialize};

/// Numbering convention of cell ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexingScheme {
    /// Quad-tree (z-order) numbering, children of `c` are `4c..4c+4`
    #[default]
    Nested,
    /// Iso-latitude rings from north to south, west to east inside a ring
    Ring,
}

impl IndexingScheme {
    /// Converts an id of this scheme to the nested scheme.
    pub(crate) fn to_nested(self, layer: &Layer, cell: u64) -> u64 {
        match self {
            IndexingScheme::Nested => cell,
            IndexingScheme::Ring => layer.from_ring_unchecked(cell),
        }
    }

    /// Converts a nested id to this scheme.
    pub(crate) fn from_nested(self, layer: &Layer, cell: u64) -> u64 {
        match self {
            IndexingScheme::Nested => cell,
            IndexingScheme::Ring => layer.to_ring_unchecked(cell),
        }
    }
}
