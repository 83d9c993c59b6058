use crate::coord::{Coordinate, check_lonlat, to_degrees_point};
use crate::distance::great_circle;
use crate::error::HealpixError;
use crate::index::{IndexingScheme, Layer, SENTINEL, children, parent, siblings};
use geo_types::{LineString, Point, Polygon};

/// A single cell of the grid at a given depth.
///
/// The id is kept in the scheme the cell was created with; every geometric
/// operation goes through the nested scheme internally.
///
/// # Example
///
/// ```
/// use healpix_grid::HealpixCell;
///
/// # fn main() -> Result<(), healpix_grid::HealpixError> {
/// // Create from lon/lat in degrees
/// let cell = HealpixCell::from_lonlat(&(2.35, 48.85), 10)?;
/// println!("Cell ID: {}", cell.id());
/// println!("Center: ({}, {})", cell.center().x(), cell.center().y());
///
/// // Its disk of radius 1, centre first
/// let disk = cell.neighbours(1)?;
/// assert_eq!(disk[0], cell);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealpixCell {
    id: u64,
    scheme: IndexingScheme,
    layer: Layer,
}

impl HealpixCell {
    /// Create a cell from a nested id.
    ///
    /// # Example
    /// ```
    /// use healpix_grid::HealpixCell;
    ///
    /// # fn main() -> Result<(), healpix_grid::HealpixError> {
    /// let cell = HealpixCell::new(50, 2)?;
    /// assert_eq!(cell.base_cell(), 3);
    /// assert!(HealpixCell::new(192, 2).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(id: u64, depth: u8) -> Result<Self, HealpixError> {
        Self::with_scheme(id, depth, IndexingScheme::Nested)
    }

    /// Create a cell from an id in the given scheme.
    pub fn with_scheme(id: u64, depth: u8, scheme: IndexingScheme) -> Result<Self, HealpixError> {
        let layer = Layer::new(depth)?;
        layer.check_cell(id)?;
        Ok(Self { id, scheme, layer })
    }

    /// Create the nested cell containing a `(lon, lat)` coordinate in degrees.
    ///
    /// # Example
    /// ```
    /// use healpix_grid::HealpixCell;
    /// use geo_types::Point;
    ///
    /// # fn main() -> Result<(), healpix_grid::HealpixError> {
    /// // From tuple
    /// let cell = HealpixCell::from_lonlat(&(45.0, 41.8), 0)?;
    /// // From Point
    /// let same = HealpixCell::from_lonlat(&Point::new(45.0, 41.8), 0)?;
    /// assert_eq!(cell, same);
    /// assert_eq!(cell.id(), 0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_lonlat(coord: &impl Coordinate, depth: u8) -> Result<Self, HealpixError> {
        let layer = Layer::new(depth)?;
        check_lonlat(coord)?;
        let id = layer.hash_unchecked(coord.lon().to_radians(), coord.lat().to_radians());
        Ok(Self {
            id,
            scheme: IndexingScheme::Nested,
            layer,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn depth(&self) -> u8 {
        self.layer.depth()
    }

    pub fn scheme(&self) -> IndexingScheme {
        self.scheme
    }

    /// Id of this cell in the nested scheme.
    pub fn nested_id(&self) -> u64 {
        self.scheme.to_nested(&self.layer, self.id)
    }

    /// The same cell numbered in `scheme`.
    pub fn to_scheme(&self, scheme: IndexingScheme) -> Self {
        self.rebuild(&self.layer, self.nested_id(), scheme)
    }

    pub fn base_cell(&self) -> u8 {
        self.layer.base_cell(self.nested_id())
    }

    /// Centre in degrees, longitude in `[0, 360)`.
    pub fn center(&self) -> Point<f64> {
        to_degrees_point(self.layer.center_unchecked(self.nested_id()))
    }

    /// Corners in degrees: south, east, north, west.
    pub fn vertices(&self) -> [Point<f64>; 4] {
        self.layer.vertices_unchecked(self.nested_id()).map(to_degrees_point)
    }

    /// Closed polygon through the four corners.
    ///
    /// Edges are straight in lon/lat, so this is an approximation of the
    /// cell boundary. Cells crossing the 0/360 meridian are not split.
    pub fn to_polygon(&self) -> Polygon<f64> {
        let mut ring: Vec<Point<f64>> = self.vertices().to_vec();
        ring.push(ring[0]);
        Polygon::new(LineString::from(ring), vec![])
    }

    /// Angular distance in radians between the two centres.
    ///
    /// The cells may use different depths and schemes.
    pub fn distance_to(&self, other: &HealpixCell) -> f64 {
        great_circle(
            self.layer.center_unchecked(self.nested_id()),
            other.layer.center_unchecked(other.nested_id()),
        )
    }

    /// Neighbour row of radius `ring` in this cell's scheme, [`SENTINEL`] padded.
    pub fn disk_row(&self, ring: u32) -> Result<Vec<i64>, HealpixError> {
        let mut row = self.layer.neighbours_disk(self.nested_id(), ring)?;
        for slot in row.iter_mut().filter(|slot| **slot != SENTINEL) {
            *slot = self.scheme.from_nested(&self.layer, *slot as u64) as i64;
        }
        Ok(row)
    }

    /// Cells of the disk of radius `ring`, this cell first.
    pub fn neighbours(&self, ring: u32) -> Result<Vec<Self>, HealpixError> {
        let row = self.layer.neighbours_disk(self.nested_id(), ring)?;
        Ok(row
            .into_iter()
            .filter(|&cell| cell != SENTINEL)
            .map(|cell| self.rebuild(&self.layer, cell as u64, self.scheme))
            .collect())
    }

    /// Ancestor at the coarser or equal `depth`.
    ///
    /// # Example
    /// ```
    /// use healpix_grid::HealpixCell;
    ///
    /// # fn main() -> Result<(), healpix_grid::HealpixError> {
    /// let cell = HealpixCell::new(191, 2)?;
    /// assert_eq!(cell.parent(1)?.id(), 47);
    /// assert_eq!(cell.parent(0)?.id(), 11);
    /// # Ok(())
    /// # }
    /// ```
    pub fn parent(&self, depth: u8) -> Result<Self, HealpixError> {
        let id = parent(&self.layer, self.nested_id(), depth)?;
        Ok(self.rebuild(&Layer::new(depth)?, id, self.scheme))
    }

    /// Descendants at the finer or equal `depth`, in nested order.
    pub fn children(&self, depth: u8) -> Result<Vec<Self>, HealpixError> {
        let range = children(&self.layer, self.nested_id(), depth)?;
        let layer = Layer::new(depth)?;
        Ok(range
            .map(|id| self.rebuild(&layer, id, self.scheme))
            .collect())
    }

    /// Cells with the same parent, this one included.
    pub fn siblings(&self) -> Vec<Self> {
        siblings(&self.layer, self.nested_id())
            .map(|id| self.rebuild(&self.layer, id, self.scheme))
            .collect()
    }

    fn rebuild(&self, layer: &Layer, nested: u64, scheme: IndexingScheme) -> Self {
        Self {
            id: scheme.from_nested(layer, nested),
            scheme,
            layer: *layer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new() -> Result<(), HealpixError> {
        let cell = HealpixCell::new(183, 2)?;
        assert_eq!(cell.id(), 183);
        assert_eq!(cell.depth(), 2);
        assert_eq!(cell.scheme(), IndexingScheme::Nested);
        assert_eq!(cell.base_cell(), 11);

        assert_eq!(
            HealpixCell::new(192, 2),
            Err(HealpixError::OutOfRange { cell: 192, depth: 2 })
        );
        assert_eq!(HealpixCell::new(0, 30), Err(HealpixError::InvalidDepth(30)));
        Ok(())
    }

    #[test]
    fn test_from_lonlat_tuple_and_point() -> Result<(), HealpixError> {
        let from_tuple = HealpixCell::from_lonlat(&(120.0, -30.0), 8)?;
        let from_point = HealpixCell::from_lonlat(&Point::new(120.0, -30.0), 8)?;
        assert_eq!(from_tuple, from_point);
        assert_eq!(from_tuple.depth(), 8);
        Ok(())
    }

    #[test]
    fn test_from_lonlat_rejects_bad_latitude() {
        assert_eq!(
            HealpixCell::from_lonlat(&(0.0, -90.5), 4),
            Err(HealpixError::InvalidCoordinate {
                lon: 0.0,
                lat: -90.5
            })
        );
        assert!(HealpixCell::from_lonlat(&(f64::NAN, 0.0), 4).is_err());
    }

    #[test]
    fn test_center_round_trip() -> Result<(), HealpixError> {
        for id in [0, 1000, 40_000, 196_607] {
            let cell = HealpixCell::new(id, 7)?;
            assert_eq!(HealpixCell::from_lonlat(&cell.center(), 7)?, cell);
        }
        Ok(())
    }

    #[test]
    fn test_scheme_switch() -> Result<(), HealpixError> {
        let nested = HealpixCell::new(0, 1)?;
        let ring = nested.to_scheme(IndexingScheme::Ring);
        assert_eq!(ring.id(), 13);
        assert_eq!(ring.nested_id(), 0);
        assert_eq!(ring.center(), nested.center());
        assert_eq!(ring.to_scheme(IndexingScheme::Nested), nested);

        let direct = HealpixCell::with_scheme(13, 1, IndexingScheme::Ring)?;
        assert_eq!(direct, ring);
        Ok(())
    }

    #[test]
    fn test_neighbours() -> Result<(), HealpixError> {
        let cell = HealpixCell::new(50, 2)?;
        let disk = cell.neighbours(1)?;
        assert_eq!(disk[0], cell);
        let mut ids: Vec<u64> = disk.iter().map(HealpixCell::id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![48, 49, 50, 51, 56, 57, 117, 119, 125]);
        assert!(disk.iter().all(|c| c.depth() == 2));
        Ok(())
    }

    #[test]
    fn test_neighbours_in_ring_scheme() -> Result<(), HealpixError> {
        let cell = HealpixCell::new(50, 2)?.to_scheme(IndexingScheme::Ring);
        let row = cell.disk_row(1)?;
        let disk = cell.neighbours(1)?;
        assert_eq!(row.len(), 9);
        for (slot, neighbour) in row.iter().zip(&disk) {
            assert_eq!(*slot, neighbour.id() as i64);
            assert_eq!(neighbour.scheme(), IndexingScheme::Ring);
        }
        Ok(())
    }

    #[test]
    fn test_corner_disk_is_padded() -> Result<(), HealpixError> {
        // north corner of an equatorial base cell at depth 1
        let cell = HealpixCell::new(19, 1)?;
        let row = cell.disk_row(1)?;
        assert_eq!(row[8], SENTINEL);
        assert_eq!(cell.neighbours(1)?.len(), 8);
        Ok(())
    }

    #[test]
    fn test_distance_to() -> Result<(), HealpixError> {
        let a = HealpixCell::new(4, 0)?;
        let b = HealpixCell::new(6, 0)?;
        assert!((a.distance_to(&b) - PI).abs() < 1e-12);
        assert_eq!(a.distance_to(&a), 0.0);

        let ring = a.to_scheme(IndexingScheme::Ring);
        assert_eq!(ring.distance_to(&b), a.distance_to(&b));
        Ok(())
    }

    #[test]
    fn test_hierarchy() -> Result<(), HealpixError> {
        let cell = HealpixCell::new(5, 1)?;
        let children: Vec<u64> = cell.children(2)?.iter().map(HealpixCell::id).collect();
        assert_eq!(children, vec![20, 21, 22, 23]);
        assert_eq!(cell.children(3)?.len(), 16);
        assert_eq!(cell.parent(0)?, HealpixCell::new(1, 0)?);
        assert!(cell.parent(2).is_err());
        assert!(cell.children(0).is_err());

        let siblings: Vec<u64> = cell.siblings().iter().map(HealpixCell::id).collect();
        assert_eq!(siblings, vec![4, 5, 6, 7]);
        Ok(())
    }

    #[test]
    fn test_hierarchy_keeps_scheme() -> Result<(), HealpixError> {
        let cell = HealpixCell::new(5, 1)?.to_scheme(IndexingScheme::Ring);
        for child in cell.children(2)? {
            assert_eq!(child.scheme(), IndexingScheme::Ring);
            assert_eq!(child.parent(1)?, cell);
        }
        Ok(())
    }

    #[test]
    fn test_to_polygon() -> Result<(), HealpixError> {
        let cell = HealpixCell::new(4, 0)?;
        let polygon = cell.to_polygon();
        let exterior = polygon.exterior();
        assert_eq!(exterior.0.len(), 5);
        assert!(exterior.is_closed());
        assert!((exterior.0[1].x - 45.0).abs() < 1e-9);
        Ok(())
    }
}
