/// Row-major 2-D output of a batch call: one row per input query.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    data: Vec<T>,
    rows: usize,
    width: usize,
}

/// Neighbour rows, [`SENTINEL`](crate::SENTINEL) in empty slots.
pub type CellTable = Table<i64>;

/// Distance rows, NaN where the destination was a sentinel.
pub type DistanceTable = Table<f64>;

impl<T> Table<T> {
    pub(crate) fn from_parts(data: Vec<T>, rows: usize, width: usize) -> Self {
        debug_assert_eq!(data.len(), rows * width);
        Self { data, rows, width }
    }

    /// `(rows, width)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.width)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn row(&self, index: usize) -> Option<&[T]> {
        if index >= self.rows {
            return None;
        }
        Some(&self.data[index * self.width..(index + 1) * self.width])
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        (0..self.rows).map(move |r| &self.data[r * self.width..(r + 1) * self.width])
    }

    /// Flat row-major view of all values.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}
