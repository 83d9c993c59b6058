use crate::batch::config::BatchConfig;
use crate::batch::table::Table;
use crate::error::HealpixError;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

fn build_pool(workers: usize) -> Result<ThreadPool, HealpixError> {
    Ok(ThreadPoolBuilder::new().num_threads(workers).build()?)
}

/// Runs `fill(row_index, row)` for every row of a `rows x width` table.
///
/// Rows are split into one contiguous block per worker; each worker owns the
/// output rows of its block, so results never depend on the worker count.
/// Inputs must be validated before calling this.
pub(crate) fn fill_rows<T, F>(
    config: &BatchConfig,
    rows: usize,
    width: usize,
    init: T,
    fill: F,
) -> Result<Table<T>, HealpixError>
where
    T: Clone + Send + Sync,
    F: Fn(usize, &mut [T]) + Sync,
{
    let len = rows.checked_mul(width).ok_or_else(|| {
        HealpixError::OutputTooLarge(format!("{rows} rows of {width} values"))
    })?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)?;
    data.resize(len, init);
    if rows == 0 || width == 0 {
        return Ok(Table::from_parts(data, rows, width));
    }

    let pool = build_pool(config.workers)?;
    let rows_per_block = rows.div_ceil(pool.current_num_threads());
    tracing::debug!(
        workers = pool.current_num_threads(),
        rows,
        rows_per_block,
        "dispatching batch"
    );

    pool.install(|| {
        data.par_chunks_mut(rows_per_block * width)
            .enumerate()
            .for_each(|(block, chunk)| {
                let first = block * rows_per_block;
                for (offset, row) in chunk.chunks_mut(width).enumerate() {
                    fill(first + offset, row);
                }
            })
    });
    Ok(Table::from_parts(data, rows, width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_input_order() -> Result<(), HealpixError> {
        for workers in [1, 3, 8] {
            let config = BatchConfig::new().workers(workers);
            let table = fill_rows(&config, 10, 2, 0usize, |r, row| {
                row[0] = r;
                row[1] = r * r;
            })?;
            for (r, row) in table.iter_rows().enumerate() {
                assert_eq!(row, &[r, r * r]);
            }
        }
        Ok(())
    }

    #[test]
    fn test_more_workers_than_rows() -> Result<(), HealpixError> {
        let config = BatchConfig::new().workers(16);
        let table = fill_rows(&config, 3, 1, -1i64, |r, row| row[0] = r as i64)?;
        assert_eq!(table.into_vec(), vec![0, 1, 2]);
        Ok(())
    }

    #[test]
    fn test_oversized_output_is_an_error() {
        let config = BatchConfig::new();
        let result = fill_rows(&config, usize::MAX / 2, 3, 0u8, |_, _| unreachable!());
        assert!(matches!(result, Err(HealpixError::OutputTooLarge(_))));
        let result = fill_rows(&config, isize::MAX as usize / 4, 2, 0i64, |_, _| unreachable!());
        assert!(matches!(result, Err(HealpixError::OutputTooLarge(_))));
    }

    #[test]
    fn test_empty_inputs() -> Result<(), HealpixError> {
        let config = BatchConfig::new();
        let table = fill_rows(&config, 0, 9, 0i64, |_, _| unreachable!())?;
        assert_eq!(table.shape(), (0, 9));
        let table = fill_rows(&config, 4, 0, 0.0f64, |_, _| unreachable!())?;
        assert_eq!(table.shape(), (4, 0));
        Ok(())
    }
}
