use rayon::prelude::*;

use crate::error::RingTophatError;

/// Scheduling of output rows in the correlators.
///
/// Every output row is computed independently, so all strategies produce the
/// same result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExecutionStrategy {
    /// Split the rows over the global rayon pool.
    #[default]
    ParallelRows,

    /// Compute the rows one after another on the calling thread.
    Serial,

    /// Split the rows over a pool of `n` threads built for this call only.
    Fixed(usize),
}

/// Apply `f(row_index, row)` to every row of a row-major buffer.
///
/// # Arguments
///
/// * `data` - The row-major buffer.
/// * `width` - The number of elements per row.
/// * `strategy` - How to schedule the rows.
/// * `f` - The function to apply to each row.
///
/// # Errors
///
/// Returns an error if a [`ExecutionStrategy::Fixed`] pool cannot be built.
pub fn for_each_row_mut<T, F>(
    data: &mut [T],
    width: usize,
    strategy: ExecutionStrategy,
    f: F,
) -> Result<(), RingTophatError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if width == 0 || data.is_empty() {
        return Ok(());
    }

    match strategy {
        ExecutionStrategy::Serial => {
            data.chunks_exact_mut(width)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        }
        ExecutionStrategy::ParallelRows => {
            data.par_chunks_exact_mut(width)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        }
        ExecutionStrategy::Fixed(num_threads) => {
            if num_threads == 0 {
                return Err(RingTophatError::InvalidThreadCount(num_threads));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .map_err(|e| RingTophatError::ThreadPool(e.to_string()))?;
            pool.install(|| {
                data.par_chunks_exact_mut(width)
                    .enumerate()
                    .for_each(|(y, row)| f(y, row));
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row_index(strategy: ExecutionStrategy) -> Result<Vec<usize>, RingTophatError> {
        let mut data = vec![0usize; 4 * 3];
        for_each_row_mut(&mut data, 3, strategy, |y, row| row.fill(y))?;
        Ok(data)
    }

    #[test]
    fn test_strategies_agree() -> Result<(), RingTophatError> {
        let expected = vec![0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3];
        assert_eq!(fill_row_index(ExecutionStrategy::Serial)?, expected);
        assert_eq!(fill_row_index(ExecutionStrategy::ParallelRows)?, expected);
        assert_eq!(fill_row_index(ExecutionStrategy::Fixed(2))?, expected);
        Ok(())
    }

    #[test]
    fn test_invalid_thread_count() {
        assert_eq!(
            fill_row_index(ExecutionStrategy::Fixed(0)),
            Err(RingTophatError::InvalidThreadCount(0))
        );
    }

    #[test]
    fn test_empty_buffer() -> Result<(), RingTophatError> {
        let mut data: Vec<f32> = vec![];
        for_each_row_mut(&mut data, 0, ExecutionStrategy::default(), |_, _| {})?;
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_execution_strategy_serde() -> Result<(), serde_json::Error> {
        assert_eq!(
            serde_json::to_string(&ExecutionStrategy::ParallelRows)?,
            "\"parallel_rows\""
        );
        let strategy: ExecutionStrategy = serde_json::from_str("{\"fixed\":4}")?;
        assert_eq!(strategy, ExecutionStrategy::Fixed(4));
        Ok(())
    }
}
