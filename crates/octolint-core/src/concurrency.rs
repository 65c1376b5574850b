//! Bounded parallel fan-out for per-item fetches.

use rayon::prelude::*;

/// Applies `f` to every item on at most `concurrency` threads.
///
/// Results keep the order of `items`. When a dedicated pool cannot be
/// created the items are processed sequentially.
pub fn fan_out<T, R, F>(concurrency: usize, items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    if concurrency <= 1 || items.len() <= 1 {
        return items.iter().map(f).collect();
    }

    match rayon::ThreadPoolBuilder::new()
        .num_threads(concurrency)
        .thread_name(|i| format!("octolint-fetch-{i}"))
        .build()
    {
        Ok(pool) => pool.install(|| items.par_iter().map(&f).collect()),
        Err(e) => {
            tracing::warn!("Failed to build fetch pool, running sequentially: {e}");
            items.iter().map(f).collect()
        }
    }
}
