#[cfg(test)]
#[path = "../../tests/unit/utils/parallel_test.rs"]
mod parallel_test;

use rayon::prelude::*;

/// A dedicated rayon pool which keeps parallel search off the global pool.
pub struct ThreadPool {
    inner: rayon::ThreadPool,
}

impl ThreadPool {
    /// Creates a new instance of `ThreadPool`. Returns `None` if the pool cannot be built.
    pub fn new(num_threads: usize) -> Option<Self> {
        rayon::ThreadPoolBuilder::new().num_threads(num_threads).build().ok().map(|inner| Self { inner })
    }

    /// Runs the operation inside the pool: nested parallel iterators use its threads.
    pub fn execute<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.inner.install(op)
    }
}

/// Maps borrowed items in parallel keeping their order.
pub fn parallel_collect<T, F, R>(source: &[T], map_op: F) -> Vec<R>
where
    T: Send + Sync,
    F: Fn(&T) -> R + Sync + Send,
    R: Send,
{
    source.par_iter().map(map_op).collect()
}

/// Maps owned items in parallel keeping their order. Items are moved into workers, so they
/// need to be `Send` only: a solution with `!Sync` tour caches qualifies.
pub fn parallel_into_collect<T, F, R>(source: Vec<T>, map_op: F) -> Vec<R>
where
    T: Send,
    F: Fn(T) -> R + Sync + Send,
    R: Send,
{
    source.into_par_iter().map(map_op).collect()
}
