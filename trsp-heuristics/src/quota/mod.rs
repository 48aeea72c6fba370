//! The quota module contains cooperative budgets which are checked by long running loops between
//! units of work. A loop never gets interrupted in the middle of a unit.

#[cfg(test)]
#[path = "../../tests/unit/quota/quota_test.rs"]
mod quota_test;

use crate::utils::Timer;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Specifies a computational quota for a long running process.
pub trait Quota {
    /// Returns true when the quota is reached.
    fn is_reached(&self) -> bool;
}

/// A time quota: reached when given amount of seconds has elapsed since creation.
pub struct TimeQuota {
    start: Timer,
    limit_in_secs: f64,
}

impl TimeQuota {
    /// Creates a new instance of `TimeQuota`.
    pub fn new(limit_in_secs: f64) -> Self {
        Self { start: Timer::start(), limit_in_secs }
    }
}

impl Quota for TimeQuota {
    fn is_reached(&self) -> bool {
        self.start.elapsed_secs_as_float() > self.limit_in_secs
    }
}

/// A quota which counts checks and is reached after the given amount of them.
pub struct CheckCountQuota {
    counter: AtomicUsize,
    limit: usize,
}

impl CheckCountQuota {
    /// Creates a new instance of `CheckCountQuota`.
    pub fn new(limit: usize) -> Self {
        Self { counter: AtomicUsize::new(0), limit }
    }
}

impl Quota for CheckCountQuota {
    fn is_reached(&self) -> bool {
        self.counter.fetch_add(1, Ordering::Relaxed) >= self.limit
    }
}

/// A quota which is reached when any of inner quotas is reached.
pub struct CompositeQuota {
    inner: Vec<Arc<dyn Quota + Send + Sync>>,
}

impl CompositeQuota {
    /// Creates a new instance of `CompositeQuota`.
    pub fn new(inner: Vec<Arc<dyn Quota + Send + Sync>>) -> Self {
        Self { inner }
    }
}

impl Quota for CompositeQuota {
    fn is_reached(&self) -> bool {
        self.inner.iter().any(|quota| quota.is_reached())
    }
}
