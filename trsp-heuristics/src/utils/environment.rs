use crate::quota::{Quota, TimeQuota};
use crate::utils::{DefaultRandom, Random, ThreadPool};
use std::sync::Arc;

/// A logger type which is called with various information.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Keeps track of environment specific information which influences algorithm behavior.
#[derive(Clone)]
pub struct Environment {
    /// A wrapper on random generator.
    pub random: Arc<dyn Random + Send + Sync>,

    /// A global execution quota. Checked cooperatively between move evaluations.
    pub quota: Option<Arc<dyn Quota + Send + Sync>>,

    /// Keeps data parallelism settings.
    pub parallelism: Parallelism,

    /// An information logger.
    pub logger: InfoLogger,

    /// Specifies whether low priority messages (e.g. rejected moves) are passed to the logger.
    pub is_verbose: bool,
}

impl Environment {
    /// Creates an instance of `Environment`.
    pub fn new(
        random: Arc<dyn Random + Send + Sync>,
        quota: Option<Arc<dyn Quota + Send + Sync>>,
        parallelism: Parallelism,
        logger: InfoLogger,
        is_verbose: bool,
    ) -> Self {
        Self { random, quota, parallelism, logger, is_verbose }
    }

    /// Creates a default environment with a time quota specified in milliseconds.
    pub fn new_with_time_quota(max_time_ms: Option<u64>) -> Self {
        Self {
            quota: max_time_ms.map::<Arc<dyn Quota + Send + Sync>, _>(|limit| {
                Arc::new(TimeQuota::new(limit as f64 / 1000.))
            }),
            ..Self::default()
        }
    }

    /// Returns true if quota is specified and reached.
    pub fn is_quota_reached(&self) -> bool {
        self.quota.as_ref().is_some_and(|quota| quota.is_reached())
    }

    /// Passes message to the logger if verbose mode is on.
    pub fn log_verbose(&self, message: &str) {
        if self.is_verbose {
            (self.logger)(message)
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new(
            Arc::new(DefaultRandom::default()),
            None,
            Parallelism::default(),
            Arc::new(|msg| println!("{msg}")),
            false,
        )
    }
}

/// Specifies data parallelism settings.
#[derive(Clone)]
pub struct Parallelism {
    available_cpus: usize,
    thread_pool: Option<Arc<ThreadPool>>,
}

impl Default for Parallelism {
    fn default() -> Self {
        Self { available_cpus: get_cpus(), thread_pool: None }
    }
}

impl Parallelism {
    /// Creates an instance of `Parallelism` which runs parallel work on a dedicated pool with
    /// given amount of threads. Falls back to the global pool when the dedicated one cannot be built.
    pub fn new(num_threads: usize) -> Self {
        let num_threads = num_threads.max(1);
        Self { available_cpus: num_threads, thread_pool: ThreadPool::new(num_threads).map(Arc::new) }
    }

    /// Amount of CPUs available for parallel work.
    pub fn available_cpus(&self) -> usize {
        self.available_cpus
    }

    /// Executes operation on the dedicated thread pool, if any.
    pub fn thread_pool_execute<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match self.thread_pool.as_ref() {
            Some(pool) => pool.execute(op),
            None => op(),
        }
    }
}

/// Returns amount of CPUs.
pub fn get_cpus() -> usize {
    num_cpus::get()
}
