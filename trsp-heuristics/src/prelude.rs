//! This module reimports a common used types.

pub use crate::quota::CheckCountQuota;
pub use crate::quota::CompositeQuota;
pub use crate::quota::Quota;
pub use crate::quota::TimeQuota;

pub use crate::utils::compare_floats;
pub use crate::utils::DefaultRandom;
pub use crate::utils::Environment;
pub use crate::utils::Float;
pub use crate::utils::GenericError;
pub use crate::utils::GenericResult;
pub use crate::utils::InfoLogger;
pub use crate::utils::Parallelism;
pub use crate::utils::Timer;
pub use crate::utils::{Random, RandomGen};
