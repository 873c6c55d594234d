//! Convenient re-exports for common types and traits

pub use crate::core::{PoolError, Result, Task};
pub use crate::pool::{PoolConfig, WorkerPool, WorkerStats};
