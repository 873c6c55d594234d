//! Worker pool and worker thread implementations

mod alarm;
pub mod worker;
pub mod worker_pool;

pub use alarm::AlarmHandler;
pub use worker::{Worker, WorkerStats};
pub use worker_pool::{PoolConfig, WorkerPool};
