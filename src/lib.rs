//! # taskpool
//!
//! A fixed-size worker-thread pool with a mutex-guarded FIFO submission
//! queue and per-task completion callbacks.
//!
//! Producers submit units of work (a closure plus an optional completion
//! closure) and a bounded set of long-lived worker threads pulls and
//! executes them asynchronously. The pool is a low-level building block
//! meant to be embedded in a larger process, not a service of its own.
//!
//! ## Features
//!
//! - **Fixed worker set**: every thread is spawned before the constructor
//!   returns; creation either yields a fully usable pool or nothing
//! - **FIFO admission**: tasks are handed to workers in submission order
//!   (completion order across workers is unordered, as usual)
//! - **Completion callbacks**: an optional second closure runs after the
//!   work, on the same thread, observing all of its side effects
//! - **Drain-free teardown**: `shutdown` stops workers at task boundaries
//!   and drops still-queued tasks without running them
//! - **Expiry alarm**: an optional one-shot timer invokes a caller handler
//!   after a configured duration
//! - **Panic isolation**: a panicking task is contained and counted; its
//!   worker keeps running
//!
//! ## Quick Start
//!
//! ```rust
//! use taskpool::prelude::*;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! let pool = WorkerPool::with_threads(4)?;
//!
//! let counter = Arc::new(AtomicUsize::new(0));
//! for _ in 0..100 {
//!     let counter = Arc::clone(&counter);
//!     pool.submit(move || {
//!         counter.fetch_add(1, Ordering::Relaxed);
//!     })?;
//! }
//!
//! // Block until every submitted task has finished
//! pool.wait();
//! assert_eq!(counter.load(Ordering::Relaxed), 100);
//!
//! pool.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Completion callbacks
//!
//! ```rust
//! use taskpool::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let pool = WorkerPool::with_threads(2)?;
//!
//! pool.submit_with_completion(
//!     || println!("crunching"),
//!     || println!("crunched"),
//! )?;
//!
//! pool.wait();
//! pool.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use taskpool::prelude::*;
//! use std::time::Duration;
//!
//! # fn main() -> Result<()> {
//! let config = PoolConfig::new(8)
//!     .with_thread_name_prefix("crunch")
//!     .with_shutdown_timeout(Duration::from_secs(2));
//!
//! let pool = WorkerPool::with_config(config)?;
//! # pool.shutdown()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod pool;
pub mod prelude;
pub mod queue;

pub use crate::core::{PoolError, Result, Task, WorkFn};
pub use crate::pool::{AlarmHandler, PoolConfig, WorkerPool, WorkerStats};
pub use crate::queue::TaskQueue;
